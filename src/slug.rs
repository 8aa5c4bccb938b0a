//! Identifier normalization.
//!
//! Turns arbitrary display text into a URL-safe slug: lowercased, with
//! every run of non-alphanumeric characters collapsed to a single hyphen.
//! Slugs are recomputed from display names wherever they are needed —
//! they are never stored or edited independently.

/// Normalize display text into a slug.
///
/// Lowercases the input, collapses every maximal run of characters
/// outside `[a-z0-9]` into one `-`, and strips leading/trailing hyphens.
/// Total and idempotent: any input produces a valid slug (possibly
/// empty), and normalizing a slug returns it unchanged.
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
