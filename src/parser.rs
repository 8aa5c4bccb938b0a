//! Line-oriented document parsers.
//!
//! Two entry points, both best-effort: a malformed document degrades to
//! a skipped entry or an empty description instead of failing the whole
//! build. Only I/O failures propagate as errors.
//!
//! A resource document looks like:
//!
//! ```markdown
//! # Map Genie
//!
//! **Website:** [mapgenie.io](https://mapgenie.io/tarkov)
//! **Category:** Maps > Interactive
//!
//! ## Overview
//!
//! Interactive maps with loot, keys, and extract markers.
//!
//! ## Details
//!
//! | Platform | Web |
//! | Audience | All players |
//! | Price    | Free |
//! ```
//!
//! A category description document (`_category.md`) carries an optional
//! frontmatter block with a `description:` key, or falls back to its
//! first non-blank body line.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::models::{Resource, ResourceLink};
use crate::slug;

/// Parse a resource document.
///
/// Returns `Ok(None)` when the document lacks a name or any website
/// link — such documents are silently skipped, not treated as errors.
/// Read failures abort with an error for this file.
pub fn parse_resource_document(path: &Path) -> Result<Option<Resource>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open resource document: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut name = String::new();
    let mut links: Vec<ResourceLink> = Vec::new();
    let mut category_name = String::new();
    let mut subcategory_name = String::new();
    let mut description = String::new();
    let mut platform = String::new();
    let mut audience = String::new();
    let mut price = String::new();
    let mut in_details = false;

    for line in reader.lines() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;

        // Resource name from the first top-level heading; later ones ignored.
        if name.is_empty() {
            if let Some(rest) = line.strip_prefix("# ") {
                name = rest.to_string();
                continue;
            }
        }

        // Website links; a document may carry several.
        if line.starts_with("**Website:**") {
            if let Some((label, url)) = extract_markdown_link(&line) {
                // A label that is itself a URL adds nothing for display.
                let label = if label.starts_with("http://") || label.starts_with("https://") {
                    String::new()
                } else {
                    label
                };
                links.push(ResourceLink { url, label });
            }
            continue;
        }

        // Category line: "Tools > Trackers" — subcategory is optional.
        if let Some(rest) = line.strip_prefix("**Category:**") {
            let mut parts = rest.splitn(2, '>');
            category_name = parts.next().unwrap_or("").trim().to_string();
            subcategory_name = parts.next().unwrap_or("").trim().to_string();
            continue;
        }

        if line.starts_with("## Overview") {
            continue;
        }

        // Description: first line that is not a heading, annotation,
        // rule, or table row. One line only, never a paragraph.
        if description.is_empty()
            && !line.starts_with('#')
            && !line.starts_with("**")
            && !line.starts_with("---")
            && !line.starts_with('|')
            && !line.trim().is_empty()
        {
            description = line.trim().to_string();
            continue;
        }

        if line.starts_with("## Details") {
            in_details = true;
            continue;
        }

        if in_details && line.starts_with('|') {
            let cells: Vec<&str> = line.split('|').collect();
            if cells.len() >= 3 {
                let key = cells[1].trim().trim_matches('*');
                let value = cells[2].trim();
                match key {
                    "Platform" => platform = value.to_string(),
                    "Audience" => audience = value.to_string(),
                    "Price" => price = value.to_string(),
                    _ => {}
                }
            }
            continue;
        }

        // A rule inside the details section ends the document early.
        if in_details && line.starts_with("---") {
            break;
        }
    }

    if name.is_empty() || links.is_empty() {
        return Ok(None);
    }

    let url = links[0].url.clone();
    let category_slug = slug::normalize(&category_name);
    let subcategory_slug = slug::normalize(&subcategory_name);

    Ok(Some(Resource {
        slug: slug::normalize(&name),
        name,
        url,
        links,
        description,
        platform,
        audience,
        price,
        category_name,
        category_slug,
        subcategory_name,
        subcategory_slug,
    }))
}

/// Parse a category description document.
///
/// Prefers a `description:` key inside a leading `---`-delimited
/// frontmatter block (surrounding quotes stripped). Without the key —
/// or without any block — the first non-blank body line is used.
/// Absence of any content yields an empty string, never an error.
pub fn parse_category_description(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open category document: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut in_frontmatter = false;
    let mut frontmatter_done = false;

    for line in reader.lines() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;

        if line.trim() == "---" {
            if !in_frontmatter {
                in_frontmatter = true;
            } else {
                frontmatter_done = true;
            }
            continue;
        }

        if in_frontmatter && !frontmatter_done {
            if let Some(value) = line.strip_prefix("description:") {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                return Ok(value.to_string());
            }
            continue;
        }

        // First non-blank line, either after the block or in a document
        // that never opened one.
        if !line.trim().is_empty() {
            return Ok(line.trim().to_string());
        }
    }

    Ok(String::new())
}

/// Extract the first `[label](url)` markup link from a line.
///
/// Both label and URL must be non-empty, and the closing bracket must
/// be immediately followed by the opening parenthesis.
fn extract_markdown_link(line: &str) -> Option<(String, String)> {
    let open = line.find('[')?;
    let close = open + 1 + line[open + 1..].find(']')?;
    let label = &line[open + 1..close];

    let rest = line[close + 1..].strip_prefix('(')?;
    let end = rest.find(')')?;
    let url = &rest[..end];

    if label.is_empty() || url.is_empty() {
        return None;
    }
    Some((label.to_string(), url.to_string()))
}
