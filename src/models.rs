//! Core data models for the resource catalog.
//!
//! These types form the immutable snapshot built once at startup:
//! [`Catalog`] owns sorted [`Category`]s, which own sorted
//! [`Subcategory`]s, which own sorted [`Resource`]s. Nothing mutates a
//! catalog after [`crate::builder::build_catalog`] returns it, so the
//! whole tree is safe to share across threads behind an `Arc`.

use serde::Serialize;

/// A single link attached to a resource, with an optional display label.
///
/// The label is empty when the source document used the URL itself as
/// the link text.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceLink {
    pub url: String,
    pub label: String,
}

/// One catalog entry: a community tool, tracker, chart, or similar.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub name: String,
    /// Always `slug::normalize(name)`; recomputed, never edited.
    pub slug: String,
    /// Primary URL — the first parsed link, kept as a flat field for
    /// consumers that expect a single address.
    pub url: String,
    /// Every parsed link, in document order. At least one entry.
    pub links: Vec<ResourceLink>,
    pub description: String,
    pub platform: String,
    pub audience: String,
    pub price: String,
    /// Owning category/subcategory, denormalized for display.
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: String,
    pub subcategory_slug: String,
}

/// A named grouping of resources within a category.
#[derive(Debug, Clone, Serialize)]
pub struct Subcategory {
    pub name: String,
    pub slug: String,
    /// Sorted by name (stable).
    pub resources: Vec<Resource>,
}

/// A top-level grouping of subcategories.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    /// Globally unique across the catalog.
    pub slug: String,
    /// Long-form text from a sibling `_category.md`, if one exists.
    pub description: String,
    /// Sorted by name.
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Number of resources across all subcategories of this category.
    pub fn resource_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.resources.len()).sum()
    }
}

/// The full site snapshot: every category plus a precomputed total.
///
/// `total_resources` always equals the sum of resource counts across
/// every subcategory of every category.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub total_resources: usize,
}

/// A search hit: a resource paired with its owning group names.
///
/// Borrowed from the catalog — produced transiently by
/// [`crate::query::search`] and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    pub resource: &'a Resource,
    pub category: &'a str,
    pub subcategory: &'a str,
}
