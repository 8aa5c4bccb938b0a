//! Read-only lookups and search over a built [`Catalog`].
//!
//! Every operation here is a pure function over shared references —
//! nothing mutates the catalog, so all of them are safe to call
//! concurrently once the build has finished.

use crate::models::{Catalog, Category, Resource, SearchResult};

/// Find a category by its slug. Linear scan; slugs are unique by
/// construction.
pub fn category_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Option<&'a Category> {
    catalog.categories.iter().find(|c| c.slug == slug)
}

/// Find a resource by its owning category slug and its own slug.
///
/// Scans the matching category's subcategories in order and returns the
/// first resource whose slug matches.
pub fn resource_by_slug<'a>(
    catalog: &'a Catalog,
    category_slug: &str,
    resource_slug: &str,
) -> Option<&'a Resource> {
    let category = category_by_slug(catalog, category_slug)?;
    category
        .subcategories
        .iter()
        .flat_map(|s| s.resources.iter())
        .find(|r| r.slug == resource_slug)
}

/// Pick the target URL for an outbound-link redirect.
///
/// The resource is addressed by slugs, never by a caller-supplied URL —
/// that keeps the redirect closed to catalog links only. `index` selects
/// among the resource's links (0 = primary); out of range is `None`.
pub fn outbound_url<'a>(
    catalog: &'a Catalog,
    category_slug: &str,
    resource_slug: &str,
    index: usize,
) -> Option<&'a str> {
    let resource = resource_by_slug(catalog, category_slug, resource_slug)?;
    resource.links.get(index).map(|link| link.url.as_str())
}

/// Case-insensitive substring search across every resource.
///
/// Matches against the resource name, description, and platform, plus
/// the owning category and subcategory names. A resource matching any
/// field is emitted exactly once, in catalog traversal order. An empty
/// query returns no results rather than the whole catalog.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<SearchResult<'a>> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for category in &catalog.categories {
        for subcategory in &category.subcategories {
            for resource in &subcategory.resources {
                let hit = contains(&resource.name, &needle)
                    || contains(&resource.description, &needle)
                    || contains(&resource.platform, &needle)
                    || contains(&category.name, &needle)
                    || contains(&subcategory.name, &needle);

                if hit {
                    results.push(SearchResult {
                        resource,
                        category: &category.name,
                        subcategory: &subcategory.name,
                    });
                }
            }
        }
    }

    results
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
