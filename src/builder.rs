//! Catalog construction from a content tree.
//!
//! Walks the content root once at startup, parses every matching
//! document, and aggregates the results into the sorted, immutable
//! [`Catalog`]. Resources are grouped by *slug* equality, so category
//! names differing only in case or punctuation merge into one category;
//! the display name comes from the first resource encountered for a
//! slug. File paths are collected and sorted before aggregation, so
//! "first" is deterministic regardless of OS directory order.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::ContentConfig;
use crate::models::{Catalog, Category, Resource, Subcategory};
use crate::parser;
use crate::slug;

/// Filename marking a category description document.
const CATEGORY_DOC_NAME: &str = "_category.md";

/// Reserved identifiers for resources whose grouping could not be
/// determined from their document.
const UNCATEGORIZED_SLUG: &str = "uncategorized";
const UNCATEGORIZED_NAME: &str = "Uncategorized";
const GENERAL_SLUG: &str = "general";
const GENERAL_NAME: &str = "General";

struct SubcategoryAccum {
    name: String,
    resources: Vec<Resource>,
}

struct CategoryAccum {
    name: String,
    subcategories: HashMap<String, SubcategoryAccum>,
}

/// Build the catalog by recursively visiting every file under the
/// content root.
///
/// Files named `_category.md` contribute a category description keyed
/// by the slug of their containing directory; other `.md` files are
/// resource documents. Anything else is skipped. A file that cannot be
/// read aborts the whole build — this is a fatal startup condition, not
/// a recoverable one. Documents missing a name or link are silently
/// skipped and do not count toward the total.
pub fn build_catalog(content: &ContentConfig) -> Result<Catalog> {
    let root = &content.root;
    if !root.exists() {
        bail!("content root does not exist: {}", root.display());
    }

    let exclude_set = build_globset(&content.exclude_globs)?;

    // Collect matched paths first and sort them, fixing the traversal
    // order that first-seen display names depend on.
    let mut description_docs: Vec<PathBuf> = Vec::new();
    let mut resource_docs: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(root).follow_links(content.follow_symlinks);
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude_set.is_match(relative) {
            continue;
        }

        if path.file_name().is_some_and(|n| n == CATEGORY_DOC_NAME) {
            description_docs.push(path.to_path_buf());
        } else if path.extension().is_some_and(|e| e == "md") {
            resource_docs.push(path.to_path_buf());
        }
    }

    description_docs.sort();
    resource_docs.sort();

    // Category descriptions, keyed by the slug of the containing
    // directory's name.
    let mut descriptions: HashMap<String, String> = HashMap::new();
    for path in &description_docs {
        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let description = parser::parse_category_description(path)?;
        if !description.is_empty() {
            descriptions.insert(slug::normalize(&dir_name), description);
        }
    }

    let mut category_map: HashMap<String, CategoryAccum> = HashMap::new();
    let mut total_resources = 0usize;

    for path in &resource_docs {
        let Some(mut resource) = parser::parse_resource_document(path)? else {
            continue;
        };
        total_resources += 1;

        if resource.category_slug.is_empty() {
            resource.category_slug = UNCATEGORIZED_SLUG.to_string();
            resource.category_name = UNCATEGORIZED_NAME.to_string();
        }
        if resource.subcategory_slug.is_empty() {
            resource.subcategory_slug = GENERAL_SLUG.to_string();
            resource.subcategory_name = GENERAL_NAME.to_string();
        }

        let category = category_map
            .entry(resource.category_slug.clone())
            .or_insert_with(|| CategoryAccum {
                name: resource.category_name.clone(),
                subcategories: HashMap::new(),
            });

        let subcategory = category
            .subcategories
            .entry(resource.subcategory_slug.clone())
            .or_insert_with(|| SubcategoryAccum {
                name: resource.subcategory_name.clone(),
                resources: Vec::new(),
            });

        subcategory.resources.push(resource);
    }

    // Freeze the hierarchy: sort every level by name (stable), then
    // apply descriptions last.
    let mut categories: Vec<Category> = category_map
        .into_iter()
        .map(|(cat_slug, accum)| {
            let mut subcategories: Vec<Subcategory> = accum
                .subcategories
                .into_iter()
                .map(|(sub_slug, sub)| {
                    let mut resources = sub.resources;
                    resources.sort_by(|a, b| a.name.cmp(&b.name));
                    Subcategory {
                        name: sub.name,
                        slug: sub_slug,
                        resources,
                    }
                })
                .collect();
            subcategories.sort_by(|a, b| a.name.cmp(&b.name));

            let description = descriptions.get(&cat_slug).cloned().unwrap_or_default();
            Category {
                name: accum.name,
                slug: cat_slug,
                description,
                subcategories,
            }
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Catalog {
        categories,
        total_resources,
    })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("bad exclude glob: {pattern}"))?);
    }
    Ok(builder.build()?)
}
