//! Sitemap and robots.txt emission.
//!
//! The sitemap enumerates the home page, every category page, and every
//! resource page, in catalog order. Category and resource paths mirror
//! the HTTP routes (`/category/{slug}`, `/resource/{category}/{slug}`).

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::models::Catalog;

const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

struct UrlEntry<'a> {
    loc: String,
    changefreq: &'a str,
    priority: &'a str,
}

/// Render the sitemap XML for a built catalog.
///
/// Produces exactly `1 + |categories| + total_resources` URL entries:
/// the home page (daily, 1.0), one per category (weekly, 0.8), and one
/// per resource (monthly, 0.6). `lastmod` is the day the catalog was
/// built, i.e. process start.
pub fn render_sitemap(catalog: &Catalog, base_url: &str) -> Result<Vec<u8>> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut entries = Vec::with_capacity(1 + catalog.categories.len() + catalog.total_resources);
    entries.push(UrlEntry {
        loc: format!("{base_url}/"),
        changefreq: "daily",
        priority: "1.0",
    });

    for category in &catalog.categories {
        entries.push(UrlEntry {
            loc: format!("{base_url}/category/{}", category.slug),
            changefreq: "weekly",
            priority: "0.8",
        });
        for subcategory in &category.subcategories {
            for resource in &subcategory.resources {
                entries.push(UrlEntry {
                    loc: format!("{base_url}/resource/{}/{}", category.slug, resource.slug),
                    changefreq: "monthly",
                    priority: "0.6",
                });
            }
        }
    }

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_XMLNS));
    writer.write_event(Event::Start(urlset))?;

    for entry in &entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        write_text_element(&mut writer, "lastmod", &today)?;
        write_text_element(&mut writer, "changefreq", entry.changefreq)?;
        write_text_element(&mut writer, "priority", entry.priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Render robots.txt: crawl everything except the search results page,
/// and point crawlers at the sitemap.
pub fn render_robots(base_url: &str) -> String {
    format!(
        "# robots.txt for {base_url}\n\
         User-agent: *\n\
         Allow: /\n\
         Disallow: /search\n\n\
         Sitemap: {base_url}/sitemap.xml\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Resource, ResourceLink, Subcategory};

    fn catalog() -> Catalog {
        let resource = Resource {
            name: "Map Genie".to_string(),
            slug: "map-genie".to_string(),
            url: "https://mapgenie.example".to_string(),
            links: vec![ResourceLink {
                url: "https://mapgenie.example".to_string(),
                label: String::new(),
            }],
            description: String::new(),
            platform: String::new(),
            audience: String::new(),
            price: String::new(),
            category_name: "Maps".to_string(),
            category_slug: "maps".to_string(),
            subcategory_name: "General".to_string(),
            subcategory_slug: "general".to_string(),
        };
        Catalog {
            categories: vec![Category {
                name: "Maps".to_string(),
                slug: "maps".to_string(),
                description: String::new(),
                subcategories: vec![Subcategory {
                    name: "General".to_string(),
                    slug: "general".to_string(),
                    resources: vec![resource],
                }],
            }],
            total_resources: 1,
        }
    }

    #[test]
    fn test_entry_count_and_paths() {
        let xml = render_sitemap(&catalog(), "https://loot.example").unwrap();
        let xml = String::from_utf8(xml).unwrap();

        // home + 1 category + 1 resource
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<loc>https://loot.example/</loc>"));
        assert!(xml.contains("<loc>https://loot.example/category/maps</loc>"));
        assert!(xml.contains("<loc>https://loot.example/resource/maps/map-genie</loc>"));
        assert!(xml.contains(SITEMAP_XMLNS));
    }

    #[test]
    fn test_priorities() {
        let xml = render_sitemap(&catalog(), "https://loot.example").unwrap();
        let xml = String::from_utf8(xml).unwrap();
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.6</priority>"));
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let robots = render_robots("https://loot.example");
        assert!(robots.contains("Sitemap: https://loot.example/sitemap.xml"));
        assert!(robots.contains("Disallow: /search"));
    }
}
