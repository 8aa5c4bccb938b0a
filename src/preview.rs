//! Social preview cards.
//!
//! Renders an SVG card per page (home, search, category, resource) from
//! explicit [`PreviewConfig`] values and caches the encoded bytes by a
//! string key. The cache has no eviction and no TTL: the catalog is
//! fixed for the life of the process, so the key space is bounded by
//! the page count. Revisit if previews ever become user-supplied.

use quick_xml::escape::escape;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::{PreviewConfig, SiteConfig};

/// Maximum characters of title/subtitle drawn on a card. Counted in
/// code points, never byte offsets.
const TITLE_MAX_CHARS: usize = 48;
const SUBTITLE_MAX_CHARS: usize = 90;

/// In-memory byte cache keyed by request path.
#[derive(Default)]
pub struct PreviewCache {
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.images.read().expect("preview cache poisoned").get(key).cloned()
    }

    pub fn insert(&self, key: String, bytes: Vec<u8>) {
        self.images
            .write()
            .expect("preview cache poisoned")
            .insert(key, bytes);
    }

    pub fn len(&self) -> usize {
        self.images.read().expect("preview cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One renderable card variant.
pub enum PreviewCard<'a> {
    Home {
        total_resources: usize,
        category_count: usize,
    },
    Search {
        total_resources: usize,
    },
    Category {
        name: &'a str,
        description: &'a str,
        resource_count: usize,
    },
    Resource {
        name: &'a str,
        description: &'a str,
        category_name: &'a str,
    },
}

/// Render a card as SVG bytes.
pub fn render_card(card: &PreviewCard, site: &SiteConfig, preview: &PreviewConfig) -> Vec<u8> {
    let (title, subtitle, badge) = match card {
        PreviewCard::Home {
            total_resources,
            category_count,
        } => (
            site.title.clone(),
            site.description.clone(),
            format!("{total_resources} resources · {category_count} categories"),
        ),
        PreviewCard::Search { total_resources } => (
            format!("Search {}", site.title),
            format!("Find the right tool among {total_resources} resources."),
            "search".to_string(),
        ),
        PreviewCard::Category {
            name,
            description,
            resource_count,
        } => (
            (*name).to_string(),
            (*description).to_string(),
            format!("{resource_count} resources"),
        ),
        PreviewCard::Resource {
            name,
            description,
            category_name,
        } => (
            (*name).to_string(),
            (*description).to_string(),
            (*category_name).to_string(),
        ),
    };

    let title = escape(truncate_chars(&title, TITLE_MAX_CHARS).as_str()).into_owned();
    let subtitle = escape(truncate_chars(&subtitle, SUBTITLE_MAX_CHARS).as_str()).into_owned();
    let badge = escape(truncate_chars(&badge, TITLE_MAX_CHARS).as_str()).into_owned();
    let brand = escape(site.title.as_str()).into_owned();

    let width = preview.width;
    let height = preview.height;
    // Signed math: undersized cards get offscreen text, never a panic.
    let mid = i64::from(height) / 2;

    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <rect width="{width}" height="{height}" fill="{bg}"/>
  <rect x="0" y="0" width="{width}" height="12" fill="{accent}"/>
  <text x="80" y="{badge_y}" font-family="sans-serif" font-size="28" fill="{accent}">{badge}</text>
  <text x="80" y="{title_y}" font-family="sans-serif" font-size="72" font-weight="bold" fill="{fg}">{title}</text>
  <text x="80" y="{subtitle_y}" font-family="sans-serif" font-size="36" fill="{fg}" opacity="0.7">{subtitle}</text>
  <text x="80" y="{brand_y}" font-family="sans-serif" font-size="22" fill="{accent}">{brand}</text>
</svg>
"#,
        bg = preview.background,
        fg = preview.foreground,
        accent = preview.accent,
        badge_y = mid - 90,
        title_y = mid,
        subtitle_y = mid + 70,
        brand_y = i64::from(height) - 50,
    );

    svg.into_bytes()
}

/// Truncate to at most `max` characters, appending an ellipsis when
/// anything was cut. Operates on char boundaries so multi-byte text is
/// never split mid-codepoint.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> (SiteConfig, PreviewConfig) {
        (SiteConfig::default(), PreviewConfig::default())
    }

    #[test]
    fn test_cache_round_trip() {
        let cache = PreviewCache::new();
        assert!(cache.get("og/home").is_none());

        cache.insert("og/home".to_string(), vec![1, 2, 3]);
        assert_eq!(cache.get("og/home").unwrap(), vec![1, 2, 3]);
        assert_eq!(cache.get("og/home").unwrap(), cache.get("og/home").unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cards_render_distinct_svg() {
        let (site, preview) = configs();
        let home = render_card(
            &PreviewCard::Home {
                total_resources: 42,
                category_count: 7,
            },
            &site,
            &preview,
        );
        let search = render_card(&PreviewCard::Search { total_resources: 42 }, &site, &preview);

        let home = String::from_utf8(home).unwrap();
        let search = String::from_utf8(search).unwrap();
        assert!(home.starts_with("<svg"));
        assert!(home.contains("42 resources · 7 categories"));
        assert_ne!(home, search);
    }

    #[test]
    fn test_text_is_escaped() {
        let (site, preview) = configs();
        let card = PreviewCard::Resource {
            name: "Ammo & Armor <Charts>",
            description: "a \"quoted\" description",
            category_name: "Charts",
        };
        let svg = String::from_utf8(render_card(&card, &site, &preview)).unwrap();
        assert!(svg.contains("Ammo &amp; Armor &lt;Charts&gt;"));
        assert!(!svg.contains("<Charts>"));
    }

    #[test]
    fn test_truncate_by_code_points() {
        assert_eq!(truncate_chars("short", 10), "short");

        let long = "日本語のとても長いタイトルです".repeat(4);
        let cut = truncate_chars(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_small_card_dimensions_do_not_panic() {
        let site = SiteConfig::default();
        let preview = PreviewConfig {
            width: 160,
            height: 100,
            ..PreviewConfig::default()
        };
        let svg = String::from_utf8(render_card(
            &PreviewCard::Search { total_resources: 1 },
            &site,
            &preview,
        ))
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("height=\"100\""));
    }

    #[test]
    fn test_uses_configured_palette() {
        let site = SiteConfig::default();
        let preview = PreviewConfig {
            background: "#111111".to_string(),
            accent: "#ff0000".to_string(),
            ..PreviewConfig::default()
        };
        let svg = String::from_utf8(render_card(
            &PreviewCard::Search { total_resources: 1 },
            &site,
            &preview,
        ))
        .unwrap();
        assert!(svg.contains("#111111"));
        assert!(svg.contains("#ff0000"));
    }
}
