use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub content: ContentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Where the markdown content tree lives and how it is walked.
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub root: PathBuf,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Site identity used for canonical URLs, sitemap entries, and preview
/// card branding.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_site_description")]
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            title: default_title(),
            description: default_site_description(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_title() -> String {
    "Lootbook".to_string()
}
fn default_site_description() -> String {
    "A curated collection of community game resources.".to_string()
}

/// Social preview card appearance. Explicit values, not ambient
/// globals, so two sites can run the same binary with different looks.
#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_width")]
    pub width: u32,
    #[serde(default = "default_preview_height")]
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: default_preview_width(),
            height: default_preview_height(),
            background: default_background(),
            foreground: default_foreground(),
            accent: default_accent(),
        }
    }
}

fn default_preview_width() -> u32 {
    1200
}
fn default_preview_height() -> u32 {
    630
}
fn default_background() -> String {
    "#0a0a0a".to_string()
}
fn default_foreground() -> String {
    "#e5e5e5".to_string()
}
fn default_accent() -> String {
    "#c49a3c".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&raw).with_context(|| "Failed to parse config file")?;

    // Canonical URLs are built by joining paths onto base_url.
    while config.site.base_url.ends_with('/') {
        config.site.base_url.pop();
    }
    if config.site.base_url.is_empty() {
        anyhow::bail!("site.base_url must not be empty");
    }

    // Card layout reserves fixed margins; reject dimensions too small
    // to hold them.
    if config.preview.width < 200 || config.preview.height < 200 {
        anyhow::bail!("preview.width and preview.height must be at least 200");
    }

    for (key, value) in [
        ("background", &config.preview.background),
        ("foreground", &config.preview.foreground),
        ("accent", &config.preview.accent),
    ] {
        if !value.starts_with('#') {
            anyhow::bail!("preview.{} must be a #rrggbb color, got '{}'", key, value);
        }
    }

    Ok(config)
}
