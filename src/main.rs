//! # Lootbook CLI
//!
//! The `lootbook` binary builds the resource catalog from a markdown
//! content tree and either inspects it from the command line or serves
//! it over HTTP. The catalog is rebuilt from source documents on every
//! invocation — there is no database.
//!
//! ## Usage
//!
//! ```bash
//! lootbook --config ./config/lootbook.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lootbook check` | Build the catalog and print a summary |
//! | `lootbook stats` | Per-category breakdown of the catalog |
//! | `lootbook search "<query>"` | Substring search across resources |
//! | `lootbook get <category> <resource>` | Show one resource by slugs |
//! | `lootbook serve` | Start the JSON API server |

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lootbook::models::Catalog;
use lootbook::{builder, config, query, server};

/// Lootbook — a curated catalog of community game resources.
///
/// All commands accept a `--config` flag pointing to a TOML
/// configuration file. See `config/lootbook.example.toml` for a full
/// example.
#[derive(Parser)]
#[command(
    name = "lootbook",
    about = "Lootbook — a curated catalog of community game resources",
    version,
    long_about = "Lootbook reads a directory tree of markdown resource documents, builds a \
    sorted category/subcategory/resource catalog in memory, and serves it through a JSON API \
    with search, sitemap, and social preview cards."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/lootbook.toml`. The content root, server
    /// bind address, site identity, and preview palette are all read
    /// from this file.
    #[arg(long, global = true, default_value = "./config/lootbook.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Build the catalog and print a summary.
    ///
    /// Walks the content root, parses every document, and reports how
    /// many categories and resources were found. Exits non-zero if the
    /// tree cannot be read — the same condition that would abort
    /// `serve` at startup.
    Check,

    /// Print a per-category breakdown of the built catalog.
    Stats,

    /// Search the catalog.
    ///
    /// Case-insensitive substring match against resource names,
    /// descriptions, platforms, and owning category/subcategory names.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one resource by its category slug and resource slug.
    Get {
        /// Category slug (e.g. `tools`).
        category: String,

        /// Resource slug (e.g. `map-genie`).
        resource: String,
    },

    /// Build the catalog and start the JSON API server.
    ///
    /// The catalog is built once before the listener starts; a build
    /// failure is a fatal startup error.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    let catalog = builder::build_catalog(&cfg.content)?;

    match cli.command {
        Commands::Check => {
            println!("check {}", cfg.content.root.display());
            println!("  categories: {}", catalog.categories.len());
            println!("  resources:  {}", catalog.total_resources);
            println!("ok");
        }
        Commands::Stats => {
            print_stats(&catalog);
        }
        Commands::Search { query, limit } => {
            run_search(&catalog, &query, limit);
        }
        Commands::Get { category, resource } => {
            run_get(&catalog, &category, &resource);
        }
        Commands::Serve => {
            println!(
                "Loaded {} categories with {} total resources",
                catalog.categories.len(),
                catalog.total_resources
            );
            server::run_server(&cfg, catalog).await?;
        }
    }

    Ok(())
}

fn print_stats(catalog: &Catalog) {
    println!("Lootbook — Catalog Stats");
    println!("========================");
    println!();
    println!("  Categories: {}", catalog.categories.len());
    println!("  Resources:  {}", catalog.total_resources);
    println!();
    println!("  {:<28} {:>8} {:>10}", "CATEGORY", "SUBCATS", "RESOURCES");
    println!("  {}", "-".repeat(48));

    for category in &catalog.categories {
        println!(
            "  {:<28} {:>8} {:>10}",
            category.name,
            category.subcategories.len(),
            category.resource_count()
        );
    }
    println!();
}

fn run_search(catalog: &Catalog, query_str: &str, limit: Option<usize>) {
    let mut results = query::search(catalog, query_str);
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    if results.is_empty() {
        println!("No results.");
        return;
    }

    println!("{} result(s) for '{}':", results.len(), query_str);
    println!();
    for hit in &results {
        println!("  {} — {} > {}", hit.resource.name, hit.category, hit.subcategory);
        println!("    slug: {}/{}", hit.resource.category_slug, hit.resource.slug);
        println!("    url:  {}", hit.resource.url);
        if !hit.resource.description.is_empty() {
            println!("    {}", hit.resource.description);
        }
        println!();
    }
}

fn run_get(catalog: &Catalog, category_slug: &str, resource_slug: &str) {
    let Some(resource) = query::resource_by_slug(catalog, category_slug, resource_slug) else {
        eprintln!("Error: resource not found: {category_slug}/{resource_slug}");
        std::process::exit(1);
    };

    println!("--- Resource ---");
    println!("name:        {}", resource.name);
    println!("slug:        {}", resource.slug);
    println!("url:         {}", resource.url);
    println!(
        "category:    {} ({})",
        resource.category_name, resource.category_slug
    );
    println!(
        "subcategory: {} ({})",
        resource.subcategory_name, resource.subcategory_slug
    );
    if !resource.description.is_empty() {
        println!("description: {}", resource.description);
    }
    if !resource.platform.is_empty() {
        println!("platform:    {}", resource.platform);
    }
    if !resource.audience.is_empty() {
        println!("audience:    {}", resource.audience);
    }
    if !resource.price.is_empty() {
        println!("price:       {}", resource.price);
    }

    if resource.links.len() > 1 {
        println!();
        println!("--- Links ({}) ---", resource.links.len());
        for link in &resource.links {
            if link.label.is_empty() {
                println!("  {}", link.url);
            } else {
                println!("  {} — {}", link.label, link.url);
            }
        }
    }
}
