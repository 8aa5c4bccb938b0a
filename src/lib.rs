//! # Lootbook
//!
//! A curated catalog of community game resources — markdown in,
//! searchable JSON API out.
//!
//! Lootbook reads a directory tree of loosely structured markdown
//! documents, extracts one resource entity per document, assembles a
//! deduplicated, sorted category → subcategory → resource hierarchy in
//! memory, and serves it through read-only lookups, a substring search,
//! and an HTTP API with SEO surfaces (sitemap, robots, preview cards).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────┐   ┌───────────┐   ┌─────────────┐
//! │  content/   │──▶│  parser  │──▶│  builder  │──▶│   Catalog    │
//! │ *.md files  │   │ per-file │   │ group+sort│   │ (immutable)  │
//! └────────────┘   └──────────┘   └───────────┘   └──────┬──────┘
//!                                                        │
//!                                        ┌───────────────┤
//!                                        ▼               ▼
//!                                   ┌─────────┐    ┌──────────┐
//!                                   │   CLI   │    │   HTTP   │
//!                                   │(lootbook)│   │  (axum)  │
//!                                   └─────────┘    └──────────┘
//! ```
//!
//! The catalog is built once, synchronously, before any query traffic;
//! afterwards it is shared read-only, so all lookups and searches are
//! safe to run concurrently without locking.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Catalog data types |
//! | [`slug`] | Display text → URL-safe identifiers |
//! | [`parser`] | Per-document markdown parsing |
//! | [`builder`] | Content-tree walk and catalog assembly |
//! | [`query`] | Lookups and substring search |
//! | [`sitemap`] | sitemap.xml / robots.txt emission |
//! | [`preview`] | Social preview cards and byte cache |
//! | [`server`] | JSON HTTP API |

pub mod builder;
pub mod config;
pub mod models;
pub mod parser;
pub mod preview;
pub mod query;
pub mod server;
pub mod sitemap;
pub mod slug;
