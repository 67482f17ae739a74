//! Feiras Server Library
//!
//! Registry of São Paulo street markets (feiras livres): a concurrent CSV
//! import pipeline and a REST API over the same PostgreSQL table.
//!
//! # Overview
//!
//! - **Import**: [`ingest::ImportPipeline`] streams a CSV file through a
//!   bounded channel into a fixed pool of persistence workers, then realigns
//!   the id sequence and reports totals
//! - **Store**: [`repository::FeiraLivreRepository`], implemented for
//!   PostgreSQL by [`repository::PgFeiraLivreRepository`]
//! - **API**: CRUD routes under `/feiras-livres` plus `/health`
//! - **Configuration**: environment-based, see [`config::Config`]
//!
//! # Architecture
//!
//! HTTP handlers follow a CQRS layout:
//!
//! - **Commands** (create, update, delete) change stored markets
//! - **Queries** (get, list) only read them
//!
//! Each lives in its own module under [`features`] with a request type, an
//! error enum, and an async `handle` function taking the repository.
//!
//! # Example
//!
//! ```no_run
//! use feiras_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod repository;

// Re-export commonly used types
pub use api::response::{ApiResponse, AppError};
pub use config::{Config, ConfigError};
pub use ingest::{ImportConfig, ImportPipeline, ImportSummary};
pub use models::{FeiraLivre, FeiraLivreData, StoredFeiraLivre};
pub use repository::{FeiraLivreRepository, PgFeiraLivreRepository, SharedRepository};
