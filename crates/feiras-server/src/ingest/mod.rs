//! CSV import of the street markets dataset
//!
//! # Overview
//!
//! - [`parser`]: one source row to one [`FeiraLivre`](crate::models::FeiraLivre)
//! - [`reader`]: streaming producer over a header-prefixed CSV source
//! - [`pipeline`]: the worker pool, sequence sync and run orchestration
//! - [`counters`] / [`report`]: per-run totals and the printed summary
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use feiras_server::ingest::{ImportConfig, ImportPipeline};
//! use feiras_server::repository::PgFeiraLivreRepository;
//!
//! # async fn run(pool: sqlx::PgPool) -> anyhow::Result<()> {
//! let repository = Arc::new(PgFeiraLivreRepository::new(pool));
//! let pipeline = ImportPipeline::new(repository, ImportConfig::default())?;
//! let summary = pipeline.import_file(Path::new("DEINFO_AB_FEIRASLIVRES_2014.csv")).await?;
//! print!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod counters;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod report;

pub use config::ImportConfig;
pub use counters::{ImportCounters, ImportTotals};
pub use error::{ImportError, ReadError};
pub use parser::{parse_record, Column, ParseError};
pub use pipeline::ImportPipeline;
pub use report::ImportSummary;
