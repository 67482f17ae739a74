//! Feiras Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging and error handling for the feiras workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the [`FeirasError`] type and its [`Result`] alias
//! - **Logging**: [`logging::LogConfig`] and [`logging::init_logging`]
//! - **Types**: the runtime [`Environment`](types::Environment)
//!
//! # Example
//!
//! ```no_run
//! use feiras_common::logging::{init_logging, LogConfig};
//! use feiras_common::types::Environment;
//!
//! fn main() -> anyhow::Result<()> {
//!     let environment: Environment = "production".parse()?;
//!     init_logging(&LogConfig::for_environment(environment))?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

pub use error::{FeirasError, Result};
