//! Shared utilities and types for feature modules
//!
//! - **query_params**: list query-string parsing with pagination clamping
//! - **validation**: payload validation for create and update commands

pub mod query_params;
pub mod validation;

pub use query_params::{ListParams, QueryParamsParser};
pub use validation::{validate_feira_livre, FeiraLivreValidationError};
