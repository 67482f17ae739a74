//! Street market feature: CRUD commands, queries, and HTTP routes

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::*;
pub use queries::*;
pub use routes::{feiras_livres_routes, FeiraLivreApiError};
