//! Feature modules
//!
//! Each feature owns its commands, queries, and routes. `shared` holds
//! request parsing and validation used across features.

use axum::Router;

use crate::features::shared::QueryParamsParser;
use crate::repository::SharedRepository;

pub mod feiras_livres;
pub mod shared;

/// State handed to every feature router
#[derive(Clone)]
pub struct FeatureState {
    pub repository: SharedRepository,
    pub query_parser: QueryParamsParser,
}

/// All feature routes, mounted under their resource paths
pub fn router(state: FeatureState) -> Router {
    Router::new()
        .nest("/feiras-livres", feiras_livres::feiras_livres_routes())
        .with_state(state)
}
