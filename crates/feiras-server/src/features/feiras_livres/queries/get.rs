use serde::{Deserialize, Serialize};

use crate::models::StoredFeiraLivre;
use crate::repository::SharedRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFeiraLivreQuery {
    pub id: i64,
}

pub type GetFeiraLivreResponse = StoredFeiraLivre;

#[derive(Debug, thiserror::Error)]
pub enum GetFeiraLivreError {
    #[error("Feira livre {0} not found")]
    NotFound(i64),
    #[error("Repository error: {0:#}")]
    Repository(anyhow::Error),
}

#[tracing::instrument(skip(repository))]
pub async fn handle(
    repository: SharedRepository,
    query: GetFeiraLivreQuery,
) -> Result<GetFeiraLivreResponse, GetFeiraLivreError> {
    repository
        .get_by_id(query.id)
        .await
        .map_err(GetFeiraLivreError::Repository)?
        .ok_or(GetFeiraLivreError::NotFound(query.id))
}
