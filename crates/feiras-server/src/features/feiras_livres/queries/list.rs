use serde::{Deserialize, Serialize};

use crate::models::{FeiraLivreFilter, Pagination, StoredFeiraLivre};
use crate::repository::SharedRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFeirasLivresQuery {
    pub filter: FeiraLivreFilter,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFeirasLivresResponse {
    pub items: Vec<StoredFeiraLivre>,
    pub pagination: Pagination,
}

#[derive(Debug, thiserror::Error)]
pub enum ListFeirasLivresError {
    #[error("Repository error: {0:#}")]
    Repository(anyhow::Error),
}

#[tracing::instrument(skip(repository))]
pub async fn handle(
    repository: SharedRepository,
    query: ListFeirasLivresQuery,
) -> Result<ListFeirasLivresResponse, ListFeirasLivresError> {
    let items = repository
        .list(&query.filter, query.pagination)
        .await
        .map_err(ListFeirasLivresError::Repository)?;

    Ok(ListFeirasLivresResponse {
        items,
        pagination: query.pagination,
    })
}
