use serde::{Deserialize, Serialize};

use crate::repository::SharedRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFeiraLivreCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFeiraLivreResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteFeiraLivreError {
    #[error("Feira livre {0} not found")]
    NotFound(i64),
    #[error("Repository error: {0:#}")]
    Repository(anyhow::Error),
}

#[tracing::instrument(skip(repository))]
pub async fn handle(
    repository: SharedRepository,
    command: DeleteFeiraLivreCommand,
) -> Result<DeleteFeiraLivreResponse, DeleteFeiraLivreError> {
    let deleted = repository
        .remove(command.id)
        .await
        .map_err(DeleteFeiraLivreError::Repository)?;

    if !deleted {
        return Err(DeleteFeiraLivreError::NotFound(command.id));
    }

    Ok(DeleteFeiraLivreResponse {
        id: command.id,
        deleted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::repository::memory::InMemoryRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_handle_deletes() {
        let repo = Arc::new(InMemoryRepository::new().with_rows([fixtures::with_id(3)]));
        let response = handle(repo.clone(), DeleteFeiraLivreCommand { id: 3 })
            .await
            .unwrap();

        assert_eq!(response.id, 3);
        assert!(response.deleted);
        assert!(repo.row(3).is_none());
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let repo = Arc::new(InMemoryRepository::new());
        let result = handle(repo, DeleteFeiraLivreCommand { id: 3 }).await;
        assert!(matches!(result, Err(DeleteFeiraLivreError::NotFound(3))));
    }
}
