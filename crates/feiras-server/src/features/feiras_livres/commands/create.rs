use serde::{Deserialize, Serialize};

use crate::features::shared::{validate_feira_livre, FeiraLivreValidationError};
use crate::models::{FeiraLivreData, StoredFeiraLivre};
use crate::repository::SharedRepository;

/// Creates a street market; the id is drawn from the store's sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeiraLivreCommand {
    #[serde(flatten)]
    pub data: FeiraLivreData,
}

pub type CreateFeiraLivreResponse = StoredFeiraLivre;

#[derive(Debug, thiserror::Error)]
pub enum CreateFeiraLivreError {
    #[error(transparent)]
    Validation(#[from] FeiraLivreValidationError),
    #[error("Repository error: {0:#}")]
    Repository(anyhow::Error),
}

impl CreateFeiraLivreCommand {
    pub fn validate(&self) -> Result<(), CreateFeiraLivreError> {
        validate_feira_livre(&self.data)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repository, command), fields(name = %command.data.name))]
pub async fn handle(
    repository: SharedRepository,
    command: CreateFeiraLivreCommand,
) -> Result<CreateFeiraLivreResponse, CreateFeiraLivreError> {
    command.validate()?;

    repository
        .create(&command.data)
        .await
        .map_err(CreateFeiraLivreError::Repository)
}
