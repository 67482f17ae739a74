use serde::{Deserialize, Serialize};

use crate::features::shared::{validate_feira_livre, FeiraLivreValidationError};
use crate::models::{FeiraLivre, FeiraLivreData, StoredFeiraLivre};
use crate::repository::SharedRepository;

/// Overwrites every field of an existing street market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFeiraLivreCommand {
    /// Taken from the URL path, never from the body
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub data: FeiraLivreData,
}

pub type UpdateFeiraLivreResponse = StoredFeiraLivre;

#[derive(Debug, thiserror::Error)]
pub enum UpdateFeiraLivreError {
    #[error("Feira livre {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Validation(#[from] FeiraLivreValidationError),
    #[error("Repository error: {0:#}")]
    Repository(anyhow::Error),
}

impl UpdateFeiraLivreCommand {
    pub fn validate(&self) -> Result<(), UpdateFeiraLivreError> {
        validate_feira_livre(&self.data)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repository, command), fields(id = command.id))]
pub async fn handle(
    repository: SharedRepository,
    command: UpdateFeiraLivreCommand,
) -> Result<UpdateFeiraLivreResponse, UpdateFeiraLivreError> {
    command.validate()?;

    let id = command.id;
    repository
        .update(&FeiraLivre::new(id, command.data))
        .await
        .map_err(UpdateFeiraLivreError::Repository)?
        .ok_or(UpdateFeiraLivreError::NotFound(id))
}
