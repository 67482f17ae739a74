//! Street market API routes
//!
//! - `GET /feiras-livres` - List with filters and pagination
//! - `GET /feiras-livres/:id` - Get a single street market
//! - `POST /feiras-livres` - Create a street market
//! - `PUT /feiras-livres/:id` - Overwrite a street market
//! - `DELETE /feiras-livres/:id` - Delete a street market

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::{
    commands::{
        CreateFeiraLivreCommand, CreateFeiraLivreError, DeleteFeiraLivreCommand,
        DeleteFeiraLivreError, UpdateFeiraLivreCommand, UpdateFeiraLivreError,
    },
    queries::{GetFeiraLivreError, GetFeiraLivreQuery, ListFeirasLivresError, ListFeirasLivresQuery},
};
use crate::api::response::{ApiResponse, AppError};
use crate::features::FeatureState;

// ============================================================================
// Router Configuration
// ============================================================================

pub fn feiras_livres_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_feiras_livres).post(create_feira_livre))
        .route(
            "/:id",
            get(get_feira_livre)
                .put(update_feira_livre)
                .delete(delete_feira_livre),
        )
}

fn parse_id(raw: &str) -> Result<i64, FeiraLivreApiError> {
    raw.parse()
        .map_err(|_| FeiraLivreApiError::InvalidId(raw.to_string()))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `201 Created`, `400` for a malformed body, `422` for an invalid payload
#[tracing::instrument(skip(state, body))]
async fn create_feira_livre(
    State(state): State<FeatureState>,
    body: Result<Json<CreateFeiraLivreCommand>, JsonRejection>,
) -> Result<Response, FeiraLivreApiError> {
    let Json(command) = body?;
    let created = super::commands::create::handle(state.repository, command).await?;

    tracing::info!(id = created.id(), "Feira livre created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))).into_response())
}

/// `200 OK`, `400` for a bad id or body, `404`, `422`
#[tracing::instrument(skip(state, body))]
async fn update_feira_livre(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateFeiraLivreCommand>, JsonRejection>,
) -> Result<Response, FeiraLivreApiError> {
    let id = parse_id(&id)?;
    let Json(mut command) = body?;
    command.id = id;

    let updated = super::commands::update::handle(state.repository, command).await?;

    tracing::info!(id, "Feira livre updated via API");

    Ok(ApiResponse::success(updated).into_response())
}

/// `204 No Content`, `400` for a bad id, `404`
#[tracing::instrument(skip(state))]
async fn delete_feira_livre(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
) -> Result<Response, FeiraLivreApiError> {
    let id = parse_id(&id)?;
    super::commands::delete::handle(state.repository, DeleteFeiraLivreCommand { id }).await?;

    tracing::info!(id, "Feira livre deleted via API");

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `200 OK` with `meta.limit` / `meta.offset`
#[tracing::instrument(skip(state))]
async fn list_feiras_livres(
    State(state): State<FeatureState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, FeiraLivreApiError> {
    let params = state.query_parser.parse(&params);
    let query = ListFeirasLivresQuery {
        filter: params.filter,
        pagination: params.pagination,
    };

    let response = super::queries::list::handle(state.repository, query).await?;
    let meta = json!({
        "limit": response.pagination.limit,
        "offset": response.pagination.offset,
        "count": response.items.len(),
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

/// `200 OK`, `400` for a bad id, `404`
#[tracing::instrument(skip(state))]
async fn get_feira_livre(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
) -> Result<Response, FeiraLivreApiError> {
    let id = parse_id(&id)?;
    let found = super::queries::get::handle(state.repository, GetFeiraLivreQuery { id }).await?;
    Ok(ApiResponse::success(found).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FeiraLivreApiError {
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error("invalid body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Create(#[from] CreateFeiraLivreError),
    #[error(transparent)]
    Update(#[from] UpdateFeiraLivreError),
    #[error(transparent)]
    Delete(#[from] DeleteFeiraLivreError),
    #[error(transparent)]
    Get(#[from] GetFeiraLivreError),
    #[error(transparent)]
    List(#[from] ListFeirasLivresError),
}

impl From<FeiraLivreApiError> for AppError {
    fn from(err: FeiraLivreApiError) -> Self {
        use FeiraLivreApiError as E;

        match err {
            E::InvalidId(_) => AppError::BadRequest(err.to_string()),
            E::InvalidBody(rejection) => AppError::BadRequest(format!(
                "invalid body: {}",
                rejection.body_text()
            )),

            E::Create(CreateFeiraLivreError::Validation(e))
            | E::Update(UpdateFeiraLivreError::Validation(e)) => {
                AppError::ValidationError(e.to_string())
            },

            E::Update(UpdateFeiraLivreError::NotFound(_))
            | E::Delete(DeleteFeiraLivreError::NotFound(_))
            | E::Get(GetFeiraLivreError::NotFound(_)) => AppError::NotFound(err.to_string()),

            E::Create(CreateFeiraLivreError::Repository(e))
            | E::Update(UpdateFeiraLivreError::Repository(e))
            | E::Delete(DeleteFeiraLivreError::Repository(e))
            | E::Get(GetFeiraLivreError::Repository(e))
            | E::List(ListFeirasLivresError::Repository(e)) => AppError::Internal(e),
        }
    }
}

impl IntoResponse for FeiraLivreApiError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
