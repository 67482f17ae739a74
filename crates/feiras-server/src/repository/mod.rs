//! Street market persistence
//!
//! [`FeiraLivreRepository`] is the store contract shared by the import
//! pipeline and the HTTP features. [`PgFeiraLivreRepository`] is the
//! PostgreSQL implementation used by the binary.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{FeiraLivre, FeiraLivreData, FeiraLivreFilter, Pagination, StoredFeiraLivre};

pub mod postgres;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgFeiraLivreRepository;

/// Repository handle shared by handlers and import workers
pub type SharedRepository = Arc<dyn FeiraLivreRepository>;

/// Store of street markets keyed by their dataset id
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait FeiraLivreRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<StoredFeiraLivre>>;

    /// Records matching `filter`, ordered by id, within `pagination`
    async fn list(
        &self,
        filter: &FeiraLivreFilter,
        pagination: Pagination,
    ) -> Result<Vec<StoredFeiraLivre>>;

    /// Inserts with an id drawn from the store's sequence
    async fn create(&self, data: &FeiraLivreData) -> Result<StoredFeiraLivre>;

    /// Inserts `feira` under its own id, or overwrites every field of the
    /// existing row and refreshes `updated_at`; `created_at` is kept
    async fn create_or_update(&self, feira: &FeiraLivre) -> Result<StoredFeiraLivre>;

    /// Overwrites an existing row, `None` when `feira.id` is unknown
    async fn update(&self, feira: &FeiraLivre) -> Result<Option<StoredFeiraLivre>>;

    /// Deletes a row, `false` when `id` is unknown
    async fn remove(&self, id: i64) -> Result<bool>;

    /// Moves the id sequence so the next generated id is `max(id) + 1`
    /// (1 on an empty store) and returns that id
    async fn sync_sequence(&self) -> Result<i64>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<()>;
}
