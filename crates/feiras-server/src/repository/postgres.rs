//! PostgreSQL-backed [`FeiraLivreRepository`]

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::FeiraLivreRepository;
use crate::models::{FeiraLivre, FeiraLivreData, FeiraLivreFilter, Pagination, StoredFeiraLivre};

const RETURNING: &str = "id, longitude, latitude, census_sector, weighting_area, district_code, \
     district, subprefecture_code, subprefecture, region5, region8, name, registry, street, \
     number, neighborhood, reference, created_at, updated_at";

type StoredQuery<'q> = QueryAs<'q, Postgres, StoredFeiraLivre, PgArguments>;

#[derive(Debug, Clone)]
pub struct PgFeiraLivreRepository {
    pool: PgPool,
}

impl PgFeiraLivreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Binds the sixteen data columns in table order
fn bind_data<'q>(query: StoredQuery<'q>, data: &'q FeiraLivreData) -> StoredQuery<'q> {
    query
        .bind(data.longitude)
        .bind(data.latitude)
        .bind(data.census_sector)
        .bind(data.weighting_area)
        .bind(data.district_code)
        .bind(data.district.as_str())
        .bind(data.subprefecture_code)
        .bind(data.subprefecture.as_str())
        .bind(data.region5.as_str())
        .bind(data.region8.as_str())
        .bind(data.name.as_str())
        .bind(data.registry.as_str())
        .bind(data.street.as_str())
        .bind(data.number.as_str())
        .bind(data.neighborhood.as_str())
        .bind(data.reference.as_str())
}

/// Escapes LIKE wildcards so filters match literally
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn list_query(filter: &FeiraLivreFilter, pagination: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {RETURNING} FROM feiras_livres WHERE TRUE"));

    let filters = [
        ("district", &filter.district),
        ("region5", &filter.region5),
        ("name", &filter.name),
        ("neighborhood", &filter.neighborhood),
    ];
    for (column, value) in filters {
        if let Some(value) = value {
            builder
                .push(" AND ")
                .push(column)
                .push(" ILIKE ")
                .push_bind(like_pattern(value));
        }
    }

    builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset);
    builder
}

#[async_trait]
impl FeiraLivreRepository for PgFeiraLivreRepository {
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<StoredFeiraLivre>> {
        sqlx::query_as::<_, StoredFeiraLivre>(&format!(
            "SELECT {RETURNING} FROM feiras_livres WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to fetch feira livre {id}"))
    }

    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        filter: &FeiraLivreFilter,
        pagination: Pagination,
    ) -> Result<Vec<StoredFeiraLivre>> {
        list_query(filter, pagination)
            .build_query_as::<StoredFeiraLivre>()
            .fetch_all(&self.pool)
            .await
            .context("failed to list feiras livres")
    }

    #[tracing::instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: &FeiraLivreData) -> Result<StoredFeiraLivre> {
        let sql = format!(
            "INSERT INTO feiras_livres (longitude, latitude, census_sector, weighting_area, \
             district_code, district, subprefecture_code, subprefecture, region5, region8, name, \
             registry, street, number, neighborhood, reference) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {RETURNING}"
        );
        bind_data(sqlx::query_as(&sql), data)
            .fetch_one(&self.pool)
            .await
            .context("failed to create feira livre")
    }

    #[tracing::instrument(skip(self, feira), fields(id = feira.id))]
    async fn create_or_update(&self, feira: &FeiraLivre) -> Result<StoredFeiraLivre> {
        let sql = format!(
            "INSERT INTO feiras_livres (longitude, latitude, census_sector, weighting_area, \
             district_code, district, subprefecture_code, subprefecture, region5, region8, name, \
             registry, street, number, neighborhood, reference, id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             ON CONFLICT (id) DO UPDATE SET \
             longitude = EXCLUDED.longitude, latitude = EXCLUDED.latitude, \
             census_sector = EXCLUDED.census_sector, weighting_area = EXCLUDED.weighting_area, \
             district_code = EXCLUDED.district_code, district = EXCLUDED.district, \
             subprefecture_code = EXCLUDED.subprefecture_code, \
             subprefecture = EXCLUDED.subprefecture, region5 = EXCLUDED.region5, \
             region8 = EXCLUDED.region8, name = EXCLUDED.name, registry = EXCLUDED.registry, \
             street = EXCLUDED.street, number = EXCLUDED.number, \
             neighborhood = EXCLUDED.neighborhood, reference = EXCLUDED.reference, \
             updated_at = NOW() \
             RETURNING {RETURNING}"
        );
        bind_data(sqlx::query_as(&sql), &feira.data)
            .bind(feira.id)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to upsert feira livre {}", feira.id))
    }

    #[tracing::instrument(skip(self, feira), fields(id = feira.id))]
    async fn update(&self, feira: &FeiraLivre) -> Result<Option<StoredFeiraLivre>> {
        let sql = format!(
            "UPDATE feiras_livres SET longitude = $1, latitude = $2, census_sector = $3, \
             weighting_area = $4, district_code = $5, district = $6, subprefecture_code = $7, \
             subprefecture = $8, region5 = $9, region8 = $10, name = $11, registry = $12, \
             street = $13, number = $14, neighborhood = $15, reference = $16, updated_at = NOW() \
             WHERE id = $17 \
             RETURNING {RETURNING}"
        );
        bind_data(sqlx::query_as(&sql), &feira.data)
            .bind(feira.id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to update feira livre {}", feira.id))
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feiras_livres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete feira livre {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn sync_sequence(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT setval(pg_get_serial_sequence('feiras_livres', 'id'), \
             COALESCE(MAX(id), 0) + 1, false) FROM feiras_livres",
        )
        .fetch_one(&self.pool)
        .await
        .context("failed to sync feiras_livres id sequence")
    }

    async fn ping(&self) -> Result<()> {
        crate::db::health_check(&self.pool).await?;
        Ok(())
    }
}
