//! Domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of columns in a source row, in CSV order
pub const COLUMN_COUNT: usize = 17;

/// Attributes of a street market, everything except its identifier
///
/// This is the body accepted by the create and update endpoints; the id
/// comes from the store or the URL path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeiraLivreData {
    pub longitude: f64,
    pub latitude: f64,
    pub census_sector: i64,
    pub weighting_area: i64,
    pub district_code: i64,
    pub district: String,
    pub subprefecture_code: i64,
    pub subprefecture: String,
    pub region5: String,
    pub region8: String,
    pub name: String,
    pub registry: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub reference: String,
}

/// A street market ("feira livre") as identified by the source dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeiraLivre {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: FeiraLivreData,
}

impl FeiraLivre {
    pub fn new(id: i64, data: FeiraLivreData) -> Self {
        Self { id, data }
    }

    /// Column values in CSV order, the inverse of
    /// [`parse_record`](crate::ingest::parser::parse_record)
    pub fn to_fields(&self) -> [String; COLUMN_COUNT] {
        let d = &self.data;
        [
            self.id.to_string(),
            d.longitude.to_string(),
            d.latitude.to_string(),
            d.census_sector.to_string(),
            d.weighting_area.to_string(),
            d.district_code.to_string(),
            d.district.clone(),
            d.subprefecture_code.to_string(),
            d.subprefecture.clone(),
            d.region5.clone(),
            d.region8.clone(),
            d.name.clone(),
            d.registry.clone(),
            d.street.clone(),
            d.number.clone(),
            d.neighborhood.clone(),
            d.reference.clone(),
        ]
    }
}

/// A street market as persisted, with bookkeeping timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredFeiraLivre {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub feira: FeiraLivre,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredFeiraLivre {
    pub fn id(&self) -> i64 {
        self.feira.id
    }
}

/// Case-insensitive substring filters for listing street markets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeiraLivreFilter {
    pub district: Option<String>,
    pub region5: Option<String>,
    pub name: Option<String>,
    pub neighborhood: Option<String>,
}

impl FeiraLivreFilter {
    pub fn is_empty(&self) -> bool {
        self.district.is_none()
            && self.region5.is_none()
            && self.name.is_none()
            && self.neighborhood.is_none()
    }

    /// Whether `data` satisfies every present filter
    pub fn matches(&self, data: &FeiraLivreData) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_deref()
                .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
        }

        contains(&data.district, &self.district)
            && contains(&data.region5, &self.region5)
            && contains(&data.name, &self.name)
            && contains(&data.neighborhood, &self.neighborhood)
    }
}

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}
