//! List query-string parsing
//!
//! Turns raw `?key=value` pairs into a [`FeiraLivreFilter`] and a clamped
//! [`Pagination`]. Parsing never fails: unknown keys are ignored and bad
//! numbers fall back to defaults.

use std::collections::HashMap;

use crate::config::PaginationConfig;
use crate::models::{FeiraLivreFilter, Pagination};

/// Typed list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub filter: FeiraLivreFilter,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryParamsParser {
    default_limit: i64,
    max_limit: i64,
}

impl QueryParamsParser {
    pub fn new(default_limit: i64, max_limit: i64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    pub fn parse(&self, params: &HashMap<String, String>) -> ListParams {
        let text = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| params.get(*key))
                .find(|value| !value.is_empty())
                .cloned()
        };
        let number = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());

        let limit = match number("limit") {
            Some(limit) if limit < 1 => self.default_limit,
            Some(limit) => limit.min(self.max_limit),
            None => self.default_limit,
        };
        let offset = number("offset").filter(|o| *o >= 0).unwrap_or(0);

        ListParams {
            filter: FeiraLivreFilter {
                district: text(&["district", "distrito"]),
                region5: text(&["region5", "regiao5"]),
                name: text(&["name", "nome_feira"]),
                neighborhood: text(&["neighborhood", "bairro"]),
            },
            pagination: Pagination::new(limit, offset),
        }
    }
}

impl From<PaginationConfig> for QueryParamsParser {
    fn from(config: PaginationConfig) -> Self {
        Self::new(config.default_limit, config.max_limit)
    }
}
