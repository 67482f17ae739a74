//! Source row to [`FeiraLivre`] conversion
//!
//! Numeric columns are parsed in column order and the first failure rejects
//! the whole row. Text columns are copied verbatim, without trimming.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{FeiraLivre, FeiraLivreData, COLUMN_COUNT};

/// Typed source columns, named after their CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Longitude,
    Latitude,
    CensusSector,
    WeightingArea,
    DistrictCode,
    SubprefectureCode,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Longitude => "LONG",
            Column::Latitude => "LAT",
            Column::CensusSector => "SETCENS",
            Column::WeightingArea => "AREAP",
            Column::DistrictCode => "CODDIST",
            Column::SubprefectureCode => "CODSUBPREF",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Column::Id => 0,
            Column::Longitude => 1,
            Column::Latitude => 2,
            Column::CensusSector => 3,
            Column::WeightingArea => 4,
            Column::DistrictCode => 5,
            Column::SubprefectureCode => 7,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Why a row could not become a record
///
/// Carries no cell content, so raw input never leaks into logs or reports.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least {expected} columns, found {found}")]
    InsufficientColumns { expected: usize, found: usize },

    #[error("invalid {field} column: {reason}")]
    InvalidField { field: Column, reason: String },
}

impl ParseError {
    fn invalid(field: Column, reason: impl fmt::Display) -> Self {
        ParseError::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Parses one data row into a record
///
/// Extra columns past the 17th are ignored.
pub fn parse_record<S: AsRef<str>>(fields: &[S]) -> Result<FeiraLivre, ParseError> {
    if fields.len() < COLUMN_COUNT {
        return Err(ParseError::InsufficientColumns {
            expected: COLUMN_COUNT,
            found: fields.len(),
        });
    }

    let text = |i: usize| fields[i].as_ref().to_string();

    let id: i64 = parse_column(fields, Column::Id)?;
    if id <= 0 {
        return Err(ParseError::invalid(Column::Id, "must be a positive integer"));
    }
    let longitude = parse_column(fields, Column::Longitude)?;
    let latitude = parse_column(fields, Column::Latitude)?;
    let census_sector = parse_column(fields, Column::CensusSector)?;
    let weighting_area = parse_column(fields, Column::WeightingArea)?;
    let district_code = parse_column(fields, Column::DistrictCode)?;
    let subprefecture_code = parse_column(fields, Column::SubprefectureCode)?;

    Ok(FeiraLivre::new(
        id,
        FeiraLivreData {
            longitude,
            latitude,
            census_sector,
            weighting_area,
            district_code,
            district: text(6),
            subprefecture_code,
            subprefecture: text(8),
            region5: text(9),
            region8: text(10),
            name: text(11),
            registry: text(12),
            street: text(13),
            number: text(14),
            neighborhood: text(15),
            reference: text(16),
        },
    ))
}

fn parse_column<S, T>(fields: &[S], column: Column) -> Result<T, ParseError>
where
    S: AsRef<str>,
    T: FromStr,
    T::Err: fmt::Display,
{
    fields[column.index()]
        .as_ref()
        .parse()
        .map_err(|e| ParseError::invalid(column, e))
}
