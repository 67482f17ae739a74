//! Shared validation utilities for street market payloads

use thiserror::Error;

use crate::models::FeiraLivreData;

/// Longest text accepted in any street market field.
pub const MAX_TEXT_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeiraLivreValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be at most {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Validates a create or update payload
///
/// Only the name and registry are mandatory; the other text columns may be
/// blank, as they are in the source dataset.
pub fn validate_feira_livre(data: &FeiraLivreData) -> Result<(), FeiraLivreValidationError> {
    for (field, value) in [("longitude", data.longitude), ("latitude", data.latitude)] {
        if !value.is_finite() {
            return Err(FeiraLivreValidationError::NotFinite { field });
        }
    }

    for (field, value) in [("name", &data.name), ("registry", &data.registry)] {
        if value.trim().is_empty() {
            return Err(FeiraLivreValidationError::Required { field });
        }
    }

    let texts = [
        ("district", &data.district),
        ("subprefecture", &data.subprefecture),
        ("region5", &data.region5),
        ("region8", &data.region8),
        ("name", &data.name),
        ("registry", &data.registry),
        ("street", &data.street),
        ("number", &data.number),
        ("neighborhood", &data.neighborhood),
        ("reference", &data.reference),
    ];
    for (field, value) in texts {
        if value.chars().count() > MAX_TEXT_LENGTH {
            return Err(FeiraLivreValidationError::TooLong {
                field,
                max_length: MAX_TEXT_LENGTH,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn test_valid_payload() {
        assert!(validate_feira_livre(&fixtures::vila_formosa().data).is_ok());
    }

    #[test]
    fn test_blank_name_and_registry() {
        let mut data = fixtures::vila_formosa().data;
        data.name = "   ".to_string();
        assert_eq!(
            validate_feira_livre(&data),
            Err(FeiraLivreValidationError::Required { field: "name" })
        );

        let mut data = fixtures::vila_formosa().data;
        data.registry.clear();
        assert_eq!(
            validate_feira_livre(&data),
            Err(FeiraLivreValidationError::Required { field: "registry" })
        );
    }

    #[test]
    fn test_blank_optional_text_is_accepted() {
        let mut data = fixtures::vila_formosa().data;
        data.reference.clear();
        data.number.clear();
        assert!(validate_feira_livre(&data).is_ok());
    }

    #[test]
    fn test_too_long_text() {
        let mut data = fixtures::vila_formosa().data;
        data.street = "R".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            validate_feira_livre(&data),
            Err(FeiraLivreValidationError::TooLong { field: "street", .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinates() {
        let mut data = fixtures::vila_formosa().data;
        data.latitude = f64::NAN;
        assert_eq!(
            validate_feira_livre(&data),
            Err(FeiraLivreValidationError::NotFinite { field: "latitude" })
        );
    }
}
