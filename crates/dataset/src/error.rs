//! Error types for the dataset crate.
//!
//! A generated dataset is always consistent, so these errors only show up
//! when a hand-built `Dataset` breaks its invariants and a strategy trips
//! over the broken reference while scoring.

use thiserror::Error;

/// Errors raised when a dataset does not hold its invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records share an identifier that must be unique
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },
}

impl DatasetError {
    /// Shorthand for a rating that points at a movie the catalog doesn't have
    pub fn missing_movie(id: u32) -> Self {
        Self::MissingReference {
            entity: "Movie".to_string(),
            id,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_movie_message() {
        let err = DatasetError::missing_movie(42);
        assert_eq!(err.to_string(), "Missing reference: Movie with id 42");
    }
}
