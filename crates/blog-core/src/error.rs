//! Domain-level error types.

use thiserror::Error;

/// Domain errors - page-level failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    /// A loader skipped an annotation the serializer relies on.
    #[error("Missing annotation: {0}")]
    MissingAnnotation(&'static str),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: key.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// A required related row (author, tag) was absent from a batch result.
    #[error("Missing related {entity_type} with id {id}")]
    MissingRelation { entity_type: &'static str, id: i32 },

    /// A unique key (slug, title, username) is already taken.
    #[error("Duplicate {entity_type}: {key}")]
    Duplicate {
        entity_type: &'static str,
        key: String,
    },
}
