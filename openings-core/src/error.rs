use crate::Error;

/// The error taxonomy surfaced by the catalog core.
///
/// Every component raises at its own boundary and nothing inside the core
/// recovers another component's error. Callers (typically an HTTP layer)
/// downcast the propagated [`anyhow::Error`] back to this enum to map it to
/// a transport status.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The caller supplied input outside the accepted domain: an empty
    /// sparse update, inverted numeric bounds, an unknown mutable field, a
    /// filter value that does not parse.
    #[error("{0}")]
    Validation(String),
    /// A row referenced by primary key is absent, or a filter branch that
    /// treats zero matches as a failure matched nothing.
    #[error("{0}")]
    NotFound(String),
    /// An authorization gate rejected the request identity.
    #[error("unauthorized")]
    Unauthorized,
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Error {
        Self::Validation(message.into()).into()
    }

    pub fn not_found(message: impl Into<String>) -> Error {
        Self::NotFound(message.into()).into()
    }
}
