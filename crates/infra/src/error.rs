//! Storage fault model.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// A failure of the backing store.
///
/// "Not found" is not a fault and is never reported through this type; see
/// [`todoapi_core::Mutation`] and `Option` returns on [`crate::ItemStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected an operation or could not be reached.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be built from the supplied configuration.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}
