//! Storage error taxonomy.
//!
//! Errors are returned by value from every storage operation and pass through
//! the [`Storage`](crate::storage::Storage) contract unchanged. The transport
//! decides how each kind is presented on the wire.

use thiserror::Error;

/// Errors produced by storage operations.
///
/// A failed operation never leaves a partial change behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `Add` without a category
    #[error("Undefined Category")]
    UndefinedCategory,

    /// `Add` without an ID
    #[error("Undefined ID")]
    UndefinedId,

    /// Category contains the reserved separator
    #[error("Illegal Category")]
    IllegalCategory,

    /// ID contains the reserved separator
    #[error("Illegal ID")]
    IllegalId,

    /// Category or ID absent, or present but expired.
    ///
    /// One kind covers all of these so a caller cannot tell whether a
    /// category exists.
    #[error("Resource not found")]
    ResourceNotFound,

    /// The category holds no live entries
    #[error("List is empty")]
    EmptyList,

    /// There are no categories at all
    #[error("Storage is empty")]
    EmptyStorage,

    /// The underlying mapping is not usable
    #[error("Not initialised")]
    Unhealthy,
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::UndefinedCategory.to_string(), "Undefined Category");
        assert_eq!(StoreError::UndefinedId.to_string(), "Undefined ID");
        assert_eq!(StoreError::IllegalCategory.to_string(), "Illegal Category");
        assert_eq!(StoreError::IllegalId.to_string(), "Illegal ID");
        assert_eq!(StoreError::ResourceNotFound.to_string(), "Resource not found");
        assert_eq!(StoreError::EmptyList.to_string(), "List is empty");
        assert_eq!(StoreError::EmptyStorage.to_string(), "Storage is empty");
        assert_eq!(StoreError::Unhealthy.to_string(), "Not initialised");
    }
}
