//! Error types for trail-core.

use crate::types::ShelterId;
use thiserror::Error;

/// Result type alias for graph engine operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures reported by a [`RecordStore`](crate::store::RecordStore).
///
/// A store that answers with zero rows returns `Ok(vec![])`; these variants
/// are only for the cases where no answer could be produced at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or queried.
    #[error("Record store unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading the catalog or building a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The record store failed; the snapshot has been left empty.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// A trail references a shelter that is not in the catalog.
    #[error(
        "Trail {shelter_id}-{other_id} (year {year}) references shelter {missing} which is not in the catalog"
    )]
    DanglingShelter {
        /// The endpoint that failed to resolve.
        missing: ShelterId,
        /// First endpoint of the offending trail.
        shelter_id: ShelterId,
        /// Second endpoint of the offending trail.
        other_id: ShelterId,
        /// Year of the offending trail.
        year: i32,
    },
}

impl GraphError {
    /// True when the failure came from the store rather than the data.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GraphError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::DanglingShelter {
            missing: 99,
            shelter_id: 1,
            other_id: 99,
            year: 2001,
        };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("2001"));
        assert!(!err.is_unavailable());

        let err: GraphError = StoreError::unavailable("connection refused").into();
        assert!(err.to_string().contains("connection refused"));
        assert!(err.is_unavailable());
    }
}
