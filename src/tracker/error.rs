//! Error types for order tracking.

use crate::api::ApiError;
use thiserror::Error;

/// Every way an order load can fail, folded into one user-facing condition.
///
/// The API error is kept as the source for logs; the message never varies.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Failed to load order.")]
    LoadFailed {
        #[source]
        source: ApiError,
    },
}

impl From<ApiError> for TrackError {
    fn from(source: ApiError) -> Self {
        TrackError::LoadFailed { source }
    }
}
