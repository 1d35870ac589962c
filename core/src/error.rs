//! Error types for the ride-queue API client.
//!
//! # Design
//! The dashboard only ever shows a single message string for a failed call.
//! `Rejected` carries whatever the server put in its `message` field (or the
//! generic fallback); every other variant keeps its detail for logging but
//! reports the generic fallback through [`ApiError::message`].

use thiserror::Error;

/// Message surfaced when a failure carries no usable server message.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Errors returned by `RideClient` parse methods and the async service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The rejection string a caller shows to the user.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Rejected { message, .. } => message,
            _ => UNKNOWN_ERROR,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
