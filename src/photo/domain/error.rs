//! Error types for photo domain validation.

use crate::error::FailureKind;
use thiserror::Error;

/// Errors returned while constructing domain photo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoDomainError {
    /// The photo identifier is empty after trimming.
    #[error("photo identifier must not be empty")]
    EmptyPhotoId,

    /// The uploaded file name is empty after trimming.
    #[error("original file name must not be empty")]
    EmptyOriginalName,

    /// The content type is not of the form `type/subtype`.
    #[error("invalid content type '{0}', expected 'type/subtype'")]
    InvalidContentType(String),
}

impl PhotoDomainError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        FailureKind::InvalidInput
    }
}
