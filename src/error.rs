//! Transport-facing failure taxonomy.
//!
//! Each layer keeps its own `thiserror` enum; this module only classifies
//! those errors so a transport can pick a response without matching on every
//! variant of every layer.

use std::fmt;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The referenced entity has no matching record.
    NotFound,
    /// The operation would violate a uniqueness rule.
    Conflict,
    /// The caller supplied malformed or out-of-range input.
    InvalidInput,
    /// Underlying storage failed while reading or writing.
    StorageFailure,
}

impl FailureKind {
    /// Returns the canonical snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InvalidInput => "invalid_input",
            Self::StorageFailure => "storage_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
