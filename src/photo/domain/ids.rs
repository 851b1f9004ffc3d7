//! Identifier and validated scalar types for the photo domain.

use super::PhotoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Longest sanitised original name kept inside a stored filename.
const MAX_FILENAME_STEM_CHARS: usize = 100;

/// Replacement used when nothing of the original name survives sanitising.
const FALLBACK_FILENAME: &str = "upload";

/// Unique identifier for a stored photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    /// Creates a validated photo identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoDomainError::EmptyPhotoId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PhotoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhotoDomainError::EmptyPhotoId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a new random photo identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PhotoId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name supplied by the uploader, kept for download disposition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginalName(String);

impl OriginalName {
    /// Creates a validated original name.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoDomainError::EmptyOriginalName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PhotoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhotoDomainError::EmptyOriginalName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OriginalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// MIME type of a photo payload, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
    /// Creates a validated content type such as `image/jpeg`.
    ///
    /// Parameters after `;` are kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoDomainError::InvalidContentType`] unless the value has
    /// a non-empty type and subtype separated by `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, PhotoDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let essence = normalized
            .split(';')
            .next()
            .map(str::trim)
            .unwrap_or_default();
        let valid = essence.split_once('/').is_some_and(|(kind, subtype)| {
            is_mime_token(kind) && is_mime_token(subtype)
        });
        if !valid {
            return Err(PhotoDomainError::InvalidContentType(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the content type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_mime_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c))
}

/// Name of the payload file inside the upload directory.
///
/// Generated as `<uuid>_<sanitised original name>`, so two uploads with the
/// same original name never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredFilename(String);

impl StoredFilename {
    /// Generates a fresh collision-resistant filename for `original`.
    #[must_use]
    pub fn generate(original: &OriginalName) -> Self {
        Self(format!("{}_{}", Uuid::new_v4(), sanitise(original.as_str())))
    }

    /// Returns the filename as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoredFilename {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StoredFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps the last path component and maps anything outside
/// `[A-Za-z0-9._-]` to `_`.
fn sanitise(original: &str) -> String {
    let last_component = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim_start_matches('.');
    let cleaned: String = last_component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_STEM_CHARS)
        .collect();
    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_owned()
    } else {
        cleaned
    }
}
