//! Unit tests for the photo module.
