//! Adapter implementations of the photo ports.

pub mod filesystem;
