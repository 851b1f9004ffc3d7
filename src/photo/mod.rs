//! Photo storage.
//!
//! Photos are uploaded as raw payloads with a SHA-256 checksum, stored under
//! a collision-resistant filename and associated with tasks through an index
//! owned by the [`ports::PhotoStore`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
