//! Task management.
//!
//! Tasks are created, renamed, listed page by page and removed through
//! [`services::TaskLifecycleService`]. Names are unique ignoring case. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
