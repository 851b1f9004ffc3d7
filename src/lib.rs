//! Taskboard: task management with attachable photos.
//!
//! This crate provides the repository and use-case layer of a task board.
//! Tasks are listed page by page and filtered by priority, photos are stored
//! on disk with a checksum, and photos are attached to tasks so that both
//! sides of the association stay consistent.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports (memory, filesystem)
//! - **Services**: Use cases orchestrating ports
//!
//! # Modules
//!
//! - [`task`]: Task creation, update, pagination and removal
//! - [`photo`]: Photo upload, verified download and deletion
//! - [`attachment`]: Attaching photos to tasks and detaching them
//! - [`app`]: Wiring the services from [`config::AppConfig`]

pub mod app;
pub mod attachment;
pub mod config;
pub mod error;
pub mod photo;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
