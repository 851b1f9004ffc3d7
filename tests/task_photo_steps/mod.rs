//! Step definitions for task photo attachment scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
