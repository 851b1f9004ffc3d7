//! Port contracts for photo storage.

mod store;

#[cfg(test)]
pub(crate) use store::MockPhotoStore;
pub use store::{PhotoStore, PhotoStoreError, PhotoStoreResult};
