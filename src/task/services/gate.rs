//! Serialisation point for task check-then-act sequences.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Async gate shared by every service that reads a task and then writes
/// based on what it read.
///
/// Cloning yields another handle to the same gate.
#[derive(Debug, Clone, Default)]
pub struct TaskWriteGate {
    inner: Arc<Mutex<()>>,
}

impl TaskWriteGate {
    /// Creates an open gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder is inside the gate.
    ///
    /// The gate stays closed until the returned guard is dropped.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
