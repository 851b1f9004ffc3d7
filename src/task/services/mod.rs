//! Application services for task orchestration.

mod gate;
mod lifecycle;

pub use gate::TaskWriteGate;
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
