//! Domain model for task management.
//!
//! Tasks carry a case-insensitively unique name, a priority and an ordered
//! list of attached photos. Pagination types live here because ordering and
//! slicing rules are part of how tasks are listed.

mod error;
mod ids;
mod page;
mod priority;
mod task;

pub use error::{ParsePriorityError, TaskDomainError};
pub use ids::{TaskId, TaskIdSlot, TaskName};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, PagedResult};
pub use priority::Priority;
pub use task::{Task, TaskDraft};
