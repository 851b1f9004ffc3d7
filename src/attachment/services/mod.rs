//! Application services spanning tasks and photos.

mod attachment;

pub use attachment::{PhotoAttachmentError, PhotoAttachmentResult, PhotoAttachmentService};
