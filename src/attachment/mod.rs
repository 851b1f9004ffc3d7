//! Attaching photos to tasks.
//!
//! A task embeds copies of its photos while the photo store indexes which
//! tasks reference each photo. [`services::PhotoAttachmentService`] is the
//! only writer of both sides.

pub mod services;

#[cfg(test)]
mod tests;
