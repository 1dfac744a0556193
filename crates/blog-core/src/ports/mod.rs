//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod media;
mod repository;

pub use media::MediaStorage;
pub use repository::{PostRepository, TagRepository};
