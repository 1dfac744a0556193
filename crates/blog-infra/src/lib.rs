//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SeaORM repositories, an in-memory store and local media storage.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod media;

// Re-exports - In-Memory
pub use database::{InMemoryBlogStore, NewPost};
pub use media::LocalMediaStorage;

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresTagRepository};
