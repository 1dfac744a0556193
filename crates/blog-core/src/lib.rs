//! # Blog Core
//!
//! The domain layer of the blog: entities, ports, the view-model serializer and
//! page composition. This crate has no infrastructure dependencies; storage lives
//! behind the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod pages;
pub mod ports;
pub mod serializer;

pub use error::{DomainError, RepoError};
pub use pages::BlogPages;
