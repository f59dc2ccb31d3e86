//! # Storywave Core
//!
//! The domain layer of Storywave.
//! This crate contains the post/user model, the storage ports, and the
//! post service that enforces ownership rules on top of them. It has no
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
