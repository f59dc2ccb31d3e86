//! # Storywave Shared
//!
//! Wire types shared between the HTTP layer and any Rust client.

pub mod dto;
pub mod response;

pub use dto::{PageResponse, PostDto};
pub use response::ErrorResponse;
