//! Application services - orchestrate ports inside transaction scopes.

mod post_service;

pub use post_service::PostService;
