//! Middleware modules.

pub mod acting_user;
pub mod error;
