//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod transaction;

pub use repository::{BaseRepository, PostRepository, UserRepository};
pub use transaction::{TransactionManager, TxMode, TxScope};
