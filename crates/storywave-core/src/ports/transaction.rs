//! Unit-of-work port.
//!
//! Every service operation runs inside one scope obtained from a
//! [`TransactionManager`]. A scope only persists its work when
//! [`TxScope::commit`] is called; dropping it rolls back.

use async_trait::async_trait;

use super::repository::{PostRepository, UserRepository};
use crate::error::RepoError;

/// Access mode requested for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Opens transaction scopes against a backing store.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn TxScope>, RepoError>;
}

/// Repositories bound to one open transaction.
#[async_trait]
pub trait TxScope: Send + Sync {
    fn posts(&self) -> &dyn PostRepository;

    fn users(&self) -> &dyn UserRepository;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}
