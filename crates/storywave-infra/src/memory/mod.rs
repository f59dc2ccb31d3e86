//! In-memory store - used by tests and when no database is configured.
//!
//! A read-write scope holds the store's write lock until it is dropped, so
//! writers are serialized. It keeps a copy of the state taken at open and
//! puts it back when dropped without a commit. Read-only scopes work on a
//! snapshot and never block each other.
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, HashMap};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};

use storywave_core::domain::{Page, PageRequest, Post, User};
use storywave_core::error::RepoError;
use storywave_core::ports::{
    BaseRepository, PostRepository, TransactionManager, TxMode, TxScope, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<String, User>,
    posts: BTreeMap<i64, Post>,
    last_post_id: i64,
}

/// Post and user store backed by process memory.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user outside of any transaction.
    pub async fn put_user(&self, user: User) {
        let mut state = self.state.write().await;
        state.users.insert(user.id.clone(), user);
    }

    pub async fn post_count(&self) -> usize {
        self.state.read().await.posts.len()
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn TxScope>, RepoError> {
        tracing::trace!(?mode, "Opening in-memory transaction");

        let scope = match mode {
            TxMode::ReadOnly => InMemoryTx {
                view: Mutex::new(View::Snapshot(self.state.read().await.clone())),
                undo: None,
                mode,
            },
            TxMode::ReadWrite => {
                let guard = Arc::clone(&self.state).write_owned().await;
                let undo = guard.clone();
                InMemoryTx {
                    view: Mutex::new(View::Exclusive(guard)),
                    undo: Some(undo),
                    mode,
                }
            }
        };

        Ok(Box::new(scope))
    }
}

/// The data a scope reads and writes.
enum View {
    Snapshot(MemoryState),
    Exclusive(OwnedRwLockWriteGuard<MemoryState>),
}

impl Deref for View {
    type Target = MemoryState;

    fn deref(&self) -> &MemoryState {
        match self {
            View::Snapshot(state) => state,
            View::Exclusive(guard) => guard,
        }
    }
}

impl DerefMut for View {
    fn deref_mut(&mut self) -> &mut MemoryState {
        match self {
            View::Snapshot(state) => state,
            View::Exclusive(guard) => guard,
        }
    }
}

struct InMemoryTx {
    view: Mutex<View>,
    /// State as it was when the scope opened; `None` once committed.
    undo: Option<MemoryState>,
    mode: TxMode,
}

impl InMemoryTx {
    fn ensure_writable(&self) -> Result<(), RepoError> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(RepoError::Query(
                "cannot execute write in a read-only transaction".to_string(),
            )),
        }
    }
}

impl Drop for InMemoryTx {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            tracing::trace!("Rolling back in-memory transaction");
            **self.view.get_mut() = undo;
        }
    }
}

fn title_matches(title: &str, keyword: &str) -> bool {
    title.to_lowercase().contains(&keyword.to_lowercase())
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryTx {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.view.lock().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut entity: Post) -> Result<Post, RepoError> {
        self.ensure_writable()?;
        let mut state = self.view.lock().await;

        if !state.users.contains_key(&entity.user_id) {
            return Err(RepoError::Constraint(format!(
                "posts.user_id references unknown user {}",
                entity.user_id
            )));
        }

        let id = match entity.id {
            Some(id) if state.posts.contains_key(&id) => id,
            Some(_) => return Err(RepoError::NotFound),
            None => {
                state.last_post_id += 1;
                state.last_post_id
            }
        };
        entity.id = Some(id);
        state.posts.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.ensure_writable()?;
        self.view
            .lock()
            .await
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryTx {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.view.lock().await.posts.values().cloned().collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let state = self.view.lock().await;
        let items = state
            .posts
            .values()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(items, request, state.posts.len() as u64))
    }

    async fn find_by_title_containing(&self, keyword: &str) -> Result<Vec<Post>, RepoError> {
        let state = self.view.lock().await;
        Ok(state
            .posts
            .values()
            .filter(|p| title_matches(&p.title, keyword))
            .cloned()
            .collect())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Post>, RepoError> {
        let state = self.view.lock().await;
        Ok(state
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<User, String> for InMemoryTx {
    async fn find_by_id(&self, id: String) -> Result<Option<User>, RepoError> {
        Ok(self.view.lock().await.users.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        self.ensure_writable()?;
        let mut state = self.view.lock().await;

        let email_taken = state
            .users
            .values()
            .any(|u| u.email == entity.email && u.id != entity.id);
        if email_taken {
            return Err(RepoError::Constraint("users.email must be unique".to_string()));
        }

        state.users.insert(entity.id.clone(), entity.clone());
        Ok(entity)
    }

    /// Removes the user's posts along with it.
    async fn delete(&self, id: String) -> Result<(), RepoError> {
        self.ensure_writable()?;
        let mut state = self.view.lock().await;

        state.users.remove(&id).ok_or(RepoError::NotFound)?;
        state.posts.retain(|_, p| p.user_id != id);
        Ok(())
    }
}

impl UserRepository for InMemoryTx {}

#[async_trait]
impl TxScope for InMemoryTx {
    fn posts(&self) -> &dyn PostRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let mut this = self;
        this.undo = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_alice() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .put_user(User::new("alice", "Alice", "alice@example.com"))
            .await;
        store
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = store_with_alice().await;

        let tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let saved = tx
            .posts()
            .save(Post::new("alice", "t".into(), "c".into()))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));
        tx.commit().await.unwrap();

        assert_eq!(store.post_count().await, 1);
    }

    #[tokio::test]
    async fn test_dropped_scope_rolls_back() {
        let store = store_with_alice().await;

        {
            let tx = store.begin(TxMode::ReadWrite).await.unwrap();
            tx.posts()
                .save(Post::new("alice", "t".into(), "c".into()))
                .await
                .unwrap();
        }

        assert_eq!(store.post_count().await, 0);
    }

    #[tokio::test]
    async fn test_read_only_scope_rejects_writes() {
        let store = store_with_alice().await;

        let tx = store.begin(TxMode::ReadOnly).await.unwrap();
        let result = tx
            .posts()
            .save(Post::new("alice", "t".into(), "c".into()))
            .await;
        assert!(matches!(result, Err(RepoError::Query(_))));
    }

    #[tokio::test]
    async fn test_post_requires_existing_owner() {
        let store = store_with_alice().await;

        let tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let result = tx
            .posts()
            .save(Post::new("ghost", "t".into(), "c".into()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_posts() {
        let store = store_with_alice().await;

        let tx = store.begin(TxMode::ReadWrite).await.unwrap();
        tx.posts()
            .save(Post::new("alice", "t".into(), "c".into()))
            .await
            .unwrap();
        tx.users().delete("alice".to_string()).await.unwrap();
        assert!(tx.posts().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rolled_back_delete_keeps_post() {
        let store = store_with_alice().await;

        let tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let saved = tx
            .posts()
            .save(Post::new("alice", "t".into(), "c".into()))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        {
            let tx = store.begin(TxMode::ReadWrite).await.unwrap();
            tx.posts().delete(saved.id.unwrap()).await.unwrap();
        }

        assert_eq!(store.post_count().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_writers_keep_every_insert() {
        let store = store_with_alice().await;

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let tx = store.begin(TxMode::ReadWrite).await.unwrap();
                    let saved = tx
                        .posts()
                        .save(Post::new("alice", format!("t{i}"), "c".into()))
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                    tx.commit().await.unwrap();
                    saved.id.unwrap()
                })
            })
            .collect();

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 200);
        assert_eq!(store.post_count().await, 200);
    }

    #[test]
    fn title_match_ignores_case() {
        assert!(title_matches("Star Wars", "war"));
        assert!(title_matches("Warehouse", "war"));
        assert!(!title_matches("Peace", "war"));
    }
}
