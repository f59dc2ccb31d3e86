//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbConn,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use storywave_core::domain::{Page, PageRequest, Post, User};
use storywave_core::error::RepoError;
use storywave_core::ports::{
    BaseRepository, PostRepository, TransactionManager, TxMode, TxScope, UserRepository,
};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{delete_by_id, find_by_id, map_db_err};

/// Post and user repositories over one SeaORM connection.
///
/// `C` is the pool ([`DbConn`]) for standalone use, or a
/// [`DatabaseTransaction`] when handed out by [`PostgresTransactionManager`].
pub struct PostgresStore<C = DbConn> {
    pub(crate) db: C,
}

impl<C> PostgresStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> BaseRepository<Post, i64> for PostgresStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");
        let result = find_by_id::<PostEntity, _>(&self.db, id).await?;
        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let is_new = entity.id.is_none();
        let active_model: post::ActiveModel = entity.into();

        let model = if is_new {
            active_model.insert(&self.db).await
        } else {
            active_model.update(&self.db).await
        }
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        delete_by_id::<PostEntity, _>(&self.db, id).await
    }
}

#[async_trait]
impl<C> PostRepository for PostgresStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let paginator = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .paginate(&self.db, request.size());

        let total_items = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(request.page())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            request,
            total_items,
        ))
    }

    async fn find_by_title_containing(&self, keyword: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = format!("%{}%", escape_like(keyword));

        let result = PostEntity::find()
            .filter(Expr::col(post::Column::Title).ilike(LikeExpr::new(pattern).escape('\\')))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<C> BaseRepository<User, String> for PostgresStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_by_id(&self, id: String) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_id = %id, "Finding user by id");
        let result = find_by_id::<UserEntity, _>(&self.db, id).await?;
        Ok(result.map(Into::into))
    }

    /// Users carry their own key, so saving is an upsert.
    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let exists = find_by_id::<UserEntity, _>(&self.db, entity.id.clone())
            .await?
            .is_some();
        let active_model: user::ActiveModel = entity.into();

        let model = if exists {
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        }
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        delete_by_id::<UserEntity, _>(&self.db, id).await
    }
}

impl<C> UserRepository for PostgresStore<C> where C: ConnectionTrait + Send + Sync {}

#[async_trait]
impl TxScope for PostgresStore<DatabaseTransaction> {
    fn posts(&self) -> &dyn PostRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let this = *self;
        this.db.commit().await.map_err(map_db_err)
    }
}

/// Opens PostgreSQL transactions on a connection pool.
pub struct PostgresTransactionManager {
    db: DbConn,
}

impl PostgresTransactionManager {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionManager for PostgresTransactionManager {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn TxScope>, RepoError> {
        let access_mode = match mode {
            TxMode::ReadOnly => AccessMode::ReadOnly,
            TxMode::ReadWrite => AccessMode::ReadWrite,
        };

        let txn = self
            .db
            .begin_with_config(None, Some(access_mode))
            .await
            .map_err(map_db_err)?;

        Ok(Box::new(PostgresStore::new(txn)))
    }
}

/// Escape LIKE wildcards so the keyword matches literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("war"), "war");
    }
}
