//! Entity-generic query helpers shared by the PostgreSQL repositories.
//!
//! They take any [`ConnectionTrait`] so the same code runs against the pool
//! and against an open [`sea_orm::DatabaseTransaction`].

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait};

use storywave_core::error::RepoError;

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

pub(crate) async fn find_by_id<E, C>(db: &C, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, RepoError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find_by_id(id).one(db).await.map_err(map_db_err)
}

pub(crate) async fn delete_by_id<E, C>(db: &C, id: PrimaryKeyOf<E>) -> Result<(), RepoError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(db).await.map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}

/// Classify a SeaORM error for the domain layer.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") || err_str.contains("foreign key") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_updated_is_not_found() {
        assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
    }

    #[test]
    fn unique_violations_become_constraint_errors() {
        let err = DbErr::Custom("duplicate key value violates unique constraint".to_string());
        assert!(matches!(map_db_err(err), RepoError::Constraint(_)));
    }

    #[test]
    fn other_failures_are_query_errors() {
        let err = DbErr::Custom("syntax error at or near".to_string());
        assert!(matches!(map_db_err(err), RepoError::Query(_)));
    }
}
