use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{RepositoryError, RepositoryResult},
    models::{User, UserDraft},
    repository::UserRepository,
};

/// Postgres-backed [`UserRepository`].
///
/// Every write is a single statement; the `uk_users_email` constraint is the
/// only source of truth for email conflicts.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::UniqueViolation(detail),
        _ => RepositoryError::Database(err.to_string()),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, draft: UserDraft) -> RepositoryResult<User> {
        let mut active_model = entity::ActiveModel {
            first_name: Set(draft.first_name),
            last_name: Set(draft.last_name),
            email: Set(draft.email),
            ..Default::default()
        };

        let model = match draft.id {
            None => active_model.insert(&self.db).await.map_err(map_db_err)?,
            Some(id) => {
                active_model.id = Set(id);
                active_model.update(&self.db).await.map_err(|err| match err {
                    DbErr::RecordNotUpdated => RepositoryError::NotFound(id),
                    other => map_db_err(other),
                })?
            }
        };

        if draft.id.is_some() {
            tracing::info!(user_id = %model.id, "Updated user");
        } else {
            tracing::info!(user_id = %model.id, "Created user");
        }
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepositoryResult<bool> {
        let count = entity::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }
}
