use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDraft, UserInput};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Input is validated at the HTTP boundary before it gets here. Email conflicts
/// are never pre-checked: the repository reports them from the write itself.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user; the store assigns id and timestamps
    pub async fn create(&self, input: UserInput) -> UserResult<User> {
        Ok(self.repository.save(UserDraft::new(input)).await?)
    }

    /// Get a user by ID
    pub async fn get(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List all users
    pub async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.repository.find_all().await?)
    }

    /// Replace first name, last name and email of an existing user
    pub async fn update(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        let existing = self.get(id).await?;
        Ok(self
            .repository
            .save(UserDraft::replacing(&existing, input))
            .await?)
    }

    /// Delete a user permanently
    pub async fn delete(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        // removed concurrently since the existence check
        if !self.repository.delete_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn grace() -> UserInput {
        UserInput::new("Grace", "Hopper", "grace@example.com")
    }

    fn stored(id: Uuid, input: &UserInput) -> User {
        let now = Utc::now();
        User {
            id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_never_sends_an_id() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_save()
            .withf(|draft| draft.id.is_none())
            .times(1)
            .returning(move |draft| {
                Ok(stored(
                    id,
                    &UserInput::new(draft.first_name, draft.last_name, draft.email),
                ))
            });

        let service = UserService::new(mock_repo);
        let user = service.create(grace()).await.unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.email, "grace@example.com");
    }

    #[tokio::test]
    async fn test_create_maps_unique_violation_to_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();

        // no existence pre-check: only save may be called
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(RepositoryError::UniqueViolation("uk_users_email".into())));

        let service = UserService::new(mock_repo);
        let err = service.create(grace()).await.unwrap_err();

        assert!(matches!(err, UserError::DuplicateEmail));
        assert_eq!(err.to_string(), "email already exists");
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let err = service.get(id).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_update_missing_user_does_not_save() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let err = service.update(id, grace()).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_of_existing_user() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        let existing = stored(id, &grace());

        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save()
            .withf(move |draft| {
                draft.id == Some(id)
                    && draft.first_name == "Grace B."
                    && draft.email == "gb@example.com"
            })
            .times(1)
            .returning(move |draft| {
                Ok(stored(
                    id,
                    &UserInput::new(draft.first_name, draft.last_name, draft.email),
                ))
            });

        let service = UserService::new(mock_repo);
        let user = service
            .update(id, UserInput::new("Grace B.", "Hopper", "gb@example.com"))
            .await
            .unwrap();

        assert_eq!(user.first_name, "Grace B.");
    }

    #[tokio::test]
    async fn test_update_maps_unique_violation_to_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        let existing = stored(id, &grace());

        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save()
            .returning(|_| Err(RepositoryError::UniqueViolation("uk_users_email".into())));

        let service = UserService::new(mock_repo);
        let err = service.update(id, grace()).await.unwrap_err();

        assert!(matches!(err, UserError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_update_of_row_removed_after_lookup_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        let existing = stored(id, &grace());

        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save()
            .returning(move |_| Err(RepositoryError::NotFound(id)));

        let service = UserService::new(mock_repo);
        let err = service.update(id, grace()).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_exists_by_id()
            .with(eq(id))
            .returning(|_| Ok(false));
        mock_repo.expect_delete_by_id().never();

        let service = UserService::new(mock_repo);
        let err = service.delete(id).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_of_row_removed_after_check_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_id()
            .with(eq(id))
            .returning(|_| Ok(false));

        let service = UserService::new(mock_repo);
        let err = service.delete(id).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_existing_user() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo.expect_delete_by_id().times(1).returning(|_| Ok(true));

        let service = UserService::new(mock_repo);

        assert!(service.delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_database_failure_is_internal() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_all()
            .returning(|| Err(RepositoryError::Database("connection reset".into())));

        let service = UserService::new(mock_repo);
        let err = service.list().await.unwrap_err();

        assert!(matches!(err, UserError::Internal(_)));
    }
}
