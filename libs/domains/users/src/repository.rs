use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::EMAIL_UNIQUE_CONSTRAINT;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{User, UserDraft};

/// Persistence interface for users.
///
/// Implementations own id and timestamp generation and enforce email
/// uniqueness atomically with the write; a violation is reported as
/// [`RepositoryError::UniqueViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert when `draft.id` is `None`, otherwise overwrite the mutable fields
    /// of that row. Overwriting a missing row yields `RepositoryError::NotFound`.
    async fn save(&self, draft: UserDraft) -> RepositoryResult<User>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// All users, oldest first.
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    async fn exists_by_id(&self, id: Uuid) -> RepositoryResult<bool>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<bool>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, draft: UserDraft) -> RepositoryResult<User> {
        // uniqueness check and write share one lock
        let mut users = self.users.write().await;

        if let Some(id) = draft.id {
            if !users.contains_key(&id) {
                return Err(RepositoryError::NotFound(id));
            }
        }

        let taken = users
            .values()
            .any(|u| u.email == draft.email && Some(u.id) != draft.id);
        if taken {
            return Err(RepositoryError::UniqueViolation(
                EMAIL_UNIQUE_CONSTRAINT.to_string(),
            ));
        }

        let now = Utc::now();
        let user = match draft.id.and_then(|id| users.get(&id)) {
            Some(existing) => User {
                first_name: draft.first_name,
                last_name: draft.last_name,
                email: draft.email,
                updated_at: now.max(existing.created_at),
                ..existing.clone()
            },
            None => User {
                id: Uuid::now_v7(),
                first_name: draft.first_name,
                last_name: draft.last_name,
                email: draft.email,
                created_at: now,
                updated_at: now,
            },
        };

        users.insert(user.id, user.clone());

        if draft.id.is_some() {
            tracing::info!(user_id = %user.id, "Updated user");
        } else {
            tracing::info!(user_id = %user.id, "Created user");
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn exists_by_id(&self, id: Uuid) -> RepositoryResult<bool> {
        let users = self.users.read().await;
        Ok(users.contains_key(&id))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserInput;

    fn draft(email: &str) -> UserDraft {
        UserDraft::new(UserInput::new("Grace", "Hopper", email))
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamps() {
        let repo = InMemoryUserRepository::new();

        let user = repo.save(draft("grace@example.com")).await.unwrap();

        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.save(draft("grace@example.com")).await.unwrap();

        let result = repo.save(draft("grace@example.com")).await;

        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.save(draft("grace@example.com")).await.unwrap();

        assert!(repo.save(draft("Grace@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_keeps_own_email_and_preserves_created_at() {
        let repo = InMemoryUserRepository::new();
        let created = repo.save(draft("grace@example.com")).await.unwrap();

        let updated = repo
            .save(UserDraft::replacing(
                &created,
                UserInput::new("Grace B.", "Hopper", "grace@example.com"),
            ))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.first_name, "Grace B.");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_other_user() {
        let repo = InMemoryUserRepository::new();
        repo.save(draft("grace@example.com")).await.unwrap();
        let ada = repo.save(draft("ada@example.com")).await.unwrap();

        let result = repo
            .save(UserDraft::replacing(
                &ada,
                UserInput::new("Ada", "Lovelace", "grace@example.com"),
            ))
            .await;

        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
        let stored = repo.find_by_id(ada.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::now_v7();

        let result = repo
            .save(UserDraft {
                id: Some(id),
                ..draft("grace@example.com")
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = InMemoryUserRepository::new();
        let user = repo.save(draft("grace@example.com")).await.unwrap();

        assert!(repo.delete_by_id(user.id).await.unwrap());
        assert!(!repo.delete_by_id(user.id).await.unwrap());
        assert!(!repo.exists_by_id(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = repo.save(draft("grace@example.com")).await.unwrap();

        assert_eq!(repo.find_by_email("grace@example.com").await.unwrap(), Some(user));
        assert!(repo.exists_by_email("grace@example.com").await.unwrap());
        assert!(!repo.exists_by_email("ada@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_creation() {
        let repo = InMemoryUserRepository::new();
        let first = repo.save(draft("a@example.com")).await.unwrap();
        let second = repo.save(draft("b@example.com")).await.unwrap();
        let third = repo.save(draft("c@example.com")).await.unwrap();

        let ids: Vec<Uuid> = repo.find_all().await.unwrap().into_iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }
}
