//! User business logic service.
//!
//! Handles credential creation and verification on top of the user
//! repository and the password hasher.

use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    hasher: PasswordHasher,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `hasher` - Password hasher carrying the configured work factor
    pub fn new(pool: &'a SqlitePool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    /// Hashes the password and stores a new user.
    ///
    /// Input is expected to be validated already.
    ///
    /// # Errors
    /// Returns `ServiceError::AlreadyExists` if the username is taken, and
    /// `ServiceError::Database` for any other storage failure.
    pub async fn create_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let password_hash = self.hasher.hash(password)?;

        let repo = UserRepository::new(self.pool);
        let id = repo
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash: password_hash.clone(),
            })
            .await?;

        Ok(User {
            id,
            username: username.to_string(),
            password_hash,
        })
    }

    /// Verifies a username/password pair.
    ///
    /// # Errors
    /// `ServiceError::InvalidCredentials` for an unknown user or a wrong
    /// password alike. Both paths run one bcrypt verification.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let Some(user) = repo.get_user_by_username(username).await? else {
            self.hasher.verify_dummy(password);
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Whether a user with this username already exists.
    pub async fn username_taken(&self, username: &str) -> ServiceResult<bool> {
        let repo = UserRepository::new(self.pool);
        Ok(repo.username_exists(username).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::utils::password::MIN_COST;

    #[tokio::test]
    async fn created_user_can_authenticate() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(db.pool(), PasswordHasher::new(MIN_COST));

        let created = service
            .create_user("alice", "correct-password-123")
            .await
            .unwrap();
        assert_ne!(created.password_hash, "correct-password-123");

        let user = service
            .authenticate_user("alice", "correct-password-123")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_alike() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(db.pool(), PasswordHasher::new(MIN_COST));
        service
            .create_user("alice", "correct-password-123")
            .await
            .unwrap();

        let wrong = service
            .authenticate_user("alice", "another-password-456")
            .await;
        let unknown = service
            .authenticate_user("bob", "correct-password-123")
            .await;

        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn duplicate_create_is_already_exists() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(db.pool(), PasswordHasher::new(MIN_COST));

        service
            .create_user("alice", "correct-password-123")
            .await
            .unwrap();
        let again = service.create_user("alice", "another-password-456").await;

        assert!(matches!(again, Err(ServiceError::AlreadyExists { .. })));
        assert!(service.username_taken("alice").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_still_runs_a_verification() {
        let db = Database::in_memory().await.unwrap();
        let hasher = PasswordHasher::new(MIN_COST);
        let service = UserService::new(db.pool(), hasher.clone());
        service
            .create_user("alice", "correct-password-123")
            .await
            .unwrap();

        let wrong = service
            .authenticate_user("alice", "another-password-456")
            .await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));
        assert!(!hasher.dummy_digest_in_use());

        let unknown = service
            .authenticate_user("bob", "correct-password-123")
            .await;
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));
        assert!(hasher.dummy_digest_in_use());
    }

    #[tokio::test]
    async fn multibyte_password_prefix_does_not_authenticate() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(db.pool(), PasswordHasher::new(MIN_COST));
        let password = "€".repeat(24);
        service.create_user("alice", &password).await.unwrap();

        let extended = service
            .authenticate_user("alice", &format!("{}abc", password))
            .await;
        assert!(matches!(extended, Err(ServiceError::InvalidCredentials)));

        let too_long = service.create_user("bob", &"€".repeat(25)).await;
        assert!(matches!(too_long, Err(ServiceError::Validation { .. })));
        assert!(!service.username_taken("bob").await.unwrap());
    }
}
