use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::{NewUser, User, UserCredentials};

#[derive(thiserror::Error, Debug)]
pub enum CreateUserError {
    #[error("a user with email {0} already exists")]
    EmailTaken(String),
    #[error("failed to persist user")]
    Storage(#[source] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. The store's unique constraint on `email` is the
    /// authority on duplicates and surfaces as [`CreateUserError::EmailTaken`].
    async fn create_user(&self, user: &NewUser) -> Result<User, CreateUserError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}
