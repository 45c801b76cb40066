use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::dto::auth::AuthSessionDto;
use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::application::services::tokens::AccessTokens;
use crate::domain::users::user::NewUser;

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("the user already exist")]
    EmailTaken(String),
    #[error("failed to register user")]
    Internal(#[source] anyhow::Error),
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub tokens: &'a AccessTokens,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<AuthSessionDto, RegisterError> {
        // Fast path only; the insert below is what actually guards uniqueness.
        if let Some(existing) = self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(RegisterError::Internal)?
        {
            return Err(RegisterError::EmailTaken(existing.email));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| RegisterError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();

        let new_user = NewUser {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password_hash: hash,
        };
        let user = match self.repo.create_user(&new_user).await {
            Ok(user) => user,
            Err(CreateUserError::EmailTaken(email)) => return Err(RegisterError::EmailTaken(email)),
            Err(CreateUserError::Storage(e)) => return Err(RegisterError::Internal(e)),
        };

        let access_token = self.tokens.issue(&user).map_err(RegisterError::Internal)?;
        Ok(AuthSessionDto { user, access_token })
    }
}
