use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::dto::auth::AuthSessionDto;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::AccessTokens;

#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("user does not exist")]
    UnknownUser,
    #[error("email or password is invalid")]
    InvalidCredentials,
    #[error("failed to log in")]
    Internal(#[source] anyhow::Error),
}

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub tokens: &'a AccessTokens,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> Result<AuthSessionDto, LoginError> {
        let creds = self
            .repo
            .find_credentials_by_email(&req.email)
            .await
            .map_err(LoginError::Internal)?
            .ok_or(LoginError::UnknownUser)?;

        let parsed = PasswordHash::new(&creds.password_hash)
            .map_err(|e| LoginError::Internal(anyhow::anyhow!(e.to_string())))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(LoginError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(&creds.user)
            .map_err(LoginError::Internal)?;
        Ok(AuthSessionDto {
            user: creds.user,
            access_token,
        })
    }
}
