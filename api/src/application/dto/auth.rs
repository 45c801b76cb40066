use crate::domain::users::user::User;

/// Outcome of a successful register or login: the user and a freshly
/// signed access token.
#[derive(Debug, Clone)]
pub struct AuthSessionDto {
    pub user: User,
    pub access_token: String,
}
