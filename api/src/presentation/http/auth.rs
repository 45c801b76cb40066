use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::auth::AuthSessionDto;
use crate::application::use_cases::auth::login::{
    Login as LoginUc, LoginError, LoginRequest as LoginDto,
};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, ErrorBody, ErrorItem};
use crate::presentation::http::validation::{
    MIN_PASSWORD_LEN, Validate, ValidatedJson, normalize_email, require_email, require_password,
    require_text,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = normalize_email(&self.email);
    }

    fn validate(&self) -> Vec<ErrorItem> {
        let mut errors = Vec::new();
        require_text(&mut errors, "firstName", &self.first_name, "First name");
        require_text(&mut errors, "lastName", &self.last_name, "Last name");
        require_email(&mut errors, "email", &self.email);
        require_password(&mut errors, "password", &self.password, MIN_PASSWORD_LEN);
        errors
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }

    fn validate(&self) -> Vec<ErrorItem> {
        let mut errors = Vec::new();
        require_email(&mut errors, "email", &self.email);
        require_password(&mut errors, "password", &self.password, 1);
        errors
    }
}

/// Public user projection returned by register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "isInstructor")]
    pub is_instructor: bool,
    pub email: String,
    #[serde(rename = "emailVerified")]
    pub email_verified: bool,
    pub avatar: String,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub region: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            is_admin: u.is_admin,
            is_instructor: u.is_instructor,
            email: u.email,
            email_verified: u.email_verified,
            avatar: u.avatar,
            address: u.address,
            phone_number: u.phone_number,
            region: u.region,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl From<AuthSessionDto> for AuthResponse {
    fn from(s: AuthSessionDto) -> Self {
        AuthResponse {
            success: true,
            user: s.user.into(),
            access_token: s.access_token,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = ErrorBody, description = "Validation failed"),
    (status = 409, body = ErrorBody, description = "Email already registered"),
    (status = 500, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        tokens: ctx.tokens(),
    };
    let dto = RegisterDto {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
    };
    match uc.execute(&dto).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "user_registered");
            Ok(Json(session.into()))
        }
        Err(RegisterError::EmailTaken(email)) => Err(ApiError::email_conflict(email)),
        Err(e @ RegisterError::Internal(_)) => Err(ApiError::internal("register", e)),
    }
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = ErrorBody, description = "Validation failed or unknown user"),
    (status = 401, body = ErrorBody, description = "Wrong password"),
    (status = 500, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
        tokens: ctx.tokens(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    match uc.execute(&dto).await {
        Ok(session) => Ok(Json(session.into())),
        Err(LoginError::UnknownUser) => Err(ApiError::bad_request("User do not exist")),
        Err(LoginError::InvalidCredentials) => {
            Err(ApiError::unauthorized("Email or password is invalid."))
        }
        Err(e @ LoginError::Internal(_)) => Err(ApiError::internal("login", e)),
    }
}
