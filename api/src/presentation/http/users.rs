use axum::{
    Extension, Json, Router, extract::State, middleware::from_fn_with_state, routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::services::tokens::AccessClaims;
use crate::application::use_cases::auth::me::GetMe;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::middleware::require_auth;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountUser {
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
}

impl From<User> for AccountUser {
    fn from(u: User) -> Self {
        AccountUser {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            is_admin: u.is_admin,
            is_instructor: u.is_instructor,
            email: u.email,
            email_verified: u.email_verified,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub success: bool,
    pub user: AccountUser,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/my-account", get(my_account))
        .route_layer(from_fn_with_state(ctx.clone(), require_auth))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users/my-account", tag = "Users", security(("bearerAuth" = [])), responses(
    (status = 200, body = AccountResponse),
    (status = 400, body = ErrorBody, description = "User no longer exists"),
    (status = 401, body = ErrorBody),
    (status = 500, body = ErrorBody)
))]
pub async fn my_account(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<AccountResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(claims.id)
        .await
        .map_err(|e| ApiError::internal("my_account", e))?
        .ok_or_else(|| ApiError::bad_request("User do not exist"))?;
    Ok(Json(AccountResponse {
        success: true,
        user: user.into(),
    }))
}
