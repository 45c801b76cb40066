use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod classes;
pub mod error;
pub mod health;
pub mod middleware;
pub mod users;
pub mod validation;

/// All `/api` routes, without transport layers (CORS, tracing, docs).
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", classes::routes(ctx))
}
