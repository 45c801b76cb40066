use std::net::SocketAddr;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::{Config, DatabaseBackend};
use api::infrastructure::memory::InMemoryStores;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
        paths(
            api::presentation::http::auth::register,
            api::presentation::http::auth::login,
            api::presentation::http::users::my_account,
            api::presentation::http::classes::get_students,
            api::presentation::http::health::health,
        ),
        components(schemas(
            api::presentation::http::auth::RegisterRequest,
            api::presentation::http::auth::LoginRequest,
            api::presentation::http::auth::UserResponse,
            api::presentation::http::auth::AuthResponse,
            api::presentation::http::users::AccountUser,
            api::presentation::http::users::AccountResponse,
            api::presentation::http::classes::StudentItem,
            api::presentation::http::classes::StudentsResponse,
            api::presentation::http::error::ErrorItem,
            api::presentation::http::error::ErrorBody,
            api::presentation::http::health::HealthResp,
        )),
        modifiers(&BearerAuth),
        tags(
            (name = "Auth", description = "Registration and login"),
            (name = "Users", description = "Account of the authenticated user"),
            (name = "Classes", description = "Course rosters"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // from_env refuses to start in production without a usable origin
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api=debug,roster_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting roster API");
    if cfg.uses_dev_secret() {
        warn!("ACCESS_TOKEN_SECRET not set; signing tokens with the development secret");
    }

    let services = match cfg.database_backend {
        DatabaseBackend::Postgres => {
            let pool = api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.database_max_connections,
            )
            .await?;
            api::infrastructure::db::migrate(&pool).await?;
            info!("database_connected");
            AppServices::postgres(pool)
        }
        DatabaseBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            AppServices::in_memory(&InMemoryStores::new())
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);

    let app = api::presentation::http::router(ctx)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?e, "API server failed");
        return Err(e.into());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown_requested");
}
