#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use api::application::ports::class_repository::ClassRepository;
use api::application::ports::health_port::HealthPort;
use api::application::ports::order_repository::OrderRepository;
use api::application::ports::user_repository::{CreateUserError, UserRepository};
use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::Config;
use api::domain::classes::class::Student;
use api::domain::orders::order::Order;
use api::domain::users::user::{NewUser, User, UserCredentials};
use api::infrastructure::memory::InMemoryStores;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ACCESS_TOKEN_SECRET", SECRET),
        ("DATABASE_BACKEND", "memory"),
    ]);
    Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub ctx: AppContext,
    pub stores: InMemoryStores,
}

impl TestApp {
    pub fn new() -> Self {
        let stores = InMemoryStores::new();
        let ctx = AppContext::new(test_config(), AppServices::in_memory(&stores));
        Self {
            router: api::presentation::http::router(ctx.clone()),
            ctx,
            stores,
        }
    }

    pub fn with_services(services: AppServices) -> Self {
        let ctx = AppContext::new(test_config(), services);
        Self {
            router: api::presentation::http::router(ctx.clone()),
            ctx,
            stores: InMemoryStores::new(),
        }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::get(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    pub async fn register(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/auth/register",
            serde_json::json!({
                "firstName": "Katherine",
                "lastName": "Johnson",
                "email": email,
                "password": password,
            }),
        )
        .await
    }
}

pub fn keys(v: &Value) -> Vec<String> {
    let mut k: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
    k.sort();
    k
}

pub const LEAKY_ERROR: &str = "connection refused: db-internal.local:5432";

/// Storage that fails every call, to check nothing internal leaks out.
#[derive(Default)]
pub struct BrokenStore;

#[async_trait]
impl UserRepository for BrokenStore {
    async fn create_user(&self, _user: &NewUser) -> Result<User, CreateUserError> {
        Err(CreateUserError::Storage(anyhow::anyhow!(LEAKY_ERROR)))
    }
    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        anyhow::bail!(LEAKY_ERROR)
    }
    async fn find_credentials_by_email(
        &self,
        _email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        anyhow::bail!(LEAKY_ERROR)
    }
    async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<User>> {
        anyhow::bail!(LEAKY_ERROR)
    }
}

#[async_trait]
impl ClassRepository for BrokenStore {
    async fn find_students_by_course(
        &self,
        _course: &str,
    ) -> anyhow::Result<Option<Vec<Student>>> {
        anyhow::bail!(LEAKY_ERROR)
    }
}

#[async_trait]
impl OrderRepository for BrokenStore {
    async fn insert(&self, _user_id: &str, _total: f64) -> anyhow::Result<Order> {
        anyhow::bail!(LEAKY_ERROR)
    }
    async fn list_for_user(&self, _user_id: &str) -> anyhow::Result<Vec<Order>> {
        anyhow::bail!(LEAKY_ERROR)
    }
}

#[async_trait]
impl HealthPort for BrokenStore {
    async fn ping(&self) -> anyhow::Result<()> {
        anyhow::bail!(LEAKY_ERROR)
    }
}

pub fn broken_services() -> AppServices {
    let store = Arc::new(BrokenStore);
    AppServices::new(store.clone(), store.clone(), store.clone(), store)
}
