mod support;

use std::sync::Arc;

use api::application::ports::user_repository::{CreateUserError, UserRepository};
use api::bootstrap::app_context::AppServices;
use api::domain::users::user::{NewUser, User, UserCredentials};
use api::infrastructure::memory::{InMemoryClassRepository, InMemoryHealth, InMemoryOrderRepository};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{DecodingKey, Validation};
use serde_json::{Value, json};
use support::{SECRET, TestApp, keys};
use uuid::Uuid;

#[tokio::test]
async fn register_returns_public_user_and_token() {
    let app = TestApp::new();
    let (status, body) = app.register("kj@nasa.gov", "orbital-1962").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["accessToken"].as_str().unwrap().len() > 20);
    assert_eq!(
        keys(&body["user"]),
        [
            "_id",
            "address",
            "avatar",
            "email",
            "emailVerified",
            "firstName",
            "isAdmin",
            "isInstructor",
            "lastName",
            "phoneNumber",
            "region",
        ]
    );
    assert_eq!(body["user"]["email"], "kj@nasa.gov");
    assert_eq!(body["user"]["avatar"], "");
    assert_eq!(body["user"]["isAdmin"], false);
}

#[tokio::test]
async fn registering_twice_conflicts() {
    let app = TestApp::new();
    let (first, _) = app.register("dup@example.com", "password1").await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = app.register("DUP@example.com ", "password2").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["email"], "dup@example.com");
    assert_eq!(body["errors"][0]["msg"], "The user already exist");
}

#[tokio::test]
async fn register_reports_every_invalid_field() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/api/auth/register", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["firstName", "lastName", "email", "password"]);
    assert!(body["errors"].as_array().unwrap().iter().all(|e| e["location"] == "body"));
}

#[tokio::test]
async fn short_password_is_rejected_without_echo() {
    let app = TestApp::new();
    let (status, body) = app.register("short@example.com", "abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["path"], "password");
    assert!(body["errors"][0].get("value").is_none());
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["location"], "body");
}

#[tokio::test]
async fn login_round_trip() {
    let app = TestApp::new();
    let (_, reg) = app.register("login@example.com", "s3cret-pass").await;

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({"email": "Login@Example.com", "password": "s3cret-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["_id"], reg["user"]["_id"]);
    assert_eq!(keys(&body["user"]), keys(&reg["user"]));
    assert!(body["accessToken"].is_string());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register("wrong@example.com", "right-pass").await;

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({"email": "wrong@example.com", "password": "wrong-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"][0]["msg"], "Email or password is invalid.");
}

#[tokio::test]
async fn login_with_unknown_email_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({"email": "ghost@example.com", "password": "whatever"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "User do not exist");
}

#[tokio::test]
async fn token_carries_only_identity_claims() {
    let app = TestApp::new();
    let (_, body) = app.register("claims@example.com", "pass-word").await;
    let token = body["accessToken"].as_str().unwrap();

    let decoded = jsonwebtoken::decode::<Value>(
        token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap()
    .claims;
    assert_eq!(
        keys(&decoded),
        ["_id", "email", "exp", "firstName", "iat", "isAdmin", "isInstructor", "lastName"]
    );
    assert!(decoded.get("password").is_none());
    assert_eq!(decoded["_id"], body["user"]["_id"]);
    let ttl = decoded["exp"].as_i64().unwrap() - decoded["iat"].as_i64().unwrap();
    assert_eq!(ttl, 12 * 60 * 60);
}

#[tokio::test]
async fn my_account_returns_documented_subset() {
    let app = TestApp::new();
    let (_, reg) = app.register("me@example.com", "pass-word").await;
    let token = reg["accessToken"].as_str().unwrap();

    let (status, body) = app.get("/api/users/my-account", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        keys(&body["user"]),
        [
            "_id",
            "email",
            "emailVerified",
            "firstName",
            "isAdmin",
            "isInstructor",
            "lastName",
        ]
    );
    assert_eq!(body["user"]["_id"], reg["user"]["_id"]);
}

#[tokio::test]
async fn my_account_for_deleted_user_is_bad_request() {
    let app = TestApp::new();
    let (_, reg) = app.register("gone@example.com", "pass-word").await;
    let token = reg["accessToken"].as_str().unwrap();
    let id: Uuid = reg["user"]["_id"].as_str().unwrap().parse().unwrap();
    assert!(app.stores.users.remove_user(id).await);

    let (status, body) = app.get("/api/users/my-account", Some(token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "User do not exist");
}

#[tokio::test]
async fn my_account_requires_a_valid_token() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/users/my-account", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.get("/api/users/my-account", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, reg) = app.register("forged@example.com", "pass-word").await;
    let user: User = app
        .stores
        .users
        .find_by_email("forged@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reg["user"]["_id"], user.id.to_string());
    let forged = api::application::services::tokens::AccessTokens::new("other-secret", 60)
        .issue(&user)
        .unwrap();
    let (status, _) = app.get("/api/users/my-account", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Behaves as if another request inserted the same email between the
/// pre-check and the insert.
struct RacingUsers;

#[async_trait]
impl UserRepository for RacingUsers {
    async fn create_user(&self, user: &NewUser) -> Result<User, CreateUserError> {
        Err(CreateUserError::EmailTaken(user.email.clone()))
    }
    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        Ok(None)
    }
    async fn find_credentials_by_email(
        &self,
        _email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        Ok(None)
    }
    async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(None)
    }
}

#[tokio::test]
async fn store_level_duplicate_is_reported_as_conflict() {
    let services = AppServices::new(
        Arc::new(RacingUsers),
        Arc::new(InMemoryClassRepository::default()),
        Arc::new(InMemoryOrderRepository::default()),
        Arc::new(InMemoryHealth),
    );
    let app = TestApp::with_services(services);
    let (status, body) = app.register("race@example.com", "pass-word").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"][0]["email"], "race@example.com");
}
