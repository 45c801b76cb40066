use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::presentation::http::error::{ApiError, ErrorItem};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;

/// Request bodies that check themselves before a handler sees them.
pub trait Validate {
    /// Canonicalizes fields in place (trimming, case folding).
    fn normalize(&mut self) {}

    /// Every failing field, in declaration order. Empty when valid.
    fn validate(&self) -> Vec<ErrorItem>;
}

/// JSON body extractor that normalizes and validates `T`, rejecting with a
/// 400 that lists every failing field.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError::validation(vec![ErrorItem {
                    location: Some("body".to_string()),
                    ..ErrorItem::msg(rejection.body_text())
                }])
            })?;
        value.normalize();
        let errors = value.validate();
        if errors.is_empty() {
            Ok(ValidatedJson(value))
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn require_text(errors: &mut Vec<ErrorItem>, path: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(ErrorItem::field(
            path,
            format!("{label} is required"),
            Some(serde_json::Value::String(value.to_string())),
        ));
    }
}

pub fn require_email(errors: &mut Vec<ErrorItem>, path: &str, value: &str) {
    if !is_email(value) {
        errors.push(ErrorItem::field(
            path,
            "Email is invalid",
            Some(serde_json::Value::String(value.to_string())),
        ));
    }
}

// Password values are never echoed back.
pub fn require_password(errors: &mut Vec<ErrorItem>, path: &str, value: &str, min_len: usize) {
    if value.is_empty() {
        errors.push(ErrorItem::field(path, "Password is required", None));
    } else if value.chars().count() < min_len {
        errors.push(ErrorItem::field(
            path,
            format!("Password must be at least {min_len} characters"),
            None,
        ));
    }
}
