//! Error envelope shared by every handler.
//!
//! Clients only ever see the short message stored here. Internal failures
//! are logged in full at the point they are converted and reach the wire as
//! a generic "Internal server error".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

pub const INTERNAL_ERROR_MSG: &str = "Internal server error";

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ErrorItem {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ErrorItem {
    pub fn msg(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            ..Default::default()
        }
    }

    pub fn field(path: &str, msg: impl Into<String>, value: Option<serde_json::Value>) -> Self {
        Self {
            msg: msg.into(),
            path: Some(path.to_string()),
            location: Some("body".to_string()),
            value,
            email: None,
        }
    }
}

/// `{success:false, errors}` for the auth endpoints, bare `{errors}` for
/// the roster endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Flagged,
    Bare,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub errors: Vec<ErrorItem>,
    pub envelope: Envelope,
}

impl ApiError {
    pub fn new(status: StatusCode, errors: Vec<ErrorItem>) -> Self {
        Self {
            status,
            errors,
            envelope: Envelope::Flagged,
        }
    }

    pub fn validation(errors: Vec<ErrorItem>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, errors)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, vec![ErrorItem::msg(msg)])
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, vec![ErrorItem::msg(msg)])
    }

    pub fn email_conflict(email: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            vec![ErrorItem {
                email: Some(email.into()),
                ..ErrorItem::msg("The user already exist")
            }],
        )
    }

    /// Logs `err` with its full chain and hides it behind the generic message.
    pub fn internal(context: &'static str, err: impl std::fmt::Debug) -> Self {
        tracing::error!(error = ?err, context, "request_failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![ErrorItem::msg(INTERNAL_ERROR_MSG)],
        )
    }

    pub fn bare(mut self) -> Self {
        self.envelope = Envelope::Bare;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let success = match self.envelope {
            Envelope::Flagged => Some(false),
            Envelope::Bare => None,
        };
        let body = ErrorBody {
            success,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
