use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::classes::list_students::ListClassStudents;
use crate::bootstrap::app_context::AppContext;
use crate::domain::classes::class::Student;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "isInstructor")]
    pub is_instructor: bool,
    pub avatar: String,
    #[serde(rename = "isBanned")]
    pub is_banned: bool,
}

impl From<Student> for StudentItem {
    fn from(s: Student) -> Self {
        StudentItem {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
            is_instructor: s.is_instructor,
            avatar: s.avatar,
            is_banned: s.is_banned,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentsResponse {
    pub students: Vec<StudentItem>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/classes/:id", get(get_students))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/classes/{id}", tag = "Classes",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, body = StudentsResponse),
        (status = 500, body = ErrorBody)
    ))]
pub async fn get_students(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<StudentsResponse>, ApiError> {
    let repo = ctx.class_repo();
    let uc = ListClassStudents {
        repo: repo.as_ref(),
    };
    let students = uc
        .execute(&id)
        .await
        .map_err(|e| ApiError::internal("get_students", e).bare())?;
    Ok(Json(StudentsResponse {
        students: students.into_iter().map(Into::into).collect(),
    }))
}
