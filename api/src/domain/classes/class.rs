use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Class {
    pub id: Uuid,
    pub course: String,
    pub student_ids: Vec<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Roster entry: the user fields a class listing is allowed to expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_instructor: bool,
    pub avatar: String,
    pub is_banned: bool,
}
