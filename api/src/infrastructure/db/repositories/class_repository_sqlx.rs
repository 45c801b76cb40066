use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::class_repository::ClassRepository;
use crate::domain::classes::class::Student;
use crate::infrastructure::db::PgPool;

pub struct SqlxClassRepository {
    pub pool: PgPool,
}

impl SqlxClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for SqlxClassRepository {
    async fn find_students_by_course(
        &self,
        course: &str,
    ) -> anyhow::Result<Option<Vec<Student>>> {
        let class_id =
            sqlx::query_scalar::<_, Uuid>(r#"SELECT id FROM classes WHERE course = $1"#)
                .bind(course)
                .fetch_optional(&self.pool)
                .await?;
        let Some(class_id) = class_id else {
            return Ok(None);
        };

        // Dangling references drop out of the join, as a populate would skip them.
        let rows = sqlx::query(
            r#"SELECT u.id, u.first_name, u.last_name, u.email, u.is_instructor,
                      u.avatar, u.is_banned
               FROM class_students cs
               JOIN users u ON u.id = cs.user_id
               WHERE cs.class_id = $1
               ORDER BY cs.position ASC, u.id ASC"#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(
            rows.into_iter()
                .map(|r| Student {
                    id: r.get("id"),
                    first_name: r.get("first_name"),
                    last_name: r.get("last_name"),
                    email: r.get("email"),
                    is_instructor: r.get("is_instructor"),
                    avatar: r.get("avatar"),
                    is_banned: r.get("is_banned"),
                })
                .collect(),
        ))
    }
}
