use async_trait::async_trait;

use crate::domain::classes::class::Student;

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Students enrolled in the class for `course`, in enrollment order.
    /// `None` when no class exists for the course.
    async fn find_students_by_course(&self, course: &str)
    -> anyhow::Result<Option<Vec<Student>>>;
}
