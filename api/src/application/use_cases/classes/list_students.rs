use crate::application::ports::class_repository::ClassRepository;
use crate::domain::classes::class::Student;

pub struct ListClassStudents<'a, R: ClassRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClassRepository + ?Sized> ListClassStudents<'a, R> {
    /// A course without a class record has an empty roster.
    pub async fn execute(&self, course: &str) -> anyhow::Result<Vec<Student>> {
        Ok(self
            .repo
            .find_students_by_course(course)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::UserRepository;
    use crate::domain::users::user::NewUser;
    use crate::infrastructure::memory::{InMemoryClassRepository, InMemoryUserRepository};

    async fn seed(users: &InMemoryUserRepository, first: &str) -> uuid::Uuid {
        users
            .create_user(&NewUser {
                first_name: first.into(),
                last_name: "Student".into(),
                email: format!("{}@example.com", first.to_lowercase()),
                password_hash: "$argon2id$stub".into(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn missing_class_yields_empty_roster() {
        let repo = InMemoryClassRepository::default();
        let uc = ListClassStudents { repo: &repo };
        assert!(uc.execute("unknown-course").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_students_in_enrollment_order() {
        let users = InMemoryUserRepository::default();
        let ana = seed(&users, "Ana").await;
        let ben = seed(&users, "Ben").await;
        let repo = InMemoryClassRepository::new(users);
        repo.put_class("rust-101", vec![ben, ana]).await;

        let uc = ListClassStudents { repo: &repo };
        let roster = uc.execute("rust-101").await.unwrap();
        let names: Vec<&str> = roster.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(names, ["Ben", "Ana"]);
        assert_eq!(roster[1].email, "ana@example.com");
    }
}
