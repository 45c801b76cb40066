//! Process-local adapters for every storage port.
//!
//! Used when `DATABASE_BACKEND=memory` and by the test suites. State lives
//! behind `tokio::sync::RwLock`s and disappears with the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::class_repository::ClassRepository;
use crate::application::ports::health_port::HealthPort;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::domain::classes::class::{Class, Student};
use crate::domain::orders::order::Order;
use crate::domain::users::user::{NewUser, User, UserCredentials};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserCredentials>>>,
}

impl InMemoryUserRepository {
    /// Applies `f` to a stored user, e.g. to flip role flags in tests.
    /// Returns false when the id is unknown.
    pub async fn update_user<F: FnOnce(&mut User)>(&self, id: Uuid, f: F) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(creds) => {
                f(&mut creds.user);
                creds.user.updated_at = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    pub async fn remove_user(&self, id: Uuid) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, CreateUserError> {
        let mut users = self.users.write().await;
        if users.values().any(|c| c.user.email == user.email) {
            return Err(CreateUserError::EmailTaken(user.email.clone()));
        }
        let now = chrono::Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            refresh_token: String::new(),
            avatar: String::new(),
            address: String::new(),
            phone_number: String::new(),
            region: String::new(),
            is_admin: false,
            is_instructor: false,
            is_banned: false,
            email_verified: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(
            created.id,
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .find_credentials_by_email(email)
            .await?
            .map(|c| c.user))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let users = self.users.read().await;
        Ok(users.values().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|c| c.user.clone()))
    }
}

/// Classes keyed by course. Student references resolve against the user
/// repository it was built with.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassRepository {
    classes: Arc<RwLock<HashMap<String, Class>>>,
    users: InMemoryUserRepository,
}

impl InMemoryClassRepository {
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            classes: Arc::default(),
            users,
        }
    }

    /// Creates or replaces the class for `course`.
    pub async fn put_class(&self, course: &str, student_ids: Vec<Uuid>) -> Class {
        let now = chrono::Utc::now();
        let mut classes = self.classes.write().await;
        let class = match classes.get(course) {
            Some(existing) => Class {
                student_ids,
                updated_at: now,
                ..existing.clone()
            },
            None => Class {
                id: Uuid::new_v4(),
                course: course.to_string(),
                student_ids,
                created_at: now,
                updated_at: now,
            },
        };
        classes.insert(course.to_string(), class.clone());
        class
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn find_students_by_course(
        &self,
        course: &str,
    ) -> anyhow::Result<Option<Vec<Student>>> {
        let student_ids = match self.classes.read().await.get(course) {
            Some(class) => class.student_ids.clone(),
            None => return Ok(None),
        };
        let mut students = Vec::with_capacity(student_ids.len());
        for id in student_ids {
            if let Some(u) = self.users.find_by_id(id).await? {
                students.push(Student {
                    id: u.id,
                    first_name: u.first_name,
                    last_name: u.last_name,
                    email: u.email,
                    is_instructor: u.is_instructor,
                    avatar: u.avatar,
                    is_banned: u.is_banned,
                });
            }
        }
        Ok(Some(students))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, user_id: &str, total: f64) -> anyhow::Result<Order> {
        let now = chrono::Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            total,
            created_at: now,
            updated_at: now,
        };
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list_for_user(&self, user_id: &str) -> anyhow::Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryHealth;

#[async_trait]
impl HealthPort for InMemoryHealth {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// One set of in-memory adapters sharing a single user table.
#[derive(Debug, Clone)]
pub struct InMemoryStores {
    pub users: InMemoryUserRepository,
    pub classes: InMemoryClassRepository,
    pub orders: InMemoryOrderRepository,
    pub health: InMemoryHealth,
}

impl InMemoryStores {
    pub fn new() -> Self {
        let users = InMemoryUserRepository::default();
        Self {
            classes: InMemoryClassRepository::new(users.clone()),
            users,
            orders: InMemoryOrderRepository::default(),
            health: InMemoryHealth,
        }
    }
}

impl Default for InMemoryStores {
    fn default() -> Self {
        Self::new()
    }
}
