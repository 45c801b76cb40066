use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::domain::users::user::{NewUser, User, UserCredentials};
use crate::infrastructure::db::PgPool;

const USER_COLUMNS: &str = "id, first_name, last_name, email, refresh_token, avatar, address, \
     phone_number, region, is_admin, is_instructor, is_banned, email_verified, created_at, updated_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        email: r.get("email"),
        refresh_token: r.get("refresh_token"),
        avatar: r.get("avatar"),
        address: r.get("address"),
        phone_number: r.get("phone_number"),
        region: r.get("region"),
        is_admin: r.get("is_admin"),
        is_instructor: r.get("is_instructor"),
        is_banned: r.get("is_banned"),
        email_verified: r.get("email_verified"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, CreateUserError> {
        let sql = format!(
            r#"INSERT INTO users (first_name, last_name, email, password_hash,
                                  refresh_token, avatar, address, phone_number, region)
               VALUES ($1, $2, $3, $4, '', '', '', '', '')
               RETURNING {USER_COLUMNS}"#
        );
        let res = sqlx::query(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await;
        match res {
            Ok(row) => Ok(map_user(&row)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(CreateUserError::EmailTaken(user.email.clone()))
            }
            Err(e) => Err(CreateUserError::Storage(e.into())),
        }
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| UserCredentials {
            user: map_user(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }
}
