use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;
use crate::infrastructure::db::PgPool;

pub struct SqlxOrderRepository {
    pub pool: PgPool,
}

impl SqlxOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_order(r: PgRow) -> Order {
    Order {
        id: r.get("id"),
        user_id: r.get("user_id"),
        total: r.get("total"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl OrderRepository for SqlxOrderRepository {
    async fn insert(&self, user_id: &str, total: f64) -> anyhow::Result<Order> {
        let row = sqlx::query(
            r#"INSERT INTO orders (user_id, total) VALUES ($1, $2)
               RETURNING id, user_id, total, created_at, updated_at"#,
        )
        .bind(user_id)
        .bind(total)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_order(row))
    }

    async fn list_for_user(&self, user_id: &str) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, total, created_at, updated_at
               FROM orders WHERE user_id = $1
               ORDER BY created_at ASC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_order).collect())
    }
}
