use async_trait::async_trait;

use crate::domain::orders::order::Order;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, user_id: &str, total: f64) -> anyhow::Result<Order>;
    async fn list_for_user(&self, user_id: &str) -> anyhow::Result<Vec<Order>>;
}
