use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;

pub struct ListOrders<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> ListOrders<'a, R> {
    /// Orders for a user, oldest first.
    pub async fn execute(&self, user_id: &str) -> anyhow::Result<Vec<Order>> {
        self.repo.list_for_user(user_id.trim()).await
    }
}
