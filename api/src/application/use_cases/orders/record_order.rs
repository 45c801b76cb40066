use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;

#[derive(thiserror::Error, Debug)]
pub enum RecordOrderError {
    #[error("user id is required")]
    MissingUser,
    #[error("total must be a non-negative amount")]
    InvalidTotal,
    #[error("failed to record order")]
    Internal(#[source] anyhow::Error),
}

pub struct RecordOrder<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> RecordOrder<'a, R> {
    pub async fn execute(&self, user_id: &str, total: f64) -> Result<Order, RecordOrderError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(RecordOrderError::MissingUser);
        }
        if !total.is_finite() || total < 0.0 {
            return Err(RecordOrderError::InvalidTotal);
        }
        self.repo
            .insert(user_id, total)
            .await
            .map_err(RecordOrderError::Internal)
    }
}
