pub mod list_orders;
pub mod record_order;
