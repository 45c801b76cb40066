pub mod class_repository;
pub mod health_port;
pub mod order_repository;
pub mod user_repository;
