pub mod classes;
pub mod orders;
pub mod users;
