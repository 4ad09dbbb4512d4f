pub mod health;
pub mod styles;
pub mod users;
