pub mod error;
pub mod order;
pub mod user;
