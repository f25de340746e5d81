pub mod cart;
pub mod user;
