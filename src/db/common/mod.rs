pub mod orders;
pub mod services;
