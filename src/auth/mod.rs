pub mod config;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod principal;
pub mod session_jwt;

pub use config::SessionConfig;
pub use extractors::{AdminPrincipal, UserPrincipal};
pub use middleware::AuthLayer;
pub use principal::Principal;
