pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::{Claims, JwtAuthentication};
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthMiddleware, AuthenticatedUser};
