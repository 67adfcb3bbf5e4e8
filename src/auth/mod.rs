pub mod claims;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use claims::Claims;
pub use jwt::{JwtService, TokenError};
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use policy::{authorize, is_admin, is_same_user, require_admin, require_owner_or_admin};
