//! Identity module
//!
//! Bearer tokens are issued by an external identity provider and signed
//! with a shared HS256 secret. This module only validates them and
//! extracts the user id from the `sub` claim.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
