//! Authentication module

mod context;
mod extractors;
pub mod jwt;
mod manager;
pub mod middleware;
pub mod password;

pub use context::AuthContext;
pub use extractors::CurrentUser;
pub use jwt::{AccessClaims, JwtError};
pub use manager::AuthManager;
pub use middleware::{AuthError, AuthState, optional_auth, require_auth};
pub use password::{PasswordError, hash_password, verify_password};
