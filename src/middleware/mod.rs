pub mod jwt;
pub mod validate;

pub use self::jwt::{AuthUser, auth_middleware, require_admin};
pub use self::validate::SimpleValidatedJson;
