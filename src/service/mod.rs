mod auth;
mod category;
mod email;
mod product;

pub use self::auth::AuthService;
pub use self::category::CategoryService;
pub use self::email::EmailService;
pub use self::product::{ProductCommandService, ProductQueryService};
