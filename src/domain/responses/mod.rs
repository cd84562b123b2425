mod api;
mod auth;
mod category;
mod import;
mod product;

pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
pub use self::auth::{AuthResponse, UserResponse};
pub use self::category::CategoryResponse;
pub use self::import::{ImportReport, SkippedRow};
pub use self::product::ProductResponse;
