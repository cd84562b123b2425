mod auth;
mod category;
mod email;
mod product;

pub use self::auth::{LoginRequest, RegisterRequest, Role};
pub use self::category::CreateCategoryRequest;
pub use self::email::{EmailAttachment, SendEmailRequest};
pub use self::product::{
    CreateProductRequest, FindAllProducts, NewProduct, UpdateProductRequest,
};
