mod auth;
mod category;
mod email;
mod hashing;
mod jwt;
mod product;
mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::category::{
    CategoryCommandRepositoryTrait, CategoryQueryRepositoryTrait, CategoryServiceTrait,
    DynCategoryCommandRepository, DynCategoryQueryRepository, DynCategoryService,
};
pub use self::email::{DynEmailService, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
