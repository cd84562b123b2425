mod category;
mod product;
mod user;

pub use self::category::CategoryRepository;
pub use self::product::ProductRepository;
pub use self::user::UserRepository;
