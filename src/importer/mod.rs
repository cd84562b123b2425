mod category_directory;
mod pipeline;
mod row_parser;

pub use self::category_directory::CategoryDirectory;
pub use self::pipeline::ImportPipeline;
pub use self::row_parser::{ImportRecord, InvalidNumericPolicy, RowOutcome, RowParser, SkipReason};

/// Column order expected in uploaded files; also what the template endpoint
/// serves.
pub const CSV_HEADER: &str = "ProductName,Price,Quantity,CategoryName,Description";
