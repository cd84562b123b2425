use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::new(1, 2) {
        return Err(ValidationError::new("range")
            .with_message("Price must be at least 0.01".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    #[schema(example = "Smartphone")]
    pub name: String,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(custom(function = validate_price))]
    #[schema(value_type = f64, example = 99.99)]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[schema(example = 100)]
    pub quantity: i32,

    #[schema(example = 1)]
    pub category_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip_deserializing)]
    pub id: Option<i32>,

    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    #[schema(example = "Smartphone")]
    pub name: String,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(custom(function = validate_price))]
    #[schema(value_type = f64, example = 99.99)]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[schema(example = 100)]
    pub quantity: i32,

    #[schema(example = 1)]
    pub category_id: i32,
}

/// Candidate row accumulated by the import pipeline before the batch insert.
/// Unlike `CreateProductRequest` it is never validated through the HTTP
/// validator; the Row Parser already decided its fate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: i32,
}
