use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

pub const MAX_PRODUCT_IMAGES: usize = 3;

/// Prices are stored as `NUMERIC(12, 2)`.
pub const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub images: Vec<String>,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text fields of a product multipart submission, as received.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
}

/// Validated, parsed product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub fields: ProductFields,
    pub images: Vec<String>,
}

/// Full replacement of the editable fields; `images: None` keeps the stored list.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub fields: ProductFields,
    pub images: Option<Vec<String>>,
}

impl ProductForm {
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = Some(value),
            "price" => self.price = Some(value),
            "description" => self.description = Some(value),
            "stock" => self.stock = Some(value),
            "category" => self.category = Some(value),
            _ => tracing::debug!(field, "Ignoring unknown product field"),
        }
    }

    pub fn validate(&self) -> Result<ProductFields> {
        let (Some(name), Some(price), Some(description), Some(stock), Some(category)) = (
            present(&self.name),
            present(&self.price),
            present(&self.description),
            present(&self.stock),
            present(&self.category),
        ) else {
            return Err(AppError::Validation("All fields are required.".to_string()));
        };

        let price = Decimal::from_str(price)
            .map_err(|_| AppError::Validation("price must be a number".to_string()))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(AppError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        if price.normalize().scale() > PRICE_SCALE {
            return Err(AppError::Validation(format!(
                "price must have at most {} decimal places",
                PRICE_SCALE
            )));
        }
        if price >= Decimal::from(PRICE_LIMIT) {
            return Err(AppError::Validation(format!(
                "price must be less than {}",
                PRICE_LIMIT
            )));
        }

        let stock = stock
            .parse::<i32>()
            .map_err(|_| AppError::Validation("stock must be a whole number".to_string()))?;
        if stock < 0 {
            return Err(AppError::Validation(
                "stock must not be negative".to_string(),
            ));
        }

        Ok(ProductFields {
            name: name.to_string(),
            description: description.to_string(),
            price,
            stock,
            category: category.to_string(),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Image count rules: creation needs 1..=3 images, an update may send none.
pub fn validate_image_count(count: usize, required: bool) -> Result<()> {
    if count == 0 && required {
        return Err(AppError::Validation(
            "At least one image is required.".to_string(),
        ));
    }

    if count > MAX_PRODUCT_IMAGES {
        return Err(AppError::Validation(format!(
            "No more than {} images are allowed.",
            MAX_PRODUCT_IMAGES
        )));
    }

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug_form() -> ProductForm {
        ProductForm {
            name: Some("Mug".into()),
            price: Some("9.99".into()),
            description: Some("Stoneware mug".into()),
            stock: Some("10".into()),
            category: Some("Kitchen".into()),
        }
    }

    #[test]
    fn parses_complete_form() {
        let fields = mug_form().validate().unwrap();
        assert_eq!(fields.price, Decimal::from_str("9.99").unwrap());
        assert_eq!(fields.stock, 10);
        assert_eq!(fields.category, "Kitchen");
    }

    #[test]
    fn rejects_missing_or_blank_fields() {
        let mut form = mug_form();
        form.category = None;
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        let mut form = mug_form();
        form.name = Some("   ".into());
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn zero_price_and_stock_are_allowed() {
        let mut form = mug_form();
        form.price = Some("0".into());
        form.stock = Some("0".into());
        let fields = form.validate().unwrap();
        assert!(fields.price.is_zero());
        assert_eq!(fields.stock, 0);
    }

    #[test]
    fn rejects_negative_or_malformed_numbers() {
        for (price, stock) in [("-1", "1"), ("abc", "1"), ("1", "-3"), ("1", "2.5")] {
            let mut form = mug_form();
            form.price = Some(price.into());
            form.stock = Some(stock.into());
            assert!(
                matches!(form.validate(), Err(AppError::Validation(_))),
                "price={price} stock={stock}"
            );
        }
    }

    #[test]
    fn price_must_fit_two_decimal_places() {
        let mut form = mug_form();
        form.price = Some("9.999".into());
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        form.price = Some("9.900".into());
        assert_eq!(
            form.validate().unwrap().price,
            Decimal::from_str("9.9").unwrap()
        );
    }

    #[test]
    fn price_must_fit_storage_range() {
        let mut form = mug_form();
        form.price = Some("99999999999".into());
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        form.price = Some("10000000000".into());
        assert!(form.validate().is_err());

        form.price = Some("9999999999.99".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn image_count_bounds() {
        assert!(validate_image_count(0, true).is_err());
        assert!(validate_image_count(1, true).is_ok());
        assert!(validate_image_count(3, true).is_ok());
        assert!(validate_image_count(4, true).is_err());
        assert!(validate_image_count(0, false).is_ok());
        assert!(validate_image_count(4, false).is_err());
    }
}
