//! Form validation for items and users.
//!
//! Validation collects every rejected field instead of stopping at the first one,
//! so a single reply can tell the user everything that needs fixing.

use crate::{entities::ItemStatus, errors::Result};
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest accepted item, warehouse or category name, in characters.
pub const MAX_NAME_LEN: u64 = 100;

/// The unvalidated add/edit item form.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ItemDraft {
    /// Item name
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    /// Optional description
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Category name, resolved against the categories table
    #[validate(custom = "not_blank")]
    pub category: String,
    /// Warehouse name, resolved against the warehouses table
    #[validate(custom = "not_blank")]
    pub warehouse: String,
    /// Floor inside the warehouse (blank allowed)
    pub floor: Option<String>,
    /// Section on the floor (blank allowed)
    pub section: Option<String>,
    /// Unit price
    #[validate(custom = "positive_price")]
    pub price: f64,
    /// Units on hand
    #[validate(range(min = 0, max = 2147483647, message = "must be between 0 and 2147483647"))]
    pub current_stock: i64,
    /// Low-stock threshold
    #[validate(range(min = 0, max = 2147483647, message = "must be between 0 and 2147483647"))]
    pub min_stock: i64,
    /// Lifecycle status
    pub status: ItemStatus,
    /// Explicit SKU; generated on create when `None`
    #[validate(custom = "valid_sku")]
    pub sku: Option<String>,
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

fn positive_price(price: f64) -> std::result::Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("range");
        err.message = Some("must be greater than 0".into());
        Err(err)
    }
}

fn valid_sku(sku: &str) -> std::result::Result<(), ValidationError> {
    if super::sku::is_valid_sku_format(sku.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("sku");
        err.message = Some("must be non-empty and contain no spaces".into());
        Err(err)
    }
}

/// Builds a single-field validation error.
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> ValidationErrors {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

/// Checks every field that can be judged without the database.
///
/// # Errors
/// Returns `Error::Validation` listing each rejected field.
pub fn validate_item_draft(draft: &ItemDraft) -> Result<()> {
    draft.validate()?;
    Ok(())
}

/// Checks a warehouse or category name: not blank and at most [`MAX_NAME_LEN`] characters.
///
/// # Errors
/// Returns `Error::Validation` for `field`.
pub fn check_name(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(field_error(field, "required", "is required").into());
    }
    if !validator::validate_length(value.trim(), None, Some(MAX_NAME_LEN), None) {
        return Err(field_error(field, "length", "must be at most 100 characters").into());
    }
    Ok(())
}

/// Trims a location component; `None` and blank both become an empty string.
#[must_use]
pub fn normalize_location(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Returns true if `email` looks like a deliverable address.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    validator::validate_email(email.trim())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    fn valid_draft() -> ItemDraft {
        ItemDraft {
            name: "Pallet Wrap".to_string(),
            description: None,
            category: "Packaging".to_string(),
            warehouse: "Main Warehouse".to_string(),
            floor: Some("Ground".to_string()),
            section: Some("A".to_string()),
            price: 12.5,
            current_stock: 10,
            min_stock: 2,
            status: ItemStatus::Active,
            sku: None,
        }
    }

    fn rejected_fields(draft: &ItemDraft) -> ValidationErrors {
        match validate_item_draft(draft) {
            Err(Error::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn rejects(draft: &ItemDraft, field: &str) -> bool {
        rejected_fields(draft).field_errors().contains_key(field)
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_item_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_price_must_be_positive() {
        let mut draft = valid_draft();
        draft.price = 0.0;
        assert!(rejects(&draft, "price"));

        draft.price = -3.0;
        assert!(rejects(&draft, "price"));

        draft.price = f64::NAN;
        assert!(rejects(&draft, "price"));
    }

    #[test]
    fn test_stock_values_must_not_be_negative() {
        let mut draft = valid_draft();
        draft.current_stock = -1;
        draft.min_stock = -1;
        let errors = rejected_fields(&draft);
        assert!(errors.field_errors().contains_key("current_stock"));
        assert!(errors.field_errors().contains_key("min_stock"));

        // Zero is fine
        draft.current_stock = 0;
        draft.min_stock = 0;
        assert!(validate_item_draft(&draft).is_ok());
    }

    #[test]
    fn test_stock_values_must_fit_the_column() {
        let mut draft = valid_draft();
        draft.current_stock = i64::from(i32::MAX) + 1;
        assert!(rejects(&draft, "current_stock"));

        draft.current_stock = i64::from(i32::MAX);
        assert!(validate_item_draft(&draft).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let draft = ItemDraft {
            name: "  ".to_string(),
            warehouse: String::new(),
            category: String::new(),
            price: 0.0,
            ..valid_draft()
        };
        let errors = rejected_fields(&draft);
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_name_length_is_capped() {
        let mut draft = valid_draft();
        draft.name = "x".repeat(101);
        assert!(rejects(&draft, "name"));

        draft.name = "x".repeat(100);
        assert!(validate_item_draft(&draft).is_ok());
    }

    #[test]
    fn test_description_length_is_capped() {
        let mut draft = valid_draft();
        draft.description = Some("d".repeat(1001));
        assert!(rejects(&draft, "description"));

        draft.description = Some("d".repeat(1000));
        assert!(validate_item_draft(&draft).is_ok());
    }

    #[test]
    fn test_explicit_sku_format() {
        let mut draft = valid_draft();
        draft.sku = Some("HAS SPACE".to_string());
        assert!(rejects(&draft, "sku"));

        draft.sku = Some("WRAP-500".to_string());
        assert!(validate_item_draft(&draft).is_ok());
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("name", "Main Warehouse").is_ok());
        assert!(matches!(
            check_name("name", "   "),
            Err(Error::Validation(e)) if e.field_errors().contains_key("name")
        ));
        assert!(check_name("name", &"y".repeat(101)).is_err());
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location(None), "");
        assert_eq!(normalize_location(Some("   ")), "");
        assert_eq!(normalize_location(Some(" Ground ")), "Ground");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("staff@example.com"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email(""));
    }
}
