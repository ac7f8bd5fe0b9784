use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::models::{MenuItem, MenuItemInput, OrderItem, OrderItemInput};
use error_types::{Result, ServiceError};

/// Input validation utilities for the ordering service

// Compiled once at first use; the pattern is a hardcoded constant.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// validator crate compatible custom validator for email shape
pub fn validate_email_shape(email: &str) -> std::result::Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("Please provide a valid email.".into());
        Err(err)
    }
}

/// Pick the first failure message following the given field order.
///
/// `ValidationErrors` stores failures per field in a map, so without a fixed
/// order the reported field would vary between runs.
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    for field in field_order {
        if let Some(list) = field_errors.get(*field) {
            if let Some(err) = list.first() {
                if let Some(message) = &err.message {
                    return message.to_string();
                }
                return format!("Invalid value for '{field}'.");
            }
        }
    }
    "Invalid input.".to_string()
}

/// Validate submitted menu items and assign their IDs.
///
/// First failing item short-circuits with the shared message; there is no
/// aggregate error list.
pub fn validate_menu_items(items: &[MenuItemInput]) -> Result<Vec<MenuItem>> {
    let mut validated = Vec::with_capacity(items.len());

    for item in items {
        let name = item.name.as_deref().unwrap_or("").trim().to_string();
        let price = item.price.unwrap_or(0.0);

        if name.is_empty() || price <= 0.0 {
            return Err(ServiceError::InvalidInput(
                "All menu items must have a valid name and price greater than 0.".to_string(),
            ));
        }

        validated.push(MenuItem {
            id: Uuid::new_v4(),
            name,
            description: item
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            price,
        });
    }

    Ok(validated)
}

/// Validate submitted order items, checking each field in order so the first
/// bad field produces its specific message.
pub fn validate_order_items(items: &[OrderItemInput]) -> Result<Vec<OrderItem>> {
    let mut validated = Vec::with_capacity(items.len());

    for item in items {
        let name = match item.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Each order item must have a valid name.".to_string(),
                ))
            }
        };

        let price = match item.price {
            Some(price) if price > 0.0 => price,
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Each order item must have a valid price greater than 0.".to_string(),
                ))
            }
        };

        // Quantities arrive as JSON numbers; 2.5 of a dish is not a thing.
        let quantity = match item.quantity {
            Some(q) if q.fract() == 0.0 && q >= 1.0 && q <= f64::from(i32::MAX) => q as i32,
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Each order item must have a valid quantity (integer >= 1).".to_string(),
                ))
            }
        };

        validated.push(OrderItem {
            name,
            price,
            quantity,
        });
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(name: Option<&str>, price: Option<f64>) -> MenuItemInput {
        MenuItemInput {
            name: name.map(str::to_string),
            description: None,
            price,
        }
    }

    fn order_item(name: Option<&str>, price: Option<f64>, quantity: Option<f64>) -> OrderItemInput {
        OrderItemInput {
            name: name.map(str::to_string),
            price,
            quantity,
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_menu_items_pass_and_get_ids() {
        let validated =
            validate_menu_items(&[menu_item(Some("Biryani"), Some(250.0))]).expect("should pass");
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].name, "Biryani");
    }

    #[test]
    fn test_menu_item_rejects_missing_name_or_bad_price() {
        for bad in [
            menu_item(None, Some(10.0)),
            menu_item(Some(""), Some(10.0)),
            menu_item(Some("Thali"), None),
            menu_item(Some("Thali"), Some(0.0)),
            menu_item(Some("Thali"), Some(-5.0)),
        ] {
            let err = validate_menu_items(&[bad]).unwrap_err();
            assert!(err.to_string().contains("valid name and price"));
        }
    }

    #[test]
    fn test_order_items_first_failure_wins() {
        let items = [
            order_item(Some("Paneer Tikka"), Some(180.0), Some(1.0)),
            order_item(None, Some(90.0), Some(2.0)),
            order_item(Some("Lassi"), None, Some(1.0)),
        ];
        let err = validate_order_items(&items).unwrap_err();
        assert_eq!(err.to_string(), "Each order item must have a valid name.");
    }

    #[test]
    fn test_order_item_rejects_fractional_quantity() {
        let err =
            validate_order_items(&[order_item(Some("Naan"), Some(30.0), Some(2.5))]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Each order item must have a valid quantity (integer >= 1)."
        );
    }

    #[test]
    fn test_order_item_rejects_zero_quantity_and_price() {
        assert!(validate_order_items(&[order_item(Some("Naan"), Some(30.0), Some(0.0))]).is_err());
        assert!(validate_order_items(&[order_item(Some("Naan"), Some(0.0), Some(1.0))]).is_err());
    }

    #[test]
    fn test_order_items_pass_through() {
        let validated =
            validate_order_items(&[order_item(Some("Dal Makhani"), Some(160.0), Some(3.0))])
                .expect("should pass");
        assert_eq!(validated[0].quantity, 3);
        assert_eq!(validated[0].price, 160.0);
    }
}
