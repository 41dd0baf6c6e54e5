use crate::utils::error::{AdminError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdminError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Checks an item payload before it is sent to the store: the body must be a
/// JSON object, every configured required field must be a non-empty string,
/// `rating` (when present) must be 1..=5 and `order` non-negative.
pub fn validate_item_payload(
    collection: &str,
    payload: &serde_json::Value,
    required_fields: &[String],
) -> Result<()> {
    let Some(object) = payload.as_object() else {
        return Err(AdminError::ValidationError {
            message: format!("payload for '{collection}' must be a JSON object"),
        });
    };

    for field in required_fields {
        let present = object
            .get(field)
            .and_then(|value| value.as_str())
            .is_some_and(|text| !text.trim().is_empty());
        if !present {
            return Err(AdminError::ValidationError {
                message: format!("'{field}' is required for '{collection}'"),
            });
        }
    }

    if let Some(rating) = object.get("rating") {
        let valid = rating.as_i64().is_some_and(|r| (1..=5).contains(&r));
        if !valid {
            return Err(AdminError::ValidationError {
                message: format!("'rating' must be an integer between 1 and 5, got {rating}"),
            });
        }
    }

    if let Some(order) = object.get("order") {
        let valid = order.as_i64().is_some_and(|o| o >= 0);
        if !valid {
            return Err(AdminError::ValidationError {
                message: format!("'order' must be a non-negative integer, got {order}"),
            });
        }
    }

    Ok(())
}
