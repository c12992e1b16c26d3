//! Product records returned by the search service.

use serde::{Deserialize, Deserializer, Serialize};

/// A product as returned by the search service.
///
/// Produced entirely by the external service and treated as read-only.
/// Field names follow the service's JSON, which mixes `camelCase` and
/// `snake_case`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_number: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    /// Price as display text. The service has sent both strings and numbers.
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "modifiedAt", default)]
    pub modified_at: Option<String>,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl Product {
    /// The image shown on the product card.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Price text, or `None` if absent or blank.
    #[must_use]
    pub fn display_price(&self) -> Option<&str> {
        self.price.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Accept a JSON string, number or null as optional text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number for price, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_json() -> serde_json::Value {
        json!({
            "id": "B07XYZ",
            "title": "Red Wrap Dress",
            "average_rating": 4.5,
            "rating_number": 120,
            "description": null,
            "imageUrls": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
            "price": "39.99",
            "store": "Acme",
            "createdAt": "2024-05-01T10:00:00",
            "modifiedAt": "2024-05-02T10:00:00",
            "similarity": 0.82
        })
    }

    #[test]
    fn test_deserialize_service_record() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.title, "Red Wrap Dress");
        assert_eq!(product.rating_number, Some(120));
        assert_eq!(product.primary_image(), Some("https://img.example/1.jpg"));
        assert_eq!(product.display_price(), Some("39.99"));
        assert_eq!(product.created_at.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn test_numeric_price_is_accepted() {
        let mut value = product_json();
        value["price"] = json!(12.5);
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.price.as_deref(), Some("12.5"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let product: Product =
            serde_json::from_value(json!({"id": "1", "title": "Plain tee", "imageUrls": []}))
                .unwrap();
        assert_eq!(product.average_rating, None);
        assert_eq!(product.display_price(), None);
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_blank_price_is_not_displayed() {
        let mut value = product_json();
        value["price"] = json!("  ");
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.display_price(), None);
    }

    #[test]
    fn test_invalid_price_type_is_an_error() {
        let mut value = product_json();
        value["price"] = json!(["39.99"]);
        assert!(serde_json::from_value::<Product>(value).is_err());
    }
}
