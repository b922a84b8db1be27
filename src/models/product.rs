use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeStruct};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub qty: i64,
}

// The wire shape is fixed to exactly these five fields, in this order.
impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Product", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("qty", &self.qty)?;
        state.end()
    }
}

/// Body of `POST /product` and `PUT /product/{id}`. Every field is required;
/// an update overwrites the whole row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "finite_price")]
    pub price: f64,
    pub qty: i64,
}

// SQLite turns NaN into NULL and infinities serialize as null.
fn finite_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(deserializer)?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(de::Error::custom("price must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_serializes_to_exact_field_set() {
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: 9.99,
            qty: 5,
        };

        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(
            value,
            json!({"id": 1, "name": "Widget", "description": "A widget", "price": 9.99, "qty": 5})
        );
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn request_rejects_missing_fields() {
        let result = serde_json::from_value::<ProductRequest>(json!({
            "name": "Widget",
            "description": "A widget",
            "price": 9.99
        }));

        assert!(result.is_err());
    }
}
