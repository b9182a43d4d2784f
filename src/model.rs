use log::{debug, error};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::FormError;

/// Payload posted to the recipe service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,
}

/// Structured recipe returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(
        rename = "porcionamento",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub servings: Option<String>,
    #[serde(
        rename = "tempo_de_preparo",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub prep_time: Option<String>,
    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,
    #[serde(rename = "modo_de_fazer")]
    pub steps: Vec<String>,
}

impl RecipeRecord {
    /// Validate a JSON value as a recipe record.
    ///
    /// The title must be a non-empty string and both lists must be arrays of
    /// strings; anything else rejects the whole record.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let record: RecipeRecord = serde_json::from_value(value.clone()).ok()?;
        if record.title.is_empty() {
            return None;
        }
        Some(record)
    }

    /// Servings text, if present and non-empty
    pub fn servings(&self) -> Option<&str> {
        self.servings.as_deref().filter(|s| !s.is_empty())
    }

    /// Preparation time text, if present and non-empty
    pub fn prep_time(&self) -> Option<&str> {
        self.prep_time.as_deref().filter(|s| !s.is_empty())
    }
}

/// Accepts strings and numbers; anything else counts as absent.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Extract the recipe record from any accepted response envelope.
///
/// Checked in order: an array whose first element is a record, a bare record,
/// an object carrying an `error` string.
pub fn normalize_envelope(payload: &Value) -> Result<RecipeRecord, FormError> {
    if let Some(first) = payload.as_array().and_then(|items| items.first()) {
        if let Some(record) = RecipeRecord::from_value(first) {
            debug!("Response is an array with a recipe at index 0");
            return Ok(record);
        }
    }

    if let Some(record) = RecipeRecord::from_value(payload) {
        debug!("Response is a bare recipe object");
        return Ok(record);
    }

    if let Some(message) = payload.get("error").and_then(Value::as_str) {
        error!("Service returned an error: {}", message);
        return Err(FormError::Api(message.to_string()));
    }

    error!("Unexpected response format: {}", payload);
    Err(FormError::UnexpectedShape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_wire_names() {
        let request = RecipeRequest {
            ingredients: vec!["ovo".to_string(), "farinha".to_string()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"ingredientes": ["ovo", "farinha"]}));
    }

    #[test]
    fn test_record_with_optional_fields() {
        let value = json!({
            "titulo": "Bolo",
            "porcionamento": "8 fatias",
            "tempo_de_preparo": "40 minutos",
            "ingredientes": ["ovo"],
            "modo_de_fazer": ["misture"]
        });
        let record = RecipeRecord::from_value(&value).unwrap();
        assert_eq!(record.title, "Bolo");
        assert_eq!(record.servings(), Some("8 fatias"));
        assert_eq!(record.prep_time(), Some("40 minutos"));
    }

    #[test]
    fn test_record_optional_fields_tolerated() {
        let value = json!({
            "titulo": "Bolo",
            "porcionamento": null,
            "tempo_de_preparo": "",
            "ingredientes": [],
            "modo_de_fazer": []
        });
        let record = RecipeRecord::from_value(&value).unwrap();
        assert_eq!(record.servings(), None);
        assert_eq!(record.prep_time(), None);
    }

    #[test]
    fn test_record_numeric_servings_becomes_text() {
        let value = json!({
            "titulo": "Bolo",
            "porcionamento": 4,
            "ingredientes": [],
            "modo_de_fazer": []
        });
        let record = RecipeRecord::from_value(&value).unwrap();
        assert_eq!(record.servings(), Some("4"));
    }

    #[test]
    fn test_record_rejects_missing_required_fields() {
        assert!(RecipeRecord::from_value(&json!({"titulo": "X", "ingredientes": []})).is_none());
        assert!(
            RecipeRecord::from_value(&json!({"ingredientes": [], "modo_de_fazer": []})).is_none()
        );
        assert!(RecipeRecord::from_value(
            &json!({"titulo": "", "ingredientes": [], "modo_de_fazer": []})
        )
        .is_none());
        assert!(RecipeRecord::from_value(
            &json!({"titulo": "X", "ingredientes": "ovo", "modo_de_fazer": []})
        )
        .is_none());
    }

    #[test]
    fn test_normalize_prefers_array_first_element() {
        let payload = json!([
            {"titulo": "Primeira", "ingredientes": [], "modo_de_fazer": []},
            {"titulo": "Segunda", "ingredientes": [], "modo_de_fazer": []}
        ]);
        let record = normalize_envelope(&payload).unwrap();
        assert_eq!(record.title, "Primeira");
    }

    #[test]
    fn test_normalize_bare_and_wrapped_are_identical() {
        let bare = json!({"titulo": "X", "ingredientes": [], "modo_de_fazer": []});
        let wrapped = json!([bare.clone()]);
        assert_eq!(
            normalize_envelope(&bare).unwrap(),
            normalize_envelope(&wrapped).unwrap()
        );
    }

    #[test]
    fn test_normalize_error_object() {
        let result = normalize_envelope(&json!({"error": "no match"}));
        assert!(matches!(result, Err(FormError::Api(ref m)) if m == "no match"));
    }

    #[test]
    fn test_normalize_unexpected_shapes() {
        for payload in [
            json!(42),
            Value::Null,
            json!([]),
            json!("texto"),
            json!({"error": 5}),
            json!([{"titulo": "X"}]),
        ] {
            assert!(matches!(
                normalize_envelope(&payload),
                Err(FormError::UnexpectedShape)
            ));
        }
    }
}
