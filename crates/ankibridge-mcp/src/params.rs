//! Tool parameter types and their JSON schemas.
//!
//! Structured parameters are declared as raw [`Value`]s and resolved in the
//! tool body through `ankibridge_stats::coerce`, so callers may send either
//! the native shape or a JSON string holding it. The schema helpers below
//! advertise both forms as `anyOf [native, string]`.

use rmcp::schemars::{self, JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::Deserialize;
use serde_json::Value;

/// Most decks accepted by a single `get_deck_statistics` call.
pub const MAX_DECKS: usize = 20;

/// Most cards accepted by a single `get_cards_info` call.
pub const MAX_CARD_IDS: usize = 100;

// ============================================================================
// Schema Helpers
// ============================================================================

/// `anyOf [native, string]` for a parameter that may arrive JSON-encoded.
fn or_json_string(native: Schema, encoded: &str) -> Schema {
    json_schema!({
        "anyOf": [
            native,
            {
                "type": "string",
                "description": format!("{} encoded as a JSON string", encoded)
            }
        ]
    })
}

fn array_or_string<T: JsonSchema>(
    generator: &mut SchemaGenerator,
    min: Option<usize>,
    max: Option<usize>,
) -> Schema {
    let mut native = json_schema!({
        "type": "array",
        "items": generator.subschema_for::<T>()
    });
    if let Some(min) = min {
        native.insert("minItems".to_string(), min.into());
    }
    if let Some(max) = max {
        native.insert("maxItems".to_string(), max.into());
    }
    or_json_string(native, "An array")
}

fn decks_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<String>(generator, Some(1), Some(MAX_DECKS))
}

fn card_ids_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<i64>(generator, Some(1), Some(MAX_CARD_IDS))
}

fn numbers_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<f64>(generator, None, None)
}

fn ratings_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<i64>(generator, None, None)
}

fn tags_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<String>(generator, None, None)
}

fn days_schema(generator: &mut SchemaGenerator) -> Schema {
    array_or_string::<DayEntry>(generator, None, None)
}

fn string_record_schema(_: &mut SchemaGenerator) -> Schema {
    or_json_string(
        json_schema!({
            "type": "object",
            "additionalProperties": {"type": "string"}
        }),
        "An object",
    )
}

fn note_options_schema(_: &mut SchemaGenerator) -> Schema {
    or_json_string(
        json_schema!({
            "type": "object",
            "properties": {
                "allowDuplicate": {"type": "boolean"},
                "duplicateScope": {"type": "string", "enum": ["deck", "collection"]}
            }
        }),
        "An object",
    )
}

fn lenient_object_schema(_: &mut SchemaGenerator) -> Schema {
    or_json_string(json_schema!({"type": "object"}), "An object")
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeckParams {
    /// Deck name
    pub deck: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RetentionParams {
    /// Deck name
    pub deck: String,
    /// Number of days to look back (default: 30)
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeckStatisticsParams {
    /// Deck names to analyze (1-20)
    #[schemars(schema_with = "decks_schema")]
    pub decks: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CardsInfoParams {
    /// Card IDs to look up (1-100)
    #[schemars(schema_with = "card_ids_schema")]
    pub card_ids: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ComputeDistributionParams {
    /// Values to summarize
    #[schemars(schema_with = "numbers_schema")]
    pub values: Value,
    /// Strictly ascending bucket boundaries
    #[schemars(schema_with = "numbers_schema")]
    pub boundaries: Value,
    /// Unit appended to each bucket label (e.g. "d")
    #[serde(default)]
    pub unit_suffix: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ComputeRetentionParams {
    /// Review ratings: 1 = Again, 2 = Hard, 3 = Good, 4 = Easy
    #[schemars(schema_with = "ratings_schema")]
    pub ratings: Value,
}

/// Review count for one calendar day.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DayEntry {
    /// Date as YYYY-MM-DD
    pub date: String,
    /// Number of reviews that day
    pub count: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CalculateStreakParams {
    /// Per-day review counts, in any order
    #[schemars(schema_with = "days_schema")]
    pub days: Value,
    /// Day the streak ends on, as YYYY-MM-DD (default: today)
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddNoteParams {
    /// Deck name to add the note to
    pub deck: String,
    /// Note type (model) name
    pub model: String,
    /// Field values (field_name -> value)
    #[schemars(schema_with = "string_record_schema")]
    pub fields: Value,
    /// Optional tags
    #[serde(default)]
    #[schemars(schema_with = "tags_schema")]
    pub tags: Option<Value>,
    /// Duplicate handling options
    #[serde(default)]
    #[schemars(schema_with = "note_options_schema")]
    pub options: Option<Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNoteFieldsParams {
    /// Note ID to update
    pub note_id: i64,
    /// Field values to update (field_name -> value)
    #[schemars(schema_with = "string_record_schema")]
    pub fields: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InvokeActionParams {
    /// AnkiConnect action name (e.g. "findNotes")
    pub action: String,
    /// Action parameters
    #[serde(default)]
    #[schemars(schema_with = "lenient_object_schema")]
    pub params: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_of<T: JsonSchema>() -> Value {
        serde_json::to_value(schemars::schema_for!(T)).unwrap()
    }

    #[test]
    fn test_array_params_accept_native_or_string() {
        let schema = schema_of::<CardsInfoParams>();
        let any_of = schema["properties"]["card_ids"]["anyOf"].as_array().unwrap();

        assert_eq!(any_of.len(), 2);
        assert_eq!(any_of[0]["type"], "array");
        assert_eq!(any_of[0]["minItems"], 1);
        assert_eq!(any_of[0]["maxItems"], MAX_CARD_IDS);
        assert_eq!(any_of[1]["type"], "string");
    }

    #[test]
    fn test_record_schema() {
        let schema = schema_of::<UpdateNoteFieldsParams>();
        let native = &schema["properties"]["fields"]["anyOf"][0];

        assert_eq!(native["type"], "object");
        assert_eq!(native["additionalProperties"], json!({"type": "string"}));
    }

    #[test]
    fn test_optional_params_are_not_required() {
        let schema = schema_of::<AddNoteParams>();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert!(required.contains(&"fields"));
        assert!(!required.contains(&"tags"));
        assert!(!required.contains(&"options"));
    }

    #[test]
    fn test_retention_days_default() {
        let params: RetentionParams = serde_json::from_value(json!({"deck": "Default"})).unwrap();
        assert_eq!(params.days, 30);
    }

    #[test]
    fn test_string_encoded_params_deserialize_as_values() {
        let params: DeckStatisticsParams =
            serde_json::from_value(json!({"decks": "[\"Default\"]"})).unwrap();
        assert_eq!(params.decks, json!("[\"Default\"]"));
    }
}
