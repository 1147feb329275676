//! Tool router exposing AnkiConnect and the statistics engine over MCP.

use std::collections::HashMap;
use std::sync::Arc;

use ankibridge_stats::analyze::StreakReport;
use ankibridge_stats::coerce::{
    ArrayBounds, ValidationError, array_param, lenient_param, object_param, record_param,
};
use ankibridge_stats::stats::{BucketConfig, DailyCount, compute_distribution, compute_retention};
use ankibridge_stats::{AnkiClient, Engine, NoteBuilder, NoteOptions};
use chrono::{Local, NaiveDate};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::params::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Error Mapping
// ============================================================================

fn invalid_params(e: ValidationError) -> McpError {
    debug!(param = %e.param, "Rejected tool parameter: {}", e.message);
    McpError::invalid_params(e.to_string(), None)
}

fn client_error(e: ankibridge::Error) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

fn engine_error(e: ankibridge_stats::Error) -> McpError {
    match e {
        ankibridge_stats::Error::Client(e) => client_error(e),
        other => McpError::invalid_params(other.to_string(), None),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn parse_date(text: &str, param: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        ValidationError::new(param, format!("'{}' is not a YYYY-MM-DD date: {}", text, e))
    })
}

// ============================================================================
// Server Implementation
// ============================================================================

#[derive(Clone)]
pub struct AnkiServer {
    engine: Arc<Engine>,
    tool_router: ToolRouter<AnkiServer>,
    read_only: bool,
}

impl AnkiServer {
    pub fn new(client: AnkiClient, read_only: bool) -> Self {
        Self {
            engine: Arc::new(Engine::from_client(client)),
            tool_router: Self::tool_router(),
            read_only,
        }
    }

    fn check_write(&self, operation: &str) -> Result<(), McpError> {
        if self.read_only {
            warn!("Blocked write operation in read-only mode: {}", operation);
            Err(McpError::invalid_request(
                format!(
                    "Write operation '{}' is not allowed in read-only mode",
                    operation
                ),
                None,
            ))
        } else {
            Ok(())
        }
    }
}

#[tool_router]
impl AnkiServer {
    // ========================================================================
    // Raw API Tools
    // ========================================================================

    #[tool(description = "Get the AnkiConnect API version. Useful to check that Anki is reachable.")]
    async fn version(&self) -> Result<CallToolResult, McpError> {
        let version = self
            .engine
            .client()
            .misc()
            .version()
            .await
            .map_err(client_error)?;

        json_result(&serde_json::json!({ "version": version }))
    }

    #[tool(description = "List all deck names.")]
    async fn list_decks(&self) -> Result<CallToolResult, McpError> {
        let decks = self
            .engine
            .client()
            .decks()
            .names()
            .await
            .map_err(client_error)?;

        debug!(count = decks.len(), "Listed decks");
        json_result(&decks)
    }

    #[tool(
        description = "Get detailed info (type, queue, interval, ease, reps, lapses) for up to 100 cards."
    )]
    async fn get_cards_info(
        &self,
        Parameters(params): Parameters<CardsInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let card_ids: Vec<i64> = array_param(
            params.card_ids,
            "card_ids",
            ArrayBounds::between(1, MAX_CARD_IDS),
        )
        .map_err(invalid_params)?;
        debug!(count = card_ids.len(), "Getting card info");

        let cards = self
            .engine
            .client()
            .cards()
            .info(&card_ids)
            .await
            .map_err(client_error)?;

        json_result(&cards)
    }

    #[tool(description = "Add a single flashcard note to Anki. Returns the new note ID.")]
    async fn add_note(
        &self,
        Parameters(params): Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("add_note")?;

        let fields: HashMap<String, String> =
            lenient_param(params.fields, "fields").map_err(invalid_params)?;
        let tags: Vec<String> = match params.tags {
            Some(tags) => array_param(tags, "tags", ArrayBounds::UNBOUNDED).map_err(invalid_params)?,
            None => Vec::new(),
        };
        let options: Option<NoteOptions> = params
            .options
            .map(|options| object_param(options, "options"))
            .transpose()
            .map_err(invalid_params)?;

        debug!(deck = %params.deck, model = %params.model, "Adding note");

        let mut builder = NoteBuilder::new(&params.deck, &params.model)
            .fields(fields)
            .tags(tags);
        if let Some(options) = options {
            builder = builder.options(options);
        }

        let note_id = self
            .engine
            .client()
            .notes()
            .add(&builder.build())
            .await
            .map_err(client_error)?;

        info!(note_id, "Note created");
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Created note with ID: {}",
            note_id
        ))]))
    }

    #[tool(description = "Update field values of an existing note. Fields not given are left unchanged.")]
    async fn update_note_fields(
        &self,
        Parameters(params): Parameters<UpdateNoteFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("update_note_fields")?;

        let fields = record_param(params.fields, "fields").map_err(invalid_params)?;
        debug!(note_id = params.note_id, fields = fields.len(), "Updating note");

        self.engine
            .client()
            .notes()
            .update_fields(params.note_id, &fields)
            .await
            .map_err(client_error)?;

        info!(note_id = params.note_id, "Note updated");
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Updated {} field(s) on note {}",
            fields.len(),
            params.note_id
        ))]))
    }

    #[tool(
        description = "Call any AnkiConnect action with the given params and return its raw result. Prefer the dedicated tools where one exists."
    )]
    async fn invoke_action(
        &self,
        Parameters(params): Parameters<InvokeActionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("invoke_action")?;

        let action_params = params
            .params
            .map(|value| lenient_param::<Map<String, Value>>(value, "params"))
            .transpose()
            .map_err(invalid_params)?
            .map(Value::Object);

        info!(action = %params.action, "Invoking raw action");
        let result = self
            .engine
            .client()
            .invoke(&params.action, action_params)
            .await
            .map_err(client_error)?;

        json_result(&result)
    }

    // ========================================================================
    // Analysis Tools
    // ========================================================================

    #[tool(
        description = "Get the distribution of ease factors (2.5 = 250%) for studied cards in a deck: mean, median, min, max and bucket counts."
    )]
    async fn get_ease_distribution(
        &self,
        Parameters(params): Parameters<DeckParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck = %params.deck, "Getting ease distribution");

        let metrics = self
            .engine
            .analyze()
            .ease_distribution(&params.deck)
            .await
            .map_err(engine_error)?;

        json_result(&metrics)
    }

    #[tool(
        description = "Get the distribution of review intervals (days) for studied cards in a deck: mean, median, min, max and bucket counts."
    )]
    async fn get_interval_distribution(
        &self,
        Parameters(params): Parameters<DeckParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck = %params.deck, "Getting interval distribution");

        let metrics = self
            .engine
            .analyze()
            .interval_distribution(&params.deck)
            .await
            .map_err(engine_error)?;

        json_result(&metrics)
    }

    #[tool(
        description = "Get retention (fraction of reviews not answered Again) for a deck over the last N days, with counts per rating."
    )]
    async fn get_retention_stats(
        &self,
        Parameters(params): Parameters<RetentionParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck = %params.deck, days = params.days, "Getting retention stats");

        let report = self
            .engine
            .analyze()
            .retention(&params.deck, params.days)
            .await
            .map_err(engine_error)?;

        json_result(&report)
    }

    #[tool(
        description = "Get the current study streak (consecutive days with reviews ending today), active days and total reviews."
    )]
    async fn get_study_streak(&self) -> Result<CallToolResult, McpError> {
        let report = self
            .engine
            .analyze()
            .study_streak()
            .await
            .map_err(engine_error)?;

        json_result(&report)
    }

    #[tool(
        description = "Get card counts by state plus ease and interval distributions for one or more decks (max 20)."
    )]
    async fn get_deck_statistics(
        &self,
        Parameters(params): Parameters<DeckStatisticsParams>,
    ) -> Result<CallToolResult, McpError> {
        let decks: Vec<String> =
            array_param(params.decks, "decks", ArrayBounds::between(1, MAX_DECKS))
                .map_err(invalid_params)?;
        debug!(count = decks.len(), "Getting deck statistics");

        let mut results = Vec::with_capacity(decks.len());
        for deck in &decks {
            let stats = self
                .engine
                .analyze()
                .deck_statistics(deck)
                .await
                .map_err(engine_error)?;
            results.push(stats);
        }

        json_result(&results)
    }

    // ========================================================================
    // Calculation Tools
    // ========================================================================

    #[tool(
        description = "Summarize a list of numbers: mean, median, min, max and counts per bucket between the given ascending boundaries."
    )]
    async fn compute_distribution(
        &self,
        Parameters(params): Parameters<ComputeDistributionParams>,
    ) -> Result<CallToolResult, McpError> {
        let values: Vec<f64> = array_param(params.values, "values", ArrayBounds::UNBOUNDED)
            .map_err(invalid_params)?;
        let boundaries: Vec<f64> =
            array_param(params.boundaries, "boundaries", ArrayBounds::UNBOUNDED)
                .map_err(invalid_params)?;

        let mut config = BucketConfig::new(boundaries)
            .map_err(|e| invalid_params(ValidationError::new("boundaries", e.to_string())))?;
        if let Some(suffix) = params.unit_suffix {
            config = config.with_unit_suffix(suffix);
        }

        json_result(&compute_distribution(&values, &config))
    }

    #[tool(
        description = "Compute retention from review ratings (1 = Again, 2 = Hard, 3 = Good, 4 = Easy). Other values are ignored."
    )]
    async fn compute_retention(
        &self,
        Parameters(params): Parameters<ComputeRetentionParams>,
    ) -> Result<CallToolResult, McpError> {
        let ratings: Vec<i64> = array_param(params.ratings, "ratings", ArrayBounds::UNBOUNDED)
            .map_err(invalid_params)?;

        json_result(&compute_retention(&ratings))
    }

    #[tool(
        description = "Calculate a study streak from per-day review counts ({date: YYYY-MM-DD, count}). The streak ends today unless 'today' is given."
    )]
    async fn calculate_streak(
        &self,
        Parameters(params): Parameters<CalculateStreakParams>,
    ) -> Result<CallToolResult, McpError> {
        let entries: Vec<DayEntry> = array_param(params.days, "days", ArrayBounds::UNBOUNDED)
            .map_err(invalid_params)?;

        let series = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                parse_date(&entry.date, "days")
                    .map(|date| DailyCount::new(date, entry.count))
                    .map_err(|e| ValidationError::new("days", format!("item {}: {}", index, e.message)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_params)?;

        let today = match params.today.as_deref() {
            Some(text) => parse_date(text, "today").map_err(invalid_params)?,
            None => Local::now().date_naive(),
        };

        json_result(&StreakReport::from_series(&series, today))
    }
}

#[tool_handler]
impl ServerHandler for AnkiServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.read_only { " (read-only)" } else { "" };
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Anki review statistics via AnkiConnect{}. \
                 Requires Anki to be running with the AnkiConnect add-on installed. \
                 Array and object parameters may be passed natively or as JSON strings. \
                 Tools: get_study_streak, get_retention_stats, get_deck_statistics, \
                 get_ease_distribution, compute_distribution, add_note, and more.",
                mode
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_action(server: &MockServer, body: Value, result: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": result,
                "error": null
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn server_for(mock: &MockServer, read_only: bool) -> AnkiServer {
        AnkiServer::new(AnkiClient::builder().url(mock.uri()).build(), read_only)
    }

    fn offline(read_only: bool) -> AnkiServer {
        AnkiServer::new(AnkiClient::builder().url("http://127.0.0.1:1").build(), read_only)
    }

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    fn json_of(result: &CallToolResult) -> Value {
        serde_json::from_str(&text_of(result)).unwrap()
    }

    #[tokio::test]
    async fn test_cards_info_accepts_string_encoded_ids() {
        let mock = MockServer::start().await;
        mock_action(
            &mock,
            json!({"action": "cardsInfo", "params": {"cards": [1, 2]}}),
            json!([{"cardId": 1}, {"cardId": 2}]),
        )
        .await;

        let server = server_for(&mock, true);
        let result = server
            .get_cards_info(Parameters(CardsInfoParams {
                card_ids: json!("[1, 2]"),
            }))
            .await
            .unwrap();

        assert_eq!(json_of(&result).as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cards_info_bounds() {
        let err = offline(true)
            .get_cards_info(Parameters(CardsInfoParams { card_ids: json!([]) }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("card_ids"));

        let too_many: Vec<i64> = (0..=MAX_CARD_IDS as i64).collect();
        let err = offline(true)
            .get_cards_info(Parameters(CardsInfoParams {
                card_ids: json!(too_many),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_write_tools_blocked_in_read_only_mode() {
        let server = offline(true);

        let err = server
            .update_note_fields(Parameters(UpdateNoteFieldsParams {
                note_id: 1,
                fields: json!({"Front": "x"}),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);

        let err = server
            .invoke_action(Parameters(InvokeActionParams {
                action: "deckNames".to_string(),
                params: None,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_add_note_with_smart_quoted_fields() {
        let mock = MockServer::start().await;
        mock_action(
            &mock,
            json!({
                "action": "addNote",
                "params": {"note": {
                    "deckName": "Japanese",
                    "modelName": "Basic",
                    "fields": {"Front": "食べる", "Back": "to eat"},
                    "tags": ["verb"],
                    "options": {"allowDuplicate": true}
                }}
            }),
            json!(1496198395707_i64),
        )
        .await;

        let server = server_for(&mock, false);
        let result = server
            .add_note(Parameters(AddNoteParams {
                deck: "Japanese".to_string(),
                model: "Basic".to_string(),
                fields: json!("{\u{201C}Front\u{201D}: \u{201C}食べる\u{201D}, \u{201C}Back\u{201D}: \u{201C}to eat\u{201D}}"),
                tags: Some(json!("[\"verb\"]")),
                options: Some(json!({"allowDuplicate": true})),
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), "Created note with ID: 1496198395707");
    }

    #[tokio::test]
    async fn test_update_note_fields_rejects_non_string_values() {
        let err = offline(false)
            .update_note_fields(Parameters(UpdateNoteFieldsParams {
                note_id: 1,
                fields: json!("{\"Front\": 3}"),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Invalid parameter 'fields'"));
    }

    #[tokio::test]
    async fn test_invoke_action_forwards_params() {
        let mock = MockServer::start().await;
        mock_action(
            &mock,
            json!({"action": "findNotes", "params": {"query": "deck:Default"}}),
            json!([10, 11]),
        )
        .await;

        let server = server_for(&mock, false);
        let result = server
            .invoke_action(Parameters(InvokeActionParams {
                action: "findNotes".to_string(),
                params: Some(json!("{\"query\": \"deck:Default\"}")),
            }))
            .await
            .unwrap();

        assert_eq!(json_of(&result), json!([10, 11]));
    }

    #[tokio::test]
    async fn test_client_failures_are_internal_errors() {
        let err = offline(false).list_decks().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_deck_is_invalid_params() {
        let mock = MockServer::start().await;
        mock_action(&mock, json!({"action": "deckNames"}), json!(["Default"])).await;

        let err = server_for(&mock, true)
            .get_ease_distribution(Parameters(DeckParams {
                deck: "Missing".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Missing"));
    }

    #[tokio::test]
    async fn test_compute_distribution() {
        let result = offline(true)
            .compute_distribution(Parameters(ComputeDistributionParams {
                values: json!("[1, 5, 12, 40]"),
                boundaries: json!([7, 21]),
                unit_suffix: Some("d".to_string()),
            }))
            .await
            .unwrap();

        let metrics = json_of(&result);
        assert_eq!(metrics["count"], 4);
        assert_eq!(metrics["buckets"]["<7d"], 2);
        assert_eq!(metrics["buckets"]["7-21d"], 1);
        assert_eq!(metrics["buckets"][">21d"], 1);
    }

    #[tokio::test]
    async fn test_compute_distribution_rejects_unsorted_boundaries() {
        let err = offline(true)
            .compute_distribution(Parameters(ComputeDistributionParams {
                values: json!([1]),
                boundaries: json!([21, 7]),
                unit_suffix: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("'boundaries'"));
    }

    #[tokio::test]
    async fn test_compute_retention() {
        let result = offline(true)
            .compute_retention(Parameters(ComputeRetentionParams {
                ratings: json!([1, 3, 3, 4, 9]),
            }))
            .await
            .unwrap();

        let metrics = json_of(&result);
        assert_eq!(metrics["overall"], 0.75);
        assert_eq!(metrics["by_rating"]["again"], 1);
    }

    #[tokio::test]
    async fn test_calculate_streak() {
        let result = offline(true)
            .calculate_streak(Parameters(CalculateStreakParams {
                days: json!(r#"[
                    {"date": "2024-03-10", "count": 4},
                    {"date": "2024-03-08", "count": 2},
                    {"date": "2024-03-09", "count": 1}
                ]"#),
                today: Some("2024-03-10".to_string()),
            }))
            .await
            .unwrap();

        let report = json_of(&result);
        assert_eq!(report["current_streak"], 3);
        assert_eq!(report["total_reviews"], 7);
        assert_eq!(report["last_active"], "2024-03-10");
    }

    #[tokio::test]
    async fn test_calculate_streak_bad_date() {
        let err = offline(true)
            .calculate_streak(Parameters(CalculateStreakParams {
                days: json!([{"date": "03/10/2024", "count": 1}]),
                today: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("item 0"));
    }
}
