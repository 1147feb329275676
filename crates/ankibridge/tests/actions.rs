//! Tests for the typed action groups.

mod common;

use std::collections::HashMap;

use ankibridge::{AnkiClient, NoteBuilder};
use common::{mock_action, mock_action_with_params, mock_anki_response, setup_mock_server};
use serde_json::json;

#[tokio::test]
async fn test_cards_info() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action(
        &server,
        "cardsInfo",
        mock_anki_response(vec![json!({
            "cardId": 1498938915662_i64,
            "note": 1502098034048_i64,
            "deckName": "Default",
            "modelName": "Basic",
            "type": 2,
            "queue": 2,
            "due": 120,
            "interval": 16,
            "factor": 2500,
            "reps": 8,
            "lapses": 1
        })]),
    )
    .await;

    let cards = client.cards().info(&[1498938915662]).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].note_id, 1502098034048);
    assert_eq!(cards[0].ease_factor, 2500);
    assert_eq!(cards[0].interval, 16);
    assert!(cards[0].is_review());
    assert!(!cards[0].is_suspended());
}

#[tokio::test]
async fn test_ease_factors() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action_with_params(
        &server,
        "getEaseFactors",
        json!({ "cards": [1, 2] }),
        mock_anki_response(vec![2500_i64, 1300]),
    )
    .await;

    let eases = client.cards().ease_factors(&[1, 2]).await.unwrap();
    assert_eq!(eases, vec![2500, 1300]);
}

#[tokio::test]
async fn test_deck_exists() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action(
        &server,
        "deckNames",
        mock_anki_response(vec!["Default", "Japanese"]),
    )
    .await;

    assert!(client.decks().exists("Japanese").await.unwrap());
}

#[tokio::test]
async fn test_cards_reviewed_by_day() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action(
        &server,
        "getNumCardsReviewedByDay",
        mock_anki_response(vec![("2024-01-16", 25_i64), ("2024-01-15", 30_i64)]),
    )
    .await;

    let by_day = client.statistics().cards_reviewed_by_day().await.unwrap();
    assert_eq!(by_day.len(), 2);
    assert_eq!(by_day[0], ("2024-01-16".to_string(), 25));
}

#[tokio::test]
async fn test_reviews_for_cards() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action(
        &server,
        "getReviewsOfCards",
        mock_anki_response(json!({
            "1653772912146": [
                {"id": 1653772965429_i64, "usn": -1, "ease": 1, "ivl": -60, "lastIvl": -60,
                 "factor": 0, "time": 4581, "type": 0},
                {"id": 1653772978874_i64, "usn": -1, "ease": 3, "ivl": 1, "lastIvl": -60,
                 "factor": 2500, "time": 3000, "type": 0}
            ]
        })),
    )
    .await;

    let reviews = client
        .statistics()
        .reviews_for_cards(&[1653772912146])
        .await
        .unwrap();
    let entries = &reviews["1653772912146"];
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].ease, 1);
    assert_eq!(entries[1].interval, 1);
}

#[tokio::test]
async fn test_add_note() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action_with_params(
        &server,
        "addNote",
        json!({ "note": { "deckName": "Default", "modelName": "Basic", "tags": ["greeting"] } }),
        mock_anki_response(1496198395707_i64),
    )
    .await;

    let note = NoteBuilder::new("Default", "Basic")
        .field("Front", "Hello")
        .field("Back", "World")
        .tag("greeting")
        .build();
    assert_eq!(client.notes().add(&note).await.unwrap(), 1496198395707);
}

#[tokio::test]
async fn test_update_fields() {
    let server = setup_mock_server().await;
    let client = AnkiClient::builder().url(server.uri()).build();

    mock_action_with_params(
        &server,
        "updateNoteFields",
        json!({ "note": { "id": 42, "fields": { "Back": "new" } } }),
        mock_anki_response(()),
    )
    .await;

    let fields = HashMap::from([("Back".to_string(), "new".to_string())]);
    client.notes().update_fields(42, &fields).await.unwrap();
}
