//! Tests for single and bulk card creation.

mod common;

use cardlink_engine::{BulkOptions, BulkRequest, CardRequest, CardType, Error};
use common::{
    engine_for_mock, mock_action, mock_action_times, mock_action_with_params, mock_anki_error,
    mock_anki_response, setup_mock_server, write_media,
};

#[tokio::test]
async fn test_add_card_with_media() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let clip = write_media(&dir, "clip.mp3", b"hello");

    mock_action_with_params(
        &server,
        "storeMediaFile",
        serde_json::json!({"filename": "clip.mp3", "data": "aGVsbG8="}),
        mock_anki_response("clip.mp3"),
        1,
    )
    .await;
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {
            "deckName": "Spanish",
            "modelName": "Basic",
            "fields": {"Front": "Listen: [sound:clip.mp3]", "Back": "hello"},
            "tags": ["audio"]
        }}),
        mock_anki_response(42_i64),
        1,
    )
    .await;

    let engine = engine_for_mock(&server);
    let card = CardRequest::new("Listen: {clip.mp3}", "hello")
        .tags(["audio"])
        .media([clip]);
    let added = engine.cards().add("Spanish", &card).await.unwrap();

    assert_eq!(added.note_id, 42);
    assert_eq!(added.deck_name, "Spanish");
    assert_eq!(added.stored_media, vec!["clip.mp3"]);
}

#[tokio::test]
async fn test_add_card_skips_missing_media() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let pic = write_media(&dir, "pic.png", b"\x89PNG");
    let missing = dir.path().join("gone.mp3").to_string_lossy().into_owned();

    mock_action(&server, "storeMediaFile", mock_anki_response("pic.png")).await;
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {
            "fields": {"Front": "{gone.mp3} <img src=\"pic.png\">"}
        }}),
        mock_anki_response(7_i64),
        1,
    )
    .await;

    let engine = engine_for_mock(&server);
    let card = CardRequest::new("{gone.mp3} {pic.png}", "back").media([missing, pic]);
    let added = engine.cards().add("Deck", &card).await.unwrap();

    assert_eq!(added.stored_media, vec!["pic.png"]);
}

#[tokio::test]
async fn test_add_card_uses_model_for_card_type() {
    let server = setup_mock_server().await;
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {
            "modelName": "Basic (and reversed card)",
            "fields": {"Front": "Q", "Back": "A", "Note": "context"}
        }}),
        mock_anki_response(3_i64),
        1,
    )
    .await;

    let engine = engine_for_mock(&server);
    let card = CardRequest::new("Q", "A")
        .card_type(CardType::Reverse)
        .note("context");
    let added = engine.cards().add("Deck", &card).await.unwrap();
    assert_eq!(added.note_id, 3);
    assert!(added.stored_media.is_empty());
}

#[tokio::test]
async fn test_add_card_remote_failure() {
    let server = setup_mock_server().await;
    mock_action(&server, "addNote", mock_anki_error("deck was not found")).await;

    let engine = engine_for_mock(&server);
    let result = engine
        .cards()
        .add("Nope", &CardRequest::new("Q", "A"))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), "anki_connect");
    assert!(err.to_string().contains("deck was not found"));
}

#[tokio::test]
async fn test_bulk_missing_media_creates_nothing() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let present = write_media(&dir, "ok.mp3", b"ok");
    let gone_a = dir.path().join("a.mp3").to_string_lossy().into_owned();
    let gone_b = dir.path().join("b.png").to_string_lossy().into_owned();

    mock_action_times(&server, "storeMediaFile", mock_anki_response("x"), 0).await;
    mock_action_times(&server, "addNote", mock_anki_response(1_i64), 0).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![CardRequest::new("Q1", "A1"), CardRequest::new("Q2", "A2")],
        media: vec![gone_a.clone(), present, gone_b.clone()],
        ..Default::default()
    };

    match engine.cards().add_bulk(&request).await {
        Err(Error::MissingMedia(paths)) => assert_eq!(paths, vec![gone_a, gone_b]),
        other => panic!("expected MissingMedia, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bulk_directory_counts_as_missing() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let dir_path = dir.path().to_string_lossy().into_owned();

    mock_action_times(&server, "storeMediaFile", mock_anki_response("x"), 0).await;
    mock_action_times(&server, "addNote", mock_anki_response(1_i64), 0).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![CardRequest::new("Q", "A")],
        media: vec![dir_path.clone()],
        ..Default::default()
    };

    let err = engine.cards().add_bulk(&request).await.unwrap_err();
    assert!(matches!(err, Error::MissingMedia(paths) if paths == vec![dir_path]));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_bulk_unreadable_media_creates_nothing() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let good = write_media(&dir, "good.mp3", b"ok");

    mock_action_times(&server, "storeMediaFile", mock_anki_response("x"), 0).await;
    mock_action_times(&server, "addNote", mock_anki_response(1_i64), 0).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![CardRequest::new("{good.mp3}", "A")],
        media: vec![good, "/proc/self/mem".to_string()],
        ..Default::default()
    };

    match engine.cards().add_bulk(&request).await {
        Err(Error::MissingMedia(paths)) => assert_eq!(paths, vec!["/proc/self/mem"]),
        other => panic!("expected MissingMedia, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bulk_failure_is_isolated() {
    let server = setup_mock_server().await;

    // The second card is rejected; the others go through.
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {"fields": {"Front": "dup"}}}),
        mock_anki_error("cannot create note because it is a duplicate"),
        1,
    )
    .await;
    mock_action_times(&server, "addNote", mock_anki_response(100_i64), 2).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![
            CardRequest::new("one", "1"),
            CardRequest::new("dup", "2"),
            CardRequest::new("three", "3"),
        ],
        ..Default::default()
    };
    let result = engine.cards().add_bulk(&request).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.summary.total, 3);
    assert_eq!(result.summary.successful, 2);
    assert_eq!(result.summary.failed, 1);
    assert_eq!(result.per_card_results.len(), 3);

    let indices: Vec<_> = result.per_card_results.iter().map(|r| r.card_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert!(result.per_card_results[0].success);
    assert_eq!(result.per_card_results[0].note_id, Some(100));
    assert!(!result.per_card_results[1].success);
    assert!(
        result.per_card_results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("duplicate")
    );
    assert!(result.per_card_results[2].success);
}

#[tokio::test]
async fn test_bulk_shares_media_and_forces_basic() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let clip = write_media(&dir, "clip.mp3", b"hello");
    let pic = write_media(&dir, "pic.PNG", b"png");

    mock_action_times(&server, "storeMediaFile", mock_anki_response("stored"), 2).await;
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {
            "deckName": "Deck",
            "modelName": "Basic",
            "fields": {"Front": "[sound:clip.mp3]", "Back": "<img src=\"pic.PNG\">"},
            "options": {"allowDuplicate": true}
        }}),
        mock_anki_response(1_i64),
        1,
    )
    .await;
    mock_action_with_params(
        &server,
        "addNote",
        serde_json::json!({"note": {
            "modelName": "Basic",
            "fields": {"Front": "again [sound:clip.mp3]", "Back": "plain"}
        }}),
        mock_anki_response(2_i64),
        1,
    )
    .await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![
            CardRequest::new("{clip.mp3}", "{pic.PNG}").card_type(CardType::Cloze),
            CardRequest::new("again {clip.mp3}", "plain").card_type(CardType::Reverse),
        ],
        media: vec![clip, pic],
        options: BulkOptions {
            allow_duplicates: Some(true),
        },
    };
    let result = engine.cards().add_bulk(&request).await.unwrap();

    assert!(result.success);
    assert_eq!(result.stored_media, vec!["clip.mp3", "pic.PNG"]);
    assert_eq!(result.summary.successful, 2);
}

#[tokio::test]
async fn test_bulk_upload_failure_aborts_before_cards() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let clip = write_media(&dir, "clip.mp3", b"hello");

    mock_action(&server, "storeMediaFile", mock_anki_error("disk full")).await;
    mock_action_times(&server, "addNote", mock_anki_response(1_i64), 0).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        cards: vec![CardRequest::new("Q", "A")],
        media: vec![clip],
        ..Default::default()
    };

    let err = engine.cards().add_bulk(&request).await.unwrap_err();
    assert_eq!(err.kind(), "media_upload");
}

#[tokio::test]
async fn test_bulk_empty_request() {
    let server = setup_mock_server().await;
    mock_action_times(&server, "addNote", mock_anki_response(1_i64), 0).await;

    let engine = engine_for_mock(&server);
    let request = BulkRequest {
        deck_name: "Deck".to_string(),
        ..Default::default()
    };
    let result = engine.cards().add_bulk(&request).await.unwrap();

    assert!(result.success);
    assert_eq!(result.summary.total, 0);
    assert!(result.per_card_results.is_empty());
}
