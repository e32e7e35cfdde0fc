//! Integration tests for the Word Grid library public API

use word_grid::{
    servers::{WebApiConfig, WebApiServer},
    Dictionary, GameError, Result, WordGridError, DESCRIPTION, NAME, VERSION,
};
use word_grid::{dictionary::WordList, recording::GameRecorder};
use std::sync::Arc;

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "word_grid");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let game_error: WordGridError = GameError::GameFinished.into();
    assert!(matches!(game_error, WordGridError::Game(GameError::GameFinished)));
    assert_eq!(
        game_error.to_string(),
        "Game error: the game is already finished"
    );

    let server_error = WordGridError::Server("test server error".to_string());
    assert!(matches!(server_error, WordGridError::Server(_)));
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert!(success.is_ok());

    let failure: Result<i32> = Err(WordGridError::Game(GameError::InvalidLetter("1".into())));
    assert!(failure.is_err());
}

#[tokio::test]
async fn test_server_rejects_bad_listen_address() {
    let config = WebApiConfig {
        host: "not an address".to_string(),
        ..WebApiConfig::default()
    };
    let server = WebApiServer::new(
        config,
        Arc::new(Dictionary::Offline(WordList::default())),
        Arc::new(GameRecorder::disabled()),
    );
    let result = server.start().await;
    assert!(matches!(result, Err(WordGridError::Server(_))));
}

#[test]
fn test_server_configs() {
    let web_config = WebApiConfig::default();
    assert_eq!(web_config.port, 8080);
    assert_eq!(web_config.host, "0.0.0.0");
    assert_eq!(web_config.session_timeout_minutes, 360);

    let dictionary = Dictionary::Offline(WordList::from_words(["word"]));
    assert_eq!(dictionary.describe(), "offline word list (1 words)");
    let _server = WebApiServer::new(
        web_config,
        Arc::new(dictionary),
        Arc::new(GameRecorder::disabled()),
    );
}
