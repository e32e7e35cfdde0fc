// main.rs - command line entry point
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use word_grid::dictionary::{
    CachedValidator, Dictionary, DictionaryApiClient, DictionaryApiConfig, DictionaryError,
    WordList, DEFAULT_DICTIONARY_URL,
};
use word_grid::logging::setup_logging;
use word_grid::recording::GameRecorder;
use word_grid::servers::{WebApiConfig, WebApiServer};
use word_grid::terminal::play_hot_seat;

#[derive(Parser, Debug)]
#[command(name = "word_grid", version, about)]
struct Config {
    #[command(subcommand)]
    mode: GameMode,

    /// Dictionary entries endpoint, the word is appended to it
    #[arg(long, global = true, default_value = DEFAULT_DICTIONARY_URL)]
    dictionary_url: String,

    /// Validate words against a local file (one word per line) instead of the online dictionary
    #[arg(long, global = true)]
    word_list: Option<PathBuf>,

    /// Timeout of a single dictionary lookup
    #[arg(long, global = true, default_value_t = 5)]
    lookup_timeout_secs: u64,

    /// Ask the online dictionary again for words it already answered
    #[arg(long, global = true, default_value_t = false)]
    no_cache: bool,

    /// Log level when RUST_LOG is unset (default: warn for play, info for serve)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write rotating log files to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Append every finished game to a daily CSV file in this directory
    #[arg(long, global = true)]
    record_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum GameMode {
    /// Two players sharing this terminal
    Play {
        /// Name of the first player (asked for when omitted)
        #[arg(long)]
        player1: Option<String>,

        /// Name of the second player (asked for when omitted)
        #[arg(long)]
        player2: Option<String>,
    },
    /// JSON HTTP API hosting any number of games
    Serve {
        #[arg(short = 'p', long, default_value_t = 8080)]
        port: u16,

        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Drop games idle for this many minutes (0 keeps them until restart)
        #[arg(long, default_value_t = 360)]
        session_timeout_minutes: u64,
    },
}

fn build_dictionary(config: &Config) -> Result<Dictionary, DictionaryError> {
    if let Some(path) = &config.word_list {
        return Ok(Dictionary::Offline(WordList::load(path)?));
    }

    let client = DictionaryApiClient::new(DictionaryApiConfig {
        base_url: config.dictionary_url.clone(),
        timeout: Duration::from_secs(config.lookup_timeout_secs),
    })?;
    let validator = if config.no_cache {
        CachedValidator::disabled(client)
    } else {
        CachedValidator::new(client)
    };
    Ok(Dictionary::Remote(validator))
}

fn build_recorder(config: &Config) -> std::io::Result<GameRecorder> {
    match &config.record_dir {
        Some(dir) => {
            log::info!("📝 Recording games to {}", dir.display());
            GameRecorder::new(dir)
        }
        None => Ok(GameRecorder::disabled()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let default_level = config.log_level.clone().unwrap_or_else(|| match config.mode {
        GameMode::Play { .. } => "warn".to_string(),
        GameMode::Serve { .. } => "info".to_string(),
    });
    let _logger = setup_logging(&default_level, config.log_dir.as_deref())?;

    let dictionary = build_dictionary(&config)?;
    log::info!("📖 Using {}", dictionary.describe());
    let recorder = build_recorder(&config)?;

    match config.mode {
        GameMode::Play { player1, player2 } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            play_hot_seat(
                &dictionary,
                &recorder,
                (player1, player2),
                stdin,
                &mut stdout,
            )
            .await?;
            recorder.flush()?;
        }
        GameMode::Serve {
            port,
            host,
            session_timeout_minutes,
        } => {
            let server = WebApiServer::new(
                WebApiConfig {
                    port,
                    host,
                    session_timeout_minutes,
                },
                Arc::new(dictionary),
                Arc::new(recorder),
            );
            server.start().await?;
        }
    }
    Ok(())
}
