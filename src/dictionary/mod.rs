//! Word validation backends.
//!
//! - `api_client`: remote dictionary lookups over HTTP
//! - `word_list`: offline validation against a word file
//! - `cached`: memoisation wrapper around any validator

pub mod api_client;
pub mod cached;
pub mod word_list;

pub use api_client::{DictionaryApiClient, DictionaryApiConfig, DEFAULT_DICTIONARY_URL};
pub use cached::CachedValidator;
pub use word_list::WordList;

use std::future::Future;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("dictionary request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Anything but a plain "no such word" answer, e.g. rate limiting or an outage.
    #[error("dictionary answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid dictionary url '{0}'")]
    InvalidUrl(String),

    #[error("failed to read word list {path}: {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decides whether a candidate string is a real word.
///
/// `Ok(false)` is a definitive "not a word"; `Err` means the answer is unknown.
pub trait WordValidator: Send + Sync {
    fn is_valid_word(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<bool, DictionaryError>> + Send;
}

/// The validator selected at startup.
pub enum Dictionary {
    /// Remote lookups, optionally memoised.
    Remote(CachedValidator<DictionaryApiClient>),
    Offline(WordList),
}

impl Dictionary {
    pub fn describe(&self) -> String {
        match self {
            Dictionary::Remote(cached) => format!(
                "remote dictionary at {} (cache {})",
                cached.inner().base_url(),
                if cached.is_enabled() { "on" } else { "off" }
            ),
            Dictionary::Offline(list) => format!("offline word list ({} words)", list.len()),
        }
    }
}

impl WordValidator for Dictionary {
    async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
        match self {
            Dictionary::Remote(validator) => validator.is_valid_word(word).await,
            Dictionary::Offline(validator) => validator.is_valid_word(word).await,
        }
    }
}
