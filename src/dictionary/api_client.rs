use crate::dictionary::{DictionaryError, WordValidator};
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Connection settings for the remote dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryApiConfig {
    /// Entries endpoint; the word is appended as the last path segment.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for DictionaryApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DICTIONARY_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Only the headword of each entry matters here.
#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    word: String,
}

/// Client for the free dictionary API (`GET {base_url}/{word}`).
#[derive(Debug)]
pub struct DictionaryApiClient {
    base_url: Url,
    http_client: HttpClient,
}

impl DictionaryApiClient {
    pub fn new(config: DictionaryApiConfig) -> Result<Self, DictionaryError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| DictionaryError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl(config.base_url));
        }

        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&word.to_lowercase());
        }
        url
    }
}

/// A lookup counts only when the first returned entry is the word itself,
/// so stemmed or redirected matches are rejected.
fn first_entry_matches(entries: &[DictionaryEntry], word: &str) -> bool {
    entries
        .first()
        .map(|entry| entry.word.to_lowercase() == word.to_lowercase())
        .unwrap_or(false)
}

impl WordValidator for DictionaryApiClient {
    async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
        log::debug!("Validating word: {}", word);

        let response = self.http_client.get(self.entry_url(word)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                log::debug!("Word {} is invalid (no dictionary entry)", word);
                return Ok(false);
            }
            status if !status.is_success() => return Err(DictionaryError::Status(status)),
            _ => {}
        }

        let entries: Vec<DictionaryEntry> = response.json().await?;
        let is_valid = first_entry_matches(&entries, word);
        log::debug!(
            "Word {} is {}",
            word,
            if is_valid { "valid" } else { "invalid" }
        );
        Ok(is_valid)
    }
}
