use crate::dictionary::{DictionaryError, WordValidator};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Remembers definitive answers of the inner validator, keyed by uppercase word.
/// Failed lookups are not remembered so they get retried on the next turn.
pub struct CachedValidator<V> {
    inner: V,
    enabled: bool,
    cache: RwLock<HashMap<String, bool>>,
}

impl<V: WordValidator> CachedValidator<V> {
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            enabled: true,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Pass-through wrapper, every lookup reaches the inner validator.
    pub fn disabled(inner: V) -> Self {
        Self {
            enabled: false,
            ..Self::new(inner)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

impl<V: WordValidator> WordValidator for CachedValidator<V> {
    async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
        if !self.enabled {
            return self.inner.is_valid_word(word).await;
        }

        let key = word.to_uppercase();
        if let Some(&known) = self.cache.read().await.get(&key) {
            log::trace!("Dictionary cache hit: {} -> {}", key, known);
            return Ok(known);
        }

        let answer = self.inner.is_valid_word(word).await?;
        self.cache.write().await.insert(key, answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts words starting with 'A', fails on words starting with 'X'.
    struct CountingValidator {
        calls: AtomicUsize,
    }

    impl WordValidator for CountingValidator {
        async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if word.starts_with('X') {
                return Err(DictionaryError::InvalidUrl(word.to_string()));
            }
            Ok(word.starts_with('A'))
        }
    }

    fn counting() -> CountingValidator {
        CountingValidator {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_answers_are_memoised() {
        let cached = CachedValidator::new(counting());

        assert!(cached.is_valid_word("ANT").await.unwrap());
        assert!(cached.is_valid_word("ant").await.unwrap());
        assert!(!cached.is_valid_word("BEE").await.unwrap());
        assert!(!cached.is_valid_word("BEE").await.unwrap());

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_len().await, 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_memoised() {
        let cached = CachedValidator::new(counting());

        assert!(cached.is_valid_word("XYZ").await.is_err());
        assert!(cached.is_valid_word("XYZ").await.is_err());

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_delegates() {
        let cached = CachedValidator::disabled(counting());

        cached.is_valid_word("ANT").await.unwrap();
        cached.is_valid_word("ANT").await.unwrap();

        assert!(!cached.is_enabled());
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }
}
