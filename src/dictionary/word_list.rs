use crate::dictionary::{DictionaryError, WordValidator};
use std::collections::HashSet;
use std::path::Path;

/// Offline dictionary: one word per line, `#` starts a comment line.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn parse(contents: &str) -> Self {
        Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DictionaryError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&contents);
        log::info!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

impl WordValidator for WordList {
    async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(self.contains(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let list = WordList::parse("# animals\ncat\n\n  Dog  \n#cow\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("CAT"));
        assert!(list.contains("dog"));
        assert!(!list.contains("cow"));
    }

    #[tokio::test]
    async fn test_validator_is_case_insensitive() {
        let list = WordList::from_words(["Tea"]);
        assert!(list.is_valid_word("TEA").await.unwrap());
        assert!(list.is_valid_word("tea").await.unwrap());
        assert!(!list.is_valid_word("TEAS").await.unwrap());
    }

    #[test]
    fn test_load_from_file() -> std::io::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "apple\nbanana")?;

        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("BANANA"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = WordList::load("/definitely/not/here/words.txt");
        assert_matches!(result, Err(DictionaryError::WordList { .. }));
    }
}
