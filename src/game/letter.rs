use crate::game::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single uppercase ASCII letter as stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Accepts `a`-`z` and `A`-`Z`, normalised to uppercase.
    pub fn new(c: char) -> Result<Self, GameError> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(Letter(upper))
        } else {
            Err(GameError::InvalidLetter(c.to_string()))
        }
    }

    /// Parses user input: surrounding whitespace is ignored, exactly one letter must remain.
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Letter::new(c),
            _ => Err(GameError::InvalidLetter(trimmed.to_string())),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lowercase_is_uppercased() {
        assert_eq!(Letter::parse("q").unwrap().as_char(), 'Q');
        assert_eq!(Letter::parse(" z\n").unwrap().as_char(), 'Z');
    }

    #[test]
    fn test_rejects_non_letters() {
        assert_matches!(Letter::parse(""), Err(GameError::InvalidLetter(_)));
        assert_matches!(Letter::parse("ab"), Err(GameError::InvalidLetter(_)));
        assert_matches!(Letter::parse("7"), Err(GameError::InvalidLetter(_)));
        assert_matches!(Letter::parse("é"), Err(GameError::InvalidLetter(_)));
        assert_matches!(Letter::new('-'), Err(GameError::InvalidLetter(_)));
    }

    #[test]
    fn test_deserialization_validates() {
        let letter: Letter = serde_json::from_str("\"k\"").unwrap();
        assert_eq!(letter.as_char(), 'K');
        assert!(serde_json::from_str::<Letter>("\"3\"").is_err());
    }
}
