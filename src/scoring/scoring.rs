use crate::dictionary::WordValidator;
use crate::game::board::{Board, Position};
use crate::game::line_scan::{run_through, Direction};
use crate::scoring::candidates::candidate_words;
use serde::{Deserialize, Serialize};

/// Words a single placement earned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScore {
    /// Accepted words in discovery order, horizontal run first.
    pub new_words: Vec<String>,
    /// One point per letter of each new word.
    pub points: u32,
}

/// Scores the letter just placed at `position` for a player who has already
/// scored `already_scored`.
///
/// Candidates are looked up only when neither this turn nor an earlier turn
/// of the same player produced them. A failed lookup counts as "not a word".
pub async fn score_placement<V: WordValidator>(
    board: &Board,
    position: Position,
    already_scored: &[String],
    validator: &V,
) -> TurnScore {
    let mut turn = TurnScore::default();

    for direction in Direction::ALL {
        let run = run_through(board, position, direction);
        for candidate in candidate_words(&run) {
            if turn.new_words.contains(&candidate) || already_scored.contains(&candidate) {
                continue;
            }

            match validator.is_valid_word(&candidate).await {
                Ok(true) => {
                    turn.points += candidate.len() as u32;
                    turn.new_words.push(candidate);
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("Error validating word {}: {}", candidate, e);
                }
            }
        }
    }

    turn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryError, WordList};
    use crate::game::board::create_board_empty;
    use crate::game::letter::Letter;

    fn place_word(board: &mut Board, row: usize, col: usize, vertical: bool, word: &str) {
        for (i, c) in word.chars().enumerate() {
            let (r, k) = if vertical { (row + i, col) } else { (row, col + i) };
            board
                .place(Position::new(r, k).unwrap(), Letter::new(c).unwrap())
                .unwrap();
        }
    }

    struct FailingValidator;

    impl WordValidator for FailingValidator {
        async fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
            Err(DictionaryError::InvalidUrl(word.to_string()))
        }
    }

    #[tokio::test]
    async fn test_horizontal_word_scores_its_length() {
        let mut board = create_board_empty();
        place_word(&mut board, 0, 0, false, "CAT");
        let dictionary = WordList::from_words(["cat"]);

        let turn = score_placement(&board, Position::new(0, 2).unwrap(), &[], &dictionary).await;

        assert_eq!(turn.new_words, vec!["CAT"]);
        assert_eq!(turn.points, 3);
    }

    #[tokio::test]
    async fn test_subwords_not_containing_new_letter_still_count() {
        let mut board = create_board_empty();
        place_word(&mut board, 2, 1, false, "CATS");
        let dictionary = WordList::from_words(["cat", "cats"]);

        let turn = score_placement(&board, Position::new(2, 4).unwrap(), &[], &dictionary).await;

        assert_eq!(turn.new_words, vec!["CAT", "CATS"]);
        assert_eq!(turn.points, 7);
    }

    #[tokio::test]
    async fn test_previously_scored_words_are_skipped() {
        let mut board = create_board_empty();
        place_word(&mut board, 2, 1, false, "CATS");
        let dictionary = WordList::from_words(["cat", "cats"]);
        let already = vec!["CAT".to_string()];

        let turn =
            score_placement(&board, Position::new(2, 4).unwrap(), &already, &dictionary).await;

        assert_eq!(turn.new_words, vec!["CATS"]);
        assert_eq!(turn.points, 4);
    }

    #[tokio::test]
    async fn test_crossing_words_in_both_directions() {
        let mut board = create_board_empty();
        // D O G across row 1, with O and X above and below the G.
        place_word(&mut board, 1, 0, false, "DOG");
        place_word(&mut board, 2, 2, true, "OD");
        board
            .place(Position::new(0, 2).unwrap(), Letter::new('X').unwrap())
            .unwrap();
        let dictionary = WordList::from_words(["dog", "god"]);

        // Column 2 reads X G O D; last placed cell is (3, 2).
        let turn = score_placement(&board, Position::new(3, 2).unwrap(), &[], &dictionary).await;
        assert_eq!(turn.new_words, vec!["GOD"]);

        let turn = score_placement(&board, Position::new(1, 2).unwrap(), &[], &dictionary).await;
        assert_eq!(turn.new_words, vec!["DOG", "GOD"]);
        assert_eq!(turn.points, 6);
    }

    #[tokio::test]
    async fn test_same_word_twice_in_one_turn_scores_once() {
        let mut board = create_board_empty();
        // Vertical and horizontal runs through (0, 0) both read "EYE".
        place_word(&mut board, 0, 0, false, "EYE");
        place_word(&mut board, 1, 0, true, "YE");
        let dictionary = WordList::from_words(["eye"]);

        let turn = score_placement(&board, Position::new(0, 0).unwrap(), &[], &dictionary).await;

        assert_eq!(turn.new_words, vec!["EYE"]);
        assert_eq!(turn.points, 3);
    }

    #[tokio::test]
    async fn test_lookup_failures_score_nothing() {
        let mut board = create_board_empty();
        place_word(&mut board, 0, 0, false, "CAT");

        let turn =
            score_placement(&board, Position::new(0, 1).unwrap(), &[], &FailingValidator).await;

        assert_eq!(turn, TurnScore::default());
    }
}
