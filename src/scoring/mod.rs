pub mod candidates;
pub mod scoring;

pub use candidates::{candidate_words, MIN_WORD_LEN};
pub use scoring::{score_placement, TurnScore};
