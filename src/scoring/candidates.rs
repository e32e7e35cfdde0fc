/// Shortest run of letters that can score.
pub const MIN_WORD_LEN: usize = 3;

/// Every substring of `run` at least `MIN_WORD_LEN` long, by start then end
/// index. `run` holds uppercase ASCII only, so byte slicing is safe.
pub fn candidate_words(run: &str) -> Vec<String> {
    let len = run.len();
    let mut words = Vec::new();
    for start in 0..len.saturating_sub(MIN_WORD_LEN - 1) {
        for end in (start + MIN_WORD_LEN)..=len {
            words.push(run[start..end].to_string());
        }
    }
    words
}
