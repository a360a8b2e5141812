//! Word-based content chunking.
//!
//! Chunk boundaries fall on whitespace only. Runs of whitespace are
//! collapsed to single spaces when chunks are rejoined, so the stored
//! text is normalized rather than byte-identical to the input.

/// Split content into chunks of at most `word_limit` whitespace-delimited
/// words. `word_limit` must be at least 1.
pub fn split_into_chunks(content: &str, word_limit: usize) -> Vec<String> {
    let words: Vec<&str> = content.split_whitespace().collect();
    words
        .chunks(word_limit)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Whitespace word count, reported as `numTokens` by the trigger response.
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}
