use crate::config::EngineConfig;

/// Characters stripped from both ends of a token. Interior occurrences stay.
const EDGE_CHARS: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"', ' '];

/// Normalizes raw text into index terms.
///
/// The same instance must be used for document text and for query keywords,
/// otherwise a keyword can never match what was indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    min_len: usize,
    max_len: usize,
}

impl Tokenizer {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.min_token_length, config.max_token_length)
    }

    /// Trim edge punctuation, upper-case, and length-filter a single token.
    /// Length is counted in characters, not bytes.
    pub fn normalize(&self, token: &str) -> Option<String> {
        let term = token.trim_matches(EDGE_CHARS).to_uppercase();
        let len = term.chars().count();
        (len >= self.min_len && len <= self.max_len).then_some(term)
    }

    /// Whitespace-split, normalize, drop rejects; returns a sorted, duplicate-free list.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut terms: Vec<String> = text
            .split_whitespace()
            .filter_map(|piece| self.normalize(piece))
            .collect();
        terms.sort_unstable();
        terms.dedup();
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = Tokenizer::new(3, 10).tokenize("Running, runner's run!");
        assert_eq!(t, vec!["RUN", "RUNNER'S", "RUNNING"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let t = Tokenizer::new(3, 4);
        assert_eq!(t.normalize("café").as_deref(), Some("CAFÉ"));
    }
}
