//! Token type and raw-input normalization.
//!
//! A [`Token`] pairs the text used for rule matching with the payload (`data`)
//! carried forward through rewrites. A freshly tokenized word carries itself
//! as its only payload; rewrites replace the payload as rules consume words.

/// Words removed from input before any rewriting happens.
pub const STOP_WORDS: &[&str] = &["a", "an", "the"];

/// One unit of the token stream fed through the rewrite engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Current symbol used for matching; changes as rules rewrite the stream.
    pub text: String,
    /// Surface words this token stands for, in original order.
    pub data: Vec<String>,
}

impl Token {
    /// Build a token for an unrewritten input word; `data` is the word itself.
    pub fn new(word: &str) -> Self {
        Self {
            text: word.to_string(),
            data: vec![word.to_string()],
        }
    }

    /// Build a rewritten token carrying an explicit payload.
    pub fn with_data(text: impl Into<String>, data: Vec<String>) -> Self {
        Self { text: text.into(), data }
    }
}

/// Lowercase, fold hyphens to spaces, and trim the raw input.
pub fn clean(input: &str) -> String {
    input.replace('-', " ").trim().to_lowercase()
}

/// Normalize a raw command string into an ordered token sequence.
///
/// Stop-words are dropped entirely; input consisting only of stop-words (or
/// nothing at all) yields an empty sequence, which callers treat as an
/// immediate invalid parse.
pub fn tokenize(input: &str) -> Vec<Token> {
    clean(input)
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(Token::new)
        .collect()
}
