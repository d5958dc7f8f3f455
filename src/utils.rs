use std::io;
use regex::Regex;
use thiserror::Error;

/// Custom error types for the phrase generator
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown non-terminal: {0}")]
    UnknownNonTerminal(String),

    #[error("Rule group for {0} has no alternatives")]
    EmptyRuleGroup(String),

    #[error("Expansion depth limit of {limit} exceeded while expanding {symbol}")]
    RecursionLimitExceeded { symbol: String, limit: usize },
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Normalize a start symbol to bracketed `<name>` form.
///
/// Accepts either an already-bracketed non-terminal (`<start>`) or a bare
/// name (`start`), which gets brackets added. Anything else, such as a name
/// with stray angle brackets or whitespace, is rejected.
pub fn normalize_start_symbol(symbol: &str) -> Result<String> {
    let bracketed = Regex::new(r"^<[^<>\s]+>$").unwrap();
    let bare = Regex::new(r"^[^<>\s]+$").unwrap();

    if bracketed.is_match(symbol) {
        Ok(symbol.to_string())
    } else if bare.is_match(symbol) {
        Ok(format!("<{}>", symbol))
    } else {
        Err(GrammarError::Parse(format!(
            "invalid start symbol: {}",
            symbol
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_bracketed() {
        assert_eq!(normalize_start_symbol("<start>").unwrap(), "<start>");
    }

    #[test]
    fn test_normalize_bare() {
        assert_eq!(normalize_start_symbol("sentence").unwrap(), "<sentence>");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert!(normalize_start_symbol("<start").is_err());
        assert!(normalize_start_symbol("a<b>").is_err());
        assert!(normalize_start_symbol("two words").is_err());
        assert!(normalize_start_symbol("").is_err());
    }
}
