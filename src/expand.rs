use rand::rngs::ThreadRng;
use rand::Rng;

use crate::table::GrammarTable;
use crate::utils::{GrammarError, Result};

/// Default ceiling on nested expansions before giving up on a grammar as
/// self-referential.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Expands sentences by recursively replacing `<...>` markers with randomly
/// chosen productions from a [`GrammarTable`].
///
/// The expander holds no state beyond the table reference, its random
/// source, and the depth ceiling; output is a pure function of the table,
/// the input string, and the randomness consumed.
pub struct SentenceExpander<'a, R: Rng = ThreadRng> {
    table: &'a GrammarTable,
    rng: R,
    max_depth: usize,
}

impl<'a> SentenceExpander<'a, ThreadRng> {
    pub fn new(table: &'a GrammarTable) -> Self {
        SentenceExpander {
            table,
            rng: rand::thread_rng(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a, R: Rng> SentenceExpander<'a, R> {
    /// Use an explicit random source, e.g. a seeded `StdRng` for
    /// reproducible output.
    pub fn with_rng(table: &'a GrammarTable, rng: R) -> Self {
        SentenceExpander {
            table,
            rng,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand every non-terminal marker in `input` down to terminal text.
    ///
    /// Tokens are separated by single spaces in the result, with no leading
    /// or trailing whitespace. Deterministic for a fixed random source
    /// state.
    pub fn expand(&mut self, input: &str) -> Result<String> {
        self.expand_sentence(input, 0)
    }

    fn expand_sentence(&mut self, input: &str, depth: usize) -> Result<String> {
        if depth >= self.max_depth {
            return Err(GrammarError::RecursionLimitExceeded {
                symbol: input.to_string(),
                limit: self.max_depth,
            });
        }

        let mut words = Vec::new();
        for token in input.split(' ').filter(|t| !t.is_empty()) {
            let resolved = if token.contains('<') {
                self.expand_word(token, depth)?
            } else {
                token.to_string()
            };
            if !resolved.is_empty() {
                words.push(resolved);
            }
        }

        Ok(words.join(" "))
    }

    /// Resolve one whitespace-free token, replacing each complete `<...>`
    /// span with a production and copying everything outside spans verbatim.
    fn expand_word(&mut self, token: &str, depth: usize) -> Result<String> {
        let mut word = String::new();
        let mut span_start = 0;
        let mut in_span = false;

        for (i, ch) in token.char_indices() {
            if ch == '<' {
                span_start = i;
                in_span = true;
            } else if ch == '>' {
                let marker = &token[span_start..=i];
                let group = self.table.rules_for(marker)?;
                if group.len() < 2 {
                    return Err(GrammarError::EmptyRuleGroup(marker.to_string()));
                }

                // Index 0 is the key line, never a production; redirecting a
                // drawn 0 to 1 means the first alternative is picked twice as
                // often as the rest.
                let mut position = self.rng.gen_range(0..group.len());
                if position == 0 {
                    position = 1;
                }

                let alternative = &group[position];
                if alternative.contains('<') {
                    word.push_str(&self.expand_sentence(alternative, depth + 1)?);
                } else {
                    word.push_str(alternative);
                }
                in_span = false;
            } else if !in_span {
                word.push(ch);
            }
        }

        Ok(word)
    }
}
