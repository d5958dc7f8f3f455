//! Phrase-Gen generates random phrases from a context-free grammar file.
//!
//! Grammar rules live in a custom open-addressing hash table with quadratic
//! probing ([`GrammarTable`]), and phrases are produced by recursively
//! expanding non-terminal `<...>` markers with randomly chosen productions
//! ([`SentenceExpander`]).
//!
//! # Example
//!
//! ```rust
//! use phrase_gen::{GrammarTable, SentenceExpander};
//!
//! let table = GrammarTable::from_lines([
//!     "{", "<start>", "<greeting> world", "}",
//!     "{", "<greeting>", "Hello", "Hi", "}",
//! ]).unwrap();
//!
//! let mut expander = SentenceExpander::new(&table);
//! let phrase = expander.expand("<start>").unwrap();
//! assert!(phrase == "Hello world" || phrase == "Hi world");
//! ```

pub mod expand;
pub mod table;
pub mod utils;

pub use expand::{SentenceExpander, DEFAULT_MAX_DEPTH};
pub use table::GrammarTable;
pub use utils::{GrammarError, Result};
