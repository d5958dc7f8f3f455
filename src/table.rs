use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::utils::{GrammarError, Result};

/// Initial bucket count. Prime-ish spacing keeps early probe sequences short.
const INITIAL_CAPACITY: usize = 7;

/// Multiplier applied to the raw string hash before reduction mod capacity.
const HASH_MULTIPLIER: i32 = 109;

/// Open-addressing hash table mapping non-terminals to their rule groups.
///
/// Each occupied bucket owns exactly one rule group: element 0 is the key
/// line as it appeared in the grammar file (the `<...>` non-terminal,
/// possibly with adjacent literal text), elements 1..N are the alternative
/// productions in file order. Collisions are resolved by quadratic probing,
/// and the backing array doubles the moment it becomes half full.
///
/// The table is built once while parsing a grammar file and is read-only
/// afterwards; there is no deletion.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    buckets: Vec<Vec<String>>,
    occupied: usize,
}

impl GrammarTable {
    fn new() -> Self {
        GrammarTable {
            buckets: vec![Vec::new(); INITIAL_CAPACITY],
            occupied: 0,
        }
    }

    /// Parse a grammar file into a populated table.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(GrammarError::Io)?;
        let reader = io::BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(GrammarError::Io)?);
        }

        Self::from_lines(lines)
    }

    /// Parse a grammar description given as a sequence of lines.
    ///
    /// A line equal to `{` opens a rule block; the first following line
    /// containing a `<` is the key line, and every line up to the closing
    /// `}` (exclusive) joins that key's rule group in order. Text outside
    /// blocks is ignored, so grammar files may carry comments and terminal
    /// declarations between blocks.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = GrammarTable::new();
        let mut lines = lines.into_iter().map(Into::into);
        let mut in_block = false;

        while let Some(line) = lines.next() {
            if line == "{" {
                in_block = true;
            } else if in_block && line.contains('<') {
                let mut group = vec![line];
                loop {
                    match lines.next() {
                        Some(next) if next == "}" => break,
                        Some(next) => group.push(next),
                        None => {
                            return Err(GrammarError::Parse(format!(
                                "unterminated rule block for {}",
                                group[0]
                            )))
                        }
                    }
                }
                table.insert_group(group);
                in_block = false;
            }
        }

        Ok(table)
    }

    /// Number of non-terminals stored.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Current bucket count of the backing array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Look up the rule group for a bracketed non-terminal such as `<noun>`.
    ///
    /// The probe sequence starts from the probe string's own home slot, and
    /// the stop condition is that the bucket's key line *contains* the probe
    /// string, not that it equals it. Containment only comes into play when
    /// the probe path crosses another key's bucket; a key line carrying
    /// literal text around its marker hashes differently from the bare
    /// marker and is generally not findable by it. Known defect: when one
    /// non-terminal's name is a substring of another's (`<noun>` vs
    /// `<pronoun>`), a probe-path collision can stop at the wrong group.
    ///
    /// Probing into an empty bucket, or probing more than `capacity` times
    /// without a match, reports the non-terminal as unknown.
    pub fn rules_for(&self, non_terminal: &str) -> Result<&[String]> {
        let capacity = self.buckets.len();
        let mut slot = home_slot(non_terminal, capacity);
        let mut i = 1usize;

        while i <= capacity + 1 {
            let bucket = &self.buckets[slot];
            if bucket.is_empty() {
                break;
            }
            if bucket[0].contains(non_terminal) {
                return Ok(bucket);
            }
            slot = (slot + i * i) % capacity;
            i += 1;
        }

        Err(GrammarError::UnknownNonTerminal(non_terminal.to_string()))
    }

    /// Place a parsed rule group into the first empty bucket on its key's
    /// probe sequence, growing the table once it reaches half occupancy.
    fn insert_group(&mut self, group: Vec<String>) {
        let slot = probe_empty(&self.buckets, &group[0]);
        self.buckets[slot] = group;
        self.occupied += 1;

        if self.occupied == self.buckets.len() / 2 {
            self.resize();
        }
    }

    /// Double the capacity and rehash every occupied bucket, scanning the
    /// old table in bucket order so rehash collisions resolve the same way
    /// original insertions did.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let mut new_buckets = vec![Vec::new(); new_capacity];

        for group in self.buckets.drain(..) {
            if !group.is_empty() {
                let slot = probe_empty(&new_buckets, &group[0]);
                new_buckets[slot] = group;
            }
        }

        self.buckets = new_buckets;
    }
}

/// Stable polynomial string hash (h = h * 31 + byte, wrapping i32).
fn string_hash(s: &str) -> i32 {
    s.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(b as i32))
}

/// Initial probe slot: abs(hash * 109) mod capacity.
fn home_slot(key: &str, capacity: usize) -> usize {
    string_hash(key).wrapping_mul(HASH_MULTIPLIER).unsigned_abs() as usize % capacity
}

/// Quadratic probe from the key's home slot to the first empty bucket.
fn probe_empty(buckets: &[Vec<String>], key: &str) -> usize {
    let capacity = buckets.len();
    let mut slot = home_slot(key, capacity);
    let mut i = 1usize;

    while !buckets[slot].is_empty() {
        slot = (slot + i * i) % capacity;
        i += 1;
    }

    slot
}
