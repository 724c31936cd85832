//! Punctuation counter tables.

use super::catalogue::Catalogue;
use super::symbol::Symbol;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// The value held for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    Count(u64),
    /// A caller-supplied value that is not a non-negative integer, kept
    /// verbatim until the counter heals it
    Malformed(String),
}

impl Tally {
    pub fn count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Malformed(_) => None,
        }
    }
}

impl From<u64> for Tally {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Outcome of [`PunctuationMapping::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Counted,
    /// The previous value was malformed and has been reset to the matched
    /// count
    Healed { previous: String },
    /// The key is not part of this mapping; nothing changed
    Unrecognized,
}

/// Ordered table of recognized symbols and their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationMapping {
    entries: Vec<(Symbol, Tally)>,
    index: HashMap<Symbol, usize>,
}

impl PunctuationMapping {
    pub(crate) fn zeroed(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut mapping = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for symbol in symbols {
            if !mapping.index.contains_key(&symbol) {
                mapping.index.insert(symbol, mapping.entries.len());
                mapping.entries.push((symbol, Tally::Count(0)));
            }
        }
        mapping
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.index.contains_key(symbol)
    }

    /// Count for a key, `None` when absent or malformed.
    pub fn get(&self, symbol: &Symbol) -> Option<u64> {
        self.tally(symbol).and_then(Tally::count)
    }

    /// Count for a key spelling such as `"!"` or `"..."`.
    pub fn get_str(&self, spelling: &str) -> Option<u64> {
        Symbol::parse(spelling).and_then(|symbol| self.get(&symbol))
    }

    pub fn tally(&self, symbol: &Symbol) -> Option<&Tally> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    /// Entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Tally)> + '_ {
        self.entries.iter().map(|(symbol, tally)| (*symbol, tally))
    }

    /// Keys in catalogue order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.iter().map(|(symbol, _)| *symbol)
    }

    /// Entries with a positive count.
    pub fn nonzero(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.iter()
            .filter_map(|(symbol, tally)| tally.count().map(|n| (symbol, n)))
            .filter(|(_, n)| *n > 0)
    }

    /// Sum of the single-character counts.
    pub fn marks_total(&self) -> u64 {
        self.iter()
            .filter(|(symbol, _)| !symbol.is_aggregate())
            .filter_map(|(_, tally)| tally.count())
            .sum()
    }

    /// True when every entry is `Count(0)`.
    pub fn is_zeroed(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, tally)| *tally == Tally::Count(0))
    }

    /// Adds `n` occurrences of `symbol`.
    ///
    /// A malformed entry is replaced by `n`.
    pub fn record(&mut self, symbol: &Symbol, n: u64) -> Recorded {
        let Some(&i) = self.index.get(symbol) else {
            return Recorded::Unrecognized;
        };

        let tally = &mut self.entries[i].1;
        let previous = match tally {
            Tally::Count(count) => {
                *count = count.saturating_add(n);
                return Recorded::Counted;
            }
            Tally::Malformed(raw) => std::mem::take(raw),
        };
        *tally = Tally::Count(n);
        Recorded::Healed { previous }
    }

    /// Replaces values of keys already present; other keys are dropped.
    ///
    /// Returns the number of dropped override keys.
    pub fn apply_overrides(&mut self, overrides: &MappingOverride) -> usize {
        let mut dropped = 0;
        for (spelling, tally) in overrides.iter() {
            match Symbol::parse(spelling).and_then(|s| self.index.get(&s).copied()) {
                Some(i) => self.entries[i].1 = tally.clone(),
                None => {
                    debug!(key = %spelling, "dropping override for unrecognized symbol");
                    dropped += 1;
                }
            }
        }
        dropped
    }
}

impl Default for PunctuationMapping {
    fn default() -> Self {
        fresh_mapping()
    }
}

/// A fresh table for the default catalogue, every key at zero.
pub fn fresh_mapping() -> PunctuationMapping {
    Catalogue::default().fresh_mapping()
}

/// A partial, caller-supplied table of initial values.
///
/// Keys are spellings; they are only matched against a catalogue when the
/// override is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOverride {
    entries: BTreeMap<String, Tally>,
}

impl MappingOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, spelling: impl Into<String>, value: impl Into<Tally>) -> Self {
        self.set(spelling, value);
        self
    }

    pub fn set(&mut self, spelling: impl Into<String>, value: impl Into<Tally>) {
        self.entries.insert(spelling.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for MappingOverride {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (k, v) in iter {
            overrides.set(k, v);
        }
        overrides
    }
}
