//! The recognized symbol catalogue.
//!
//! Symbol classes are plain data tables. Adding a class or a symbol never
//! touches the pipeline: the counting stage only consults the mapping built
//! from a catalogue.

use super::mapping::PunctuationMapping;
use super::symbol::Symbol;
use crate::error::{PuncError, PuncResult};
use std::collections::HashSet;

pub const BASIC_MARKS: &[&str] = &[";", ":", "'", "\"", ",", "!", "?", ".", "(", ")", "-"];

pub const REPEATED: &[&str] = &["!!!", "???", "...", "---"];

pub const SYMBOLS: &[&str] = &[
    "★", "♥", "♦", "♠", "♣", "→", "←", "↑", "↓", "∞", "§", "¶",
];

pub const MATH: &[&str] = &["+", "*", "/", "=", "≠", "≤", "≥", "±", "×", "÷"];

pub const CURRENCY: &[&str] = &["$", "€", "£", "¥", "¢"];

pub const PERCENT_DEGREE: &[&str] = &["%", "°"];

pub const LEGAL: &[&str] = &["©", "®", "™"];

pub const MUSIC: &[&str] = &["♪", "♫", "♬", "♭", "♯"];

pub const ARROWS: &[&str] = &["↔", "↕", "↗", "↘", "↙", "↖"];

pub const SHAPES: &[&str] = &["○", "●", "□", "■", "△", "▲", "▽", "▼"];

pub const BOX_DRAWING: &[&str] = &["│", "─", "┌", "┐", "└", "┘", "├", "┤", "┬", "┴"];

/// Spanish, Arabic and full-width CJK punctuation.
pub const INTERNATIONAL: &[&str] = &[
    "¿", "¡", "؟", "،", "؛", "，", "。", "；", "：", "？", "！",
];

pub const TECHNICAL: &[&str] = &[
    "[", "]", "{", "}", "<", ">", "`", "|", "\\", "~", "^", "&", "@", "#",
];

pub const DECORATIVE: &[&str] = &[
    "☆", "✦", "✧", "♡", "❤", "💙", "💚", "💛", "💜", "✓", "✔", "☑", "✗", "✘", "☒",
];

/// An ordered set of recognized symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    symbols: Vec<Symbol>,
}

impl Catalogue {
    /// The eleven basic ASCII marks and the four aggregates.
    pub fn basic() -> Self {
        Self::from_tables(&[BASIC_MARKS, REPEATED])
    }

    /// Every symbol class, in the order the classes are listed above,
    /// with the aggregates following the first symbol class.
    pub fn extended() -> Self {
        Self::from_tables(&[
            BASIC_MARKS,
            SYMBOLS,
            REPEATED,
            MATH,
            CURRENCY,
            PERCENT_DEGREE,
            LEGAL,
            MUSIC,
            ARROWS,
            SHAPES,
            BOX_DRAWING,
            INTERNATIONAL,
            TECHNICAL,
            DECORATIVE,
        ])
    }

    /// Builds a catalogue from key spellings.
    ///
    /// Fails on a spelling that is not a single scalar value or an aggregate.
    /// Duplicates keep their first position.
    pub fn from_symbols<I, S>(spellings: I) -> PuncResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalogue = Self {
            symbols: Vec::new(),
        };
        for spelling in spellings {
            let spelling = spelling.as_ref();
            let symbol = Symbol::parse(spelling).ok_or_else(|| {
                PuncError::invalid_argument(
                    "catalogue",
                    format!("'{}' is neither a single character nor an aggregate", spelling),
                )
            })?;
            catalogue.push(symbol);
        }
        Ok(catalogue)
    }

    /// Adds a symbol at the end unless already present.
    pub fn with_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.push(symbol.into());
        self
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// A new mapping with every symbol of this catalogue at zero.
    pub fn fresh_mapping(&self) -> PunctuationMapping {
        PunctuationMapping::zeroed(self.symbols.iter().copied())
    }

    fn from_tables(tables: &[&[&str]]) -> Self {
        let mut seen = HashSet::new();
        let symbols = tables
            .iter()
            .flat_map(|table| table.iter())
            .filter_map(|spelling| Symbol::parse(spelling))
            .filter(|symbol| seen.insert(*symbol))
            .collect();
        Self { symbols }
    }

    fn push(&mut self, symbol: Symbol) {
        if !self.symbols.contains(&symbol) {
            self.symbols.push(symbol);
        }
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::extended()
    }
}
