//! Recognized symbol keys.
//!
//! A key is either a single Unicode scalar value or one of four fixed
//! repeated-punctuation aggregates. The key space is closed: anything else
//! cannot be represented and therefore cannot be counted.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A repeated-punctuation aggregate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Repeat {
    /// `!!!`
    Exclamation,
    /// `???`
    Question,
    /// `...`
    Ellipsis,
    /// `---`, only counted at the end of a chunk
    Dash,
}

impl Repeat {
    /// Scan order used by the counting stage.
    pub const ALL: [Repeat; 4] = [
        Repeat::Exclamation,
        Repeat::Question,
        Repeat::Ellipsis,
        Repeat::Dash,
    ];

    /// The key spelling, three repetitions of the unit character.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exclamation => "!!!",
            Self::Question => "???",
            Self::Ellipsis => "...",
            Self::Dash => "---",
        }
    }

    /// The repeated character.
    pub fn unit(&self) -> char {
        match self {
            Self::Exclamation => '!',
            Self::Question => '?',
            Self::Ellipsis => '.',
            Self::Dash => '-',
        }
    }

    /// Greedy pattern for three or more repetitions.
    ///
    /// Dashes only match when the run ends the text.
    pub fn pattern(&self) -> &'static Regex {
        static EXCLAMATION: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"!!!+").expect("Valid exclamation run regex"));
        static QUESTION: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\?\?\?+").expect("Valid question run regex"));
        static ELLIPSIS: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\.\.\.+").expect("Valid ellipsis run regex"));
        static DASH: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"---+$").expect("Valid trailing dash run regex"));

        match self {
            Self::Exclamation => &EXCLAMATION,
            Self::Question => &QUESTION,
            Self::Ellipsis => &ELLIPSIS,
            Self::Dash => &DASH,
        }
    }

    fn from_spelling(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == text)
    }
}

/// A key of the punctuation mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A single character, matched by code point
    Mark(char),
    /// A repeated-punctuation aggregate
    Repeated(Repeat),
}

impl Symbol {
    /// Parses a key spelling.
    ///
    /// Accepts exactly one scalar value or one of `!!!`, `???`, `...`, `---`.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(repeat) = Repeat::from_spelling(text) {
            return Some(Self::Repeated(repeat));
        }

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Mark(c)),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Repeated(_))
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self::Mark(c)
    }
}

impl From<Repeat> for Symbol {
    fn from(repeat: Repeat) -> Self {
        Self::Repeated(repeat)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mark(c) => write!(f, "{}", c),
            Self::Repeated(repeat) => f.write_str(repeat.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_marks() {
        assert_eq!(Symbol::parse("!"), Some(Symbol::Mark('!')));
        assert_eq!(Symbol::parse("💙"), Some(Symbol::Mark('💙')));
        assert_eq!(Symbol::parse("\\"), Some(Symbol::Mark('\\')));
    }

    #[test]
    fn test_parse_aggregates() {
        assert_eq!(
            Symbol::parse("..."),
            Some(Symbol::Repeated(Repeat::Ellipsis))
        );
        assert_eq!(Symbol::parse("---"), Some(Symbol::Repeated(Repeat::Dash)));
    }

    #[test]
    fn test_parse_rejects_other_sequences() {
        assert_eq!(Symbol::parse(""), None);
        assert_eq!(Symbol::parse("!!"), None);
        assert_eq!(Symbol::parse("!!!!"), None);
        assert_eq!(Symbol::parse("ab"), None);
        // heart with variation selector is two scalar values
        assert_eq!(Symbol::parse("\u{2764}\u{fe0f}"), None);
    }

    #[test]
    fn test_display_round_trips_spelling() {
        for repeat in Repeat::ALL {
            assert_eq!(Symbol::from(repeat).to_string(), repeat.as_str());
        }
        assert_eq!(Symbol::from('€').to_string(), "€");
    }

    #[test]
    fn test_patterns_are_greedy() {
        let found: Vec<_> = Repeat::Exclamation
            .pattern()
            .find_iter("wow!!!!! no!! yes!!!")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["!!!!!", "!!!"]);
    }

    #[test]
    fn test_dash_pattern_is_anchored_to_end() {
        assert!(!Repeat::Dash.pattern().is_match("a --- b"));
        assert!(Repeat::Dash.pattern().is_match("a b ----"));
        assert!(!Repeat::Dash.pattern().is_match("a b --- "));
    }
}
