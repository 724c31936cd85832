//! Domain models: recognized symbols, catalogues and counter tables.
//!
//! This module holds everything that decides *what* is counted. The pipeline
//! only asks a [`PunctuationMapping`] whether a key is present.

pub mod catalogue;
pub mod mapping;
pub mod symbol;

pub use catalogue::Catalogue;
pub use mapping::{fresh_mapping, MappingOverride, PunctuationMapping, Recorded, Tally};
pub use symbol::{Repeat, Symbol};
