//! Bitap fuzzy matching and ranked search over string and record collections.
//!
//! [`PatternMatcher`] scores one text against a pattern of at most
//! [`MAX_PATTERN_LEN`] characters; [`SearchEngine`] runs one matcher over a
//! whole [`Entries`] collection and ranks the hits, lowest score first.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod sources;

pub use engine::{Item, Ranked, SearchEngine, SearchOptions};
pub use error::{MAX_PATTERN_LEN, SearchError};
pub use matcher::{MatchOptions, MatchResult, PatternMatcher};
pub use model::{Entries, Record};
