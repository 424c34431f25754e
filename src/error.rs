use thiserror::Error;

/// Widest pattern the matcher can compile; one bit of a `u32` per position.
pub const MAX_PATTERN_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid pattern: length {len} is outside 1..={max}", max = MAX_PATTERN_LEN)]
    InvalidPattern { len: usize },
}

pub type Result<T> = std::result::Result<T, SearchError>;
