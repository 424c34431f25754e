use crate::error::{MAX_PATTERN_LEN, Result, SearchError};
use log::trace;
use std::borrow::Cow;
use std::collections::HashMap;

/// Tuning knobs for a single matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Character offset where the pattern is expected to be found.
    pub location: usize,
    /// How many characters away from `location` a match may drift before
    /// proximity alone costs a full point. Zero rejects every match that is
    /// not exactly at `location`.
    pub distance: usize,
    /// Highest score still accepted as a match.
    pub threshold: f64,
    pub case_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            location: 0,
            distance: 100,
            threshold: 0.6,
            case_sensitive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub is_match: bool,
    /// Only meaningful when `is_match` is set. 0.0 is an exact match.
    pub score: f64,
}

impl MatchResult {
    const EXACT: Self = Self { is_match: true, score: 0.0 };
    const MISS: Self = Self { is_match: false, score: 1.0 };
}

/// A compiled bitap pattern.
///
/// Every position of the pattern owns one bit of a `u32`, the first
/// character being the most significant used bit. That is what caps the
/// pattern at [`MAX_PATTERN_LEN`] characters.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Vec<char>,
    alphabet: HashMap<char, u32>,
    match_mask: u32,
    options: MatchOptions,
}

impl PatternMatcher {
    pub fn new(pattern: &str, options: MatchOptions) -> Result<Self> {
        let pattern: Vec<char> = fold_case(pattern, options.case_sensitive).chars().collect();
        let len = pattern.len();
        if len == 0 || len > MAX_PATTERN_LEN {
            return Err(SearchError::InvalidPattern { len });
        }

        let mut alphabet = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            *alphabet.entry(c).or_insert(0) |= 1u32 << (len - i - 1);
        }

        Ok(Self {
            pattern,
            alphabet,
            match_mask: 1u32 << (len - 1),
            options,
        })
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Score of a match with `errors` edits starting at `match_index`.
    fn bitap_score(&self, errors: usize, match_index: usize) -> f64 {
        let accuracy = errors as f64 / self.pattern.len() as f64;
        let proximity = self.options.location.abs_diff(match_index);

        if self.options.distance == 0 {
            return if proximity != 0 { 1.0 } else { accuracy };
        }
        accuracy + proximity as f64 / self.options.distance as f64
    }

    /// Scores `text` against the compiled pattern.
    ///
    /// Scans one error level at a time. Each level binary-searches how far
    /// from `location` a match could still beat the best score so far, then
    /// runs the shift-or recurrence over that window only.
    pub fn search(&self, text: &str) -> MatchResult {
        let text: Vec<char> = fold_case(text, self.options.case_sensitive).chars().collect();

        if text == self.pattern {
            return MatchResult::EXACT;
        }
        if text.is_empty() {
            return MatchResult::MISS;
        }

        let location = self.options.location;
        let pattern_len = self.pattern.len();
        let text_len = text.len();

        // A verbatim occurrence near `location` bounds every later level.
        let mut score_threshold = self.options.threshold;
        if let Some(index) = find_from(&text, &self.pattern, location) {
            score_threshold = score_threshold.min(self.bitap_score(0, index));
            let until = location.saturating_add(pattern_len);
            if let Some(index) = rfind_until(&text, &self.pattern, until) {
                score_threshold = score_threshold.min(self.bitap_score(0, index));
            }
        }

        let mut best_loc: Option<usize> = None;
        let mut score = MatchResult::MISS.score;
        let mut bin_max = pattern_len + text_len;
        let mut last_rd: Vec<u32> = Vec::new();

        for errors in 0..pattern_len {
            let mut bin_min = 0;
            let mut bin_mid = bin_max;
            while bin_min < bin_mid {
                if self.bitap_score(errors, location.saturating_add(bin_mid)) <= score_threshold {
                    bin_min = bin_mid;
                } else {
                    bin_max = bin_mid;
                }
                bin_mid = (bin_max - bin_min) / 2 + bin_min;
            }
            // The window only shrinks from here on.
            bin_max = bin_mid;

            let mut start = location.saturating_add(1).saturating_sub(bin_mid).max(1);
            let finish = location.saturating_add(bin_mid).min(text_len) + pattern_len;

            let mut rd = vec![0u32; finish + 2];
            rd[finish + 1] = (1u32 << errors) - 1;

            let mut j = finish;
            while j >= start {
                let char_match = text
                    .get(j - 1)
                    .and_then(|c| self.alphabet.get(c))
                    .copied()
                    .unwrap_or(0);

                let mut bits = ((rd[j + 1] << 1) | 1) & char_match;
                if errors > 0 {
                    let prev = |k: usize| last_rd.get(k).copied().unwrap_or(0);
                    bits |= (((prev(j + 1) | prev(j)) << 1) | 1) | prev(j + 1);
                }
                rd[j] = bits;

                if bits & self.match_mask != 0 {
                    let candidate = self.bitap_score(errors, j - 1);
                    if candidate <= score_threshold {
                        score_threshold = candidate;
                        score = candidate;
                        let loc = j - 1;
                        best_loc = Some(loc);
                        trace!(
                            "PatternMatcher: accepted loc={} errors={} score={}",
                            loc,
                            errors,
                            candidate
                        );

                        if loc > location {
                            // Don't drift further from `location` on the other side.
                            start = location.saturating_mul(2).saturating_sub(loc).max(1);
                        } else {
                            break;
                        }
                    }
                }
                j -= 1;
            }

            if self.bitap_score(errors + 1, location) > score_threshold {
                break;
            }
            last_rd = rd;
        }

        MatchResult {
            is_match: best_loc.is_some(),
            score,
        }
    }
}

fn fold_case(s: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// First occurrence of `needle` starting at or after `from`.
fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Last occurrence of `needle` starting at or before `until`.
fn rfind_until(haystack: &[char], needle: &[char], until: usize) -> Option<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .take(until.saturating_add(1))
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .last()
}
