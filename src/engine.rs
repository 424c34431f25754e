use crate::error::Result;
use crate::matcher::{MatchOptions, PatternMatcher};
use crate::model::{Entries, Record};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub matching: MatchOptions,
    /// Record fields to match against. Ignored for string collections.
    pub keys: Vec<String>,
    /// Record field returned in place of the whole record.
    pub id: Option<String>,
}

/// What a search hands back for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item<'a> {
    Text(&'a str),
    Record(&'a Record),
    /// Projected `id` field; `Null` when the record has no such field.
    Id(&'a Value),
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Text(text) => f.write_str(text),
            Item::Id(Value::String(id)) => f.write_str(id),
            Item::Id(value) => write!(f, "{}", value),
            Item::Record(record) => {
                let json = serde_json::to_string(record).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked<'a> {
    /// Position of the entry in the searched collection.
    pub index: usize,
    pub item: Item<'a>,
    /// Best score over all of the entry's searched fields.
    pub score: f64,
}

/// Ranks a borrowed collection against query patterns.
pub struct SearchEngine<'a> {
    entries: &'a Entries,
    options: SearchOptions,
}

impl<'a> SearchEngine<'a> {
    pub fn new(entries: &'a Entries, options: SearchOptions) -> Self {
        Self { entries, options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Matches `pattern` against every entry and returns the matching ones,
    /// best first. Entries with equal scores keep their collection order.
    pub fn search(&self, pattern: &str) -> Result<Vec<Ranked<'a>>> {
        let matcher = PatternMatcher::new(pattern, self.options.matching)?;
        let mut best: Vec<Option<f64>> = vec![None; self.entries.len()];

        match self.entries {
            Entries::Strings(texts) => {
                for (slot, text) in best.iter_mut().zip(texts) {
                    keep_best(slot, &matcher, text);
                }
            }
            Entries::Records(records) => {
                for (slot, record) in best.iter_mut().zip(records) {
                    for key in &self.options.keys {
                        // Missing and non-string fields simply don't take part.
                        if let Some(Value::String(text)) = record.get(key) {
                            keep_best(slot, &matcher, text);
                        }
                    }
                }
            }
        }

        let mut ranked: Vec<Ranked<'a>> = best
            .into_iter()
            .enumerate()
            .filter_map(|(index, score)| {
                score.map(|score| Ranked {
                    index,
                    item: self.item(index),
                    score,
                })
            })
            .collect();

        // `sort_by` is stable, which is what keeps ties in input order.
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

        debug!(
            "SearchEngine: pattern='{}', entries={}, matched={}",
            pattern,
            self.entries.len(),
            ranked.len()
        );
        Ok(ranked)
    }

    /// Like [`search`](Self::search) without the scores.
    pub fn search_items(&self, pattern: &str) -> Result<Vec<Item<'a>>> {
        Ok(self.search(pattern)?.into_iter().map(|r| r.item).collect())
    }

    fn item(&self, index: usize) -> Item<'a> {
        match self.entries {
            Entries::Strings(texts) => Item::Text(&texts[index]),
            Entries::Records(records) => {
                let record = &records[index];
                match &self.options.id {
                    Some(id) => Item::Id(record.get(id).unwrap_or(&NULL)),
                    None => Item::Record(record),
                }
            }
        }
    }
}

fn keep_best(slot: &mut Option<f64>, matcher: &PatternMatcher, text: &str) {
    let result = matcher.search(text);
    if !result.is_match {
        return;
    }
    *slot = Some(match *slot {
        Some(existing) => existing.min(result.score),
        None => result.score,
    });
}
