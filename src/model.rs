use log::warn;
use serde_json::{Map, Value};

/// A structured entry: named fields, of which only string values are searched.
pub type Record = Map<String, Value>;

/// The collection a [`SearchEngine`](crate::SearchEngine) searches over.
///
/// The shape is decided once, when the collection is built; an engine never
/// has to ask whether a single entry is a string or a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Entries {
    Strings(Vec<String>),
    Records(Vec<Record>),
}

impl Default for Entries {
    fn default() -> Self {
        Entries::Strings(Vec::new())
    }
}

impl Entries {
    /// Builds a collection from loosely typed JSON values.
    ///
    /// The first value picks the shape. Values of any other shape are dropped
    /// with a warning, so indexes refer to the returned collection.
    pub fn from_values(values: Vec<Value>) -> Self {
        match values.first() {
            None | Some(Value::String(_)) => {
                let mut strings = Vec::with_capacity(values.len());
                for (i, value) in values.into_iter().enumerate() {
                    match value {
                        Value::String(s) => strings.push(s),
                        other => warn!("Entries: skipping non-string value at {}: {}", i, other),
                    }
                }
                Entries::Strings(strings)
            }
            Some(_) => {
                let mut records = Vec::with_capacity(values.len());
                for (i, value) in values.into_iter().enumerate() {
                    match value {
                        Value::Object(map) => records.push(map),
                        other => warn!("Entries: skipping non-object value at {}: {}", i, other),
                    }
                }
                Entries::Records(records)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Entries::Strings(v) => v.len(),
            Entries::Records(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for Entries {
    fn from(strings: Vec<String>) -> Self {
        Entries::Strings(strings)
    }
}

impl From<Vec<&str>> for Entries {
    fn from(strings: Vec<&str>) -> Self {
        Entries::Strings(strings.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Record>> for Entries {
    fn from(records: Vec<Record>) -> Self {
        Entries::Records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_string_makes_string_collection() {
        let entries = Entries::from_values(vec![json!("a"), json!(1), json!("b")]);
        assert_eq!(entries, Entries::from(vec!["a", "b"]));
    }

    #[test]
    fn test_first_object_makes_record_collection() {
        let entries = Entries::from_values(vec![
            json!({"name": "a"}),
            json!("b"),
            json!({"name": "c"}),
        ]);
        match entries {
            Entries::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1]["name"], json!("c"));
            }
            Entries::Strings(_) => panic!("expected records"),
        }
    }

    #[test]
    fn test_empty_values() {
        let entries = Entries::from_values(vec![]);
        assert!(entries.is_empty());
        assert_eq!(entries, Entries::default());
    }
}
