use crate::model::Entries;
use crate::sources::Source;
use anyhow::{Context, Result, bail};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// A JSON file holding an array of strings or an array of objects.
pub struct JsonSource {
    pub path: PathBuf,
}

impl Source for JsonSource {
    fn load(&self) -> Result<Entries> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;

        let Value::Array(values) = value else {
            bail!("{} must contain a JSON array", self.path.display());
        };

        let entries = Entries::from_values(values);
        info!("JsonSource: loaded {} entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }
}
