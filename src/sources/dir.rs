use crate::model::Entries;
use crate::sources::Source;
use anyhow::Result;
use log::{debug, info, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Every file below `root`, as a path relative to `root`.
pub struct DirSource {
    pub root: PathBuf,
    pub max_depth: Option<usize>,
}

impl Source for DirSource {
    fn load(&self) -> Result<Entries> {
        debug!("Scanning files in {:?}", self.root);
        let mut walker = WalkDir::new(&self.root).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    warn!("DirSource: skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            paths.push(relative.to_string_lossy().into_owned());
        }

        info!("DirSource: found {} entries", paths.len());
        Ok(Entries::Strings(paths))
    }
}
