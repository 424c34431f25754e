use crate::model::Entries;
use crate::sources::Source;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// One string entry per non-empty line, read from a file or from stdin.
pub struct LinesSource {
    pub path: Option<PathBuf>,
}

impl Source for LinesSource {
    fn load(&self) -> Result<Entries> {
        let content = match &self.path {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("reading stdin")?;
                buf
            }
        };

        let lines = parse_lines(&content);
        info!("LinesSource: loaded {} entries", lines.len());
        Ok(Entries::Strings(lines))
    }
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_blank_lines_dropped() {
        assert_eq!(parse_lines("one\n\n  \ntwo\r\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "old man\nole man\n\nmango").unwrap();
        let source = LinesSource {
            path: Some(file.path().to_path_buf()),
        };
        assert_eq!(
            source.load().unwrap(),
            Entries::from(vec!["old man", "ole man", "mango"])
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LinesSource {
            path: Some(dir.path().join("missing.txt")),
        };
        assert!(source.load().is_err());
    }
}
