use anyhow::Result;
use clap::Parser;
use seeker::config::{Config, OutputFormat, load_config};
use seeker::sources::{Source, dir::DirSource, json::JsonSource, lines::LinesSource};
use seeker::{Entries, Ranked, SearchEngine};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to look for (at most 32 characters)
    pattern: String,

    /// Read entries from a JSON array of strings or objects
    #[arg(long, conflicts_with_all = ["lines", "dir"])]
    json: Option<PathBuf>,

    /// Read one entry per line from a file
    #[arg(long, conflicts_with = "dir")]
    lines: Option<PathBuf>,

    /// Use file paths below a directory as entries
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Maximum directory depth for --dir
    #[arg(long, requires = "dir")]
    max_depth: Option<usize>,

    /// Record field to search (repeatable)
    #[arg(short, long = "key")]
    keys: Vec<String>,

    /// Print this record field instead of the whole record
    #[arg(long)]
    id: Option<String>,

    /// Expected match offset
    #[arg(long)]
    location: Option<usize>,

    /// How fast distance from --location degrades the score (0 = exact location only)
    #[arg(long)]
    distance: Option<usize>,

    /// Highest accepted score
    #[arg(short, long)]
    threshold: Option<f64>,

    #[arg(short = 's', long)]
    case_sensitive: bool,

    /// Print at most N results
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print scores next to results
    #[arg(long)]
    scores: bool,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (defaults to the per-user config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if !self.keys.is_empty() {
            config.search.keys = self.keys.clone();
        }
        if self.id.is_some() {
            config.search.id = self.id.clone();
        }
        if let Some(location) = self.location {
            config.matching.location = location;
        }
        if let Some(distance) = self.distance {
            config.matching.distance = distance;
        }
        if let Some(threshold) = self.threshold {
            config.matching.threshold = threshold;
        }
        if self.case_sensitive {
            config.matching.case_sensitive = true;
        }
        if self.limit.is_some() {
            config.output.limit = self.limit;
        }
        if self.scores {
            config.output.show_scores = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }

    fn source(&self) -> Box<dyn Source> {
        if let Some(path) = &self.json {
            Box::new(JsonSource { path: path.clone() })
        } else if let Some(root) = &self.dir {
            Box::new(DirSource {
                root: root.clone(),
                max_depth: self.max_depth,
            })
        } else {
            Box::new(LinesSource { path: self.lines.clone() })
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);

    let entries: Entries = args.source().load()?;
    let engine = SearchEngine::new(&entries, config.search_options());
    let mut ranked = engine.search(&args.pattern)?;
    if let Some(limit) = config.output.limit {
        ranked.truncate(limit);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_results(&mut out, &ranked, &config)?;
    out.flush()?;
    Ok(())
}

fn print_results(out: &mut impl Write, ranked: &[Ranked<'_>], config: &Config) -> Result<()> {
    match config.output.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, ranked)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for r in ranked {
                if config.output.show_scores {
                    writeln!(out, "{:.4}\t{}", r.score, r.item)?;
                } else {
                    writeln!(out, "{}", r.item)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seeker::SearchOptions;

    fn render(ranked: &[Ranked<'_>], config: &Config) -> String {
        let mut buf = Vec::new();
        print_results(&mut buf, ranked, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "seeker", "old", "-k", "title", "-k", "author", "--threshold", "0.2", "-s", "--scores",
        ]);
        let mut config = Config::default();
        config.search.id = Some("isbn".to_string());
        args.apply(&mut config);

        assert_eq!(config.search.keys, vec!["title", "author"]);
        assert_eq!(config.search.id.as_deref(), Some("isbn"));
        assert_eq!(config.matching.threshold, 0.2);
        assert_eq!(config.matching.distance, 100);
        assert!(config.matching.case_sensitive);
        assert!(config.output.show_scores);
    }

    #[test]
    fn test_conflicting_inputs_rejected() {
        assert!(Args::try_parse_from(["seeker", "x", "--json", "a.json", "--dir", "."]).is_err());
        assert!(Args::try_parse_from(["seeker", "x", "--max-depth", "2"]).is_err());
    }

    #[test]
    fn test_plain_and_json_output() {
        let entries = Entries::from(vec!["old man", "ole man", "mango"]);
        let engine = SearchEngine::new(&entries, SearchOptions::default());
        let ranked = engine.search("old").unwrap();

        let mut config = Config::default();
        assert_eq!(render(&ranked, &config), "old man\nole man\n");

        config.output.show_scores = true;
        assert_eq!(render(&ranked, &config), "0.0000\told man\n0.3333\tole man\n");

        config.output.format = OutputFormat::Json;
        let json: serde_json::Value = serde_json::from_str(&render(&ranked, &config)).unwrap();
        assert_eq!(json[0]["item"], "old man");
        assert_eq!(json[1]["index"], 1);
    }
}
