use clap::Parser;
use std::path::{Path, PathBuf};

const AFTER_HELP: &str = "\
Input format:
  The bundled decoder reads elimination feeds exported from replays, one
  JSON elimination record per line. Raw PBDEMS2 replays are not decoded and
  are reported as failed; export their eliminations to a feed first.

Examples:
  wasted-utility --csv demos.csv --output results.json
  wasted-utility --csv demos.csv --cache my_cache.json
  wasted-utility --csv demos.csv --no-cache
  wasted-utility --workers 4 match1.dem match2.dem";

/// Measures the grenade value players were still holding when eliminated,
/// across any number of replays.
#[derive(Debug, Parser)]
#[command(name = "wasted-utility", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Replay files or directories to analyze.
    pub paths: Vec<PathBuf>,

    /// Manifest listing one replay path per line.
    #[arg(long = "csv", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Write the full JSON report here.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the per-player table here.
    #[arg(long = "output-csv", value_name = "FILE")]
    pub output_csv: Option<PathBuf>,

    /// Cache file used to skip replays analyzed by earlier runs.
    #[arg(long, value_name = "FILE", default_value = "demo_cache.json")]
    pub cache: PathBuf,

    /// Analyze every replay, neither reading nor writing the cache file.
    #[arg(long)]
    pub no_cache: bool,

    /// Number of concurrent workers (0 = number of CPU cores).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Log every file as it is processed instead of showing a progress bar.
    #[arg(short, long)]
    pub verbose: bool,

    /// Extension that identifies replay files.
    #[arg(long, default_value = "dem")]
    pub extension: String,
}

impl Cli {
    /// The cache file to load and save, if caching is enabled.
    pub fn cache_path(&self) -> Option<&Path> {
        if self.no_cache {
            return None;
        }
        Some(&self.cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["wasted-utility", "a.dem"]);
        assert_eq!(cli.paths, vec![PathBuf::from("a.dem")]);
        assert_eq!(cli.workers, 0);
        assert_eq!(cli.extension, "dem");
        assert_eq!(cli.cache_path(), Some(Path::new("demo_cache.json")));
    }

    #[test]
    fn no_cache_wins_over_cache_path() {
        let cli = Cli::parse_from(["wasted-utility", "--cache", "c.json", "--no-cache", "a.dem"]);
        assert_eq!(cli.cache_path(), None);
    }

    #[test]
    fn all_flags_parse() {
        let cli = Cli::parse_from([
            "wasted-utility",
            "--csv",
            "demos.csv",
            "--output",
            "out.json",
            "--output-csv",
            "out.csv",
            "--workers",
            "4",
            "-v",
            "dir",
        ]);
        assert_eq!(cli.manifest, Some(PathBuf::from("demos.csv")));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.output_csv, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.workers, 4);
        assert!(cli.verbose);
    }

    #[test]
    fn help_describes_supported_input_format() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("JSON elimination record per line"));
        assert!(help.contains("Raw PBDEMS2 replays are not decoded"));
    }
}
