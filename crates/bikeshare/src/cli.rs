//! CLI argument parsing.
//!
//! The tool is interactive, so flags only shape where data comes from and
//! how it is shown; the filters themselves are asked for at the prompt.
//!
//! # Example
//!
//! ```bash
//! bikeshare --data-dir ./data
//! bikeshare --config bikeshare.yaml --skip-malformed --no-color
//! ```

use crate::config::DataConfig;
use crate::loader::LoadOptions;
use crate::output::OutputConfig;
use crate::prompt::Console;
use crate::session::Session;
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// Explore US bikeshare trip data
///
/// Prompts for a city, month and weekday, then prints popular times,
/// stations, trip durations and rider statistics for the matching trips.
#[derive(Parser, Debug)]
#[command(name = "bikeshare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file mapping each city to its CSV file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the city CSV files (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip rows that fail to parse instead of aborting the load
    #[arg(long)]
    pub skip_malformed: bool,

    /// Give up after this many invalid answers to one question
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_attempts: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Resolve the data configuration.
    ///
    /// Precedence, lowest first: defaults, `--config`, `BIKESHARE_DATA_DIR`,
    /// `--data-dir`.
    pub fn data_config(&self) -> Result<DataConfig> {
        let config = match &self.config {
            Some(path) => DataConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => DataConfig::default(),
        }
        .with_env_overrides();

        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir),
            None => config,
        })
    }

    /// Output styling from flags and environment.
    pub fn output_config(&self) -> OutputConfig {
        if self.no_color {
            OutputConfig::new(false)
        } else {
            OutputConfig::from_env()
        }
    }

    /// Row-handling options from flags.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_malformed: self.skip_malformed,
        }
    }

    /// Run an interactive session on stdin/stdout.
    pub fn execute(&self) -> Result<()> {
        let data_config = self.data_config()?;
        tracing::debug!(data_dir = %data_config.data_dir.display(), "Resolved data configuration");

        let max_attempts = self
            .max_attempts
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX));
        let console =
            Console::new(io::stdin().lock(), io::stdout()).with_max_attempts(max_attempts);

        Session::new(data_config, console)
            .with_load_options(self.load_options())
            .with_output_config(self.output_config())
            .run()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bikeshare"]).unwrap();

        assert!(cli.config.is_none());
        assert!(cli.data_dir.is_none());
        assert!(!cli.skip_malformed);
        assert!(cli.max_attempts.is_none());
        assert_eq!(cli.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "bikeshare",
            "--data-dir",
            "/tmp/trips",
            "--skip-malformed",
            "--max-attempts",
            "3",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/trips")));
        assert!(cli.load_options().skip_malformed);
        assert_eq!(cli.max_attempts, Some(3));
        assert!(!cli.output_config().use_colors);
    }

    #[test]
    fn test_max_attempts_must_be_positive() {
        assert!(Cli::try_parse_from(["bikeshare", "--max-attempts", "0"]).is_err());
    }

    #[test]
    fn test_data_dir_flag_overrides_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bikeshare.yaml");
        fs::write(&path, "data-dir: from-file\ncities:\n  chicago: chi.csv\n").unwrap();

        let cli = Cli::try_parse_from([
            OsString::from("bikeshare"),
            OsString::from("--config"),
            path.into_os_string(),
            OsString::from("--data-dir"),
            OsString::from("from-flag"),
        ])
        .unwrap();

        let config = cli.data_config().unwrap();
        assert_eq!(
            config.path_for(City::Chicago).unwrap(),
            PathBuf::from("from-flag/chi.csv")
        );
    }

    #[test]
    fn test_unreadable_config_file() {
        let cli = Cli::try_parse_from(["bikeshare", "--config", "/nonexistent/bikeshare.yaml"])
            .unwrap();

        let err = cli.data_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
