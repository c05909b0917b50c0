use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the console renders listings and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fsnav", about = "Interactive console file-system browser")]
pub struct Cli {
    /// Directory to start in (defaults to the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value_t, value_enum)]
    pub format: OutputFormat,

    /// Default tracing filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn", value_name = "DIRECTIVE")]
    pub log_level: String,

    /// Do not print the greeting banner
    #[arg(long)]
    pub no_banner: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub start_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub log_directive: String,
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            format: OutputFormat::Text,
            log_directive: "warn".to_string(),
            banner: true,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            start_dir: cli.dir,
            format: cli.format,
            log_directive: cli.log_level,
            banner: !cli.no_banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_flags() {
        let config = Config::from(Cli::parse_from(["fsnav"]));
        assert!(config.start_dir.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_directive, "warn");
        assert!(config.banner);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::from(Cli::parse_from([
            "fsnav",
            "--dir",
            "/tmp",
            "--format",
            "json",
            "--no-banner",
        ]));
        assert_eq!(config.start_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.banner);
    }
}
