#![forbid(unsafe_code)]

mod cmd;
mod ingest;
mod layout;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use snda_core::ErrorCode;
use snda_core::config::{AnalysisConfig, load_config};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "snda.toml";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "snda: centrality rankings and weekly evolution for interaction networks",
    long_about = None
)]
struct Cli {
    /// Output format (defaults to pretty on a terminal, text when piped).
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// TOML config file for `analyze` [default: ./snda.toml if present].
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }

    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank actors by centrality in one or more datasets",
        long_about = "Build the interaction graph of each dataset and print its node and \
                      edge totals plus the top-K actors by degree, closeness, betweenness \
                      and eigenvector centrality.",
        after_help = "EXAMPLES:\n    # Compare two fan communities\n    snda analyze --dataset 'Justin Bieber=jb.csv' --dataset 'One Direction=1d.csv'\n\n    # Top 5 only, as JSON\n    snda analyze --dataset jb.csv --top-k 5 --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Split a dataset into per-week interaction graphs",
        long_about = "Group a dataset's interactions by ISO calendar week (Monday to Sunday, \
                      UTC) and report each observed week's graph.",
        after_help = "EXAMPLES:\n    snda weekly --dataset 'One Direction=1d.csv'\n\n    # Node positions for plotting\n    snda weekly --dataset 1d.csv --layout spring --format json"
    )]
    Weekly(cmd::weekly::WeeklyArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SNDA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "snda=debug,info"
        } else {
            "snda=info,warn"
        })
    });

    let format = env::var("SNDA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load the analysis config, reporting parse failures through the output layer.
fn load_analysis_config(cli: &Cli, output: OutputMode) -> anyhow::Result<AnalysisConfig> {
    let path = cli.config_path();
    match load_config(&path) {
        Ok(config) => {
            debug!(path = %path.display(), ?config, "config loaded");
            Ok(config)
        }
        Err(err) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            Err(err)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    match cli.command {
        Commands::Analyze(ref args) => {
            let config = load_analysis_config(&cli, output)?;
            cmd::analyze::run_analyze(args, &config, output)
        }
        Commands::Weekly(ref args) => cmd::weekly::run_weekly(args, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_accepts_repeated_datasets() {
        let cli = Cli::parse_from([
            "snda",
            "analyze",
            "--dataset",
            "jb=a.csv",
            "--dataset",
            "od=b.csv",
            "--top-k",
            "5",
        ]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.datasets.len(), 2);
                assert_eq!(args.datasets[1].label, "od");
                assert_eq!(args.top_k, Some(5));
            }
            Commands::Weekly(_) => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_requires_a_dataset() {
        assert!(Cli::try_parse_from(["snda", "analyze"]).is_err());
    }

    #[test]
    fn weekly_takes_exactly_one_dataset() {
        let cli = Cli::parse_from(["snda", "weekly", "--dataset", "od=b.csv"]);
        match cli.command {
            Commands::Weekly(args) => {
                assert_eq!(args.dataset.label, "od");
                assert_eq!(args.layout, layout::LayoutKind::Circle);
            }
            Commands::Analyze(_) => panic!("expected weekly"),
        }
        assert!(
            Cli::try_parse_from(["snda", "weekly", "--dataset", "a=x.csv", "--dataset", "b=y.csv"])
                .is_err()
        );
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::parse_from(["snda", "weekly", "--dataset", "x.csv", "--format", "json"]);
        assert!(cli.output_mode().is_json());
        let cli = Cli::parse_from(["snda", "--json", "weekly", "--dataset", "x.csv"]);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn config_defaults_to_working_directory_file() {
        let cli = Cli::parse_from(["snda", "weekly", "--dataset", "x.csv"]);
        assert_eq!(cli.config_path(), PathBuf::from(DEFAULT_CONFIG));
        let cli = Cli::parse_from(["snda", "--config", "/etc/snda.toml", "weekly", "--dataset", "x.csv"]);
        assert_eq!(cli.config_path(), PathBuf::from("/etc/snda.toml"));
    }
}
