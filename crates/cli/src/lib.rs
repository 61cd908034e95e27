pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use policyscope_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

use crate::commands::compare::CompareArgs;

#[derive(Debug, Parser)]
#[command(
    name = "policyscope",
    about = "PolicyScope policy comparison and risk assessment CLI",
    long_about = "Rank insurance policies against weighted priorities and turn free-text analysis into prioritized risk factors.",
    after_help = "Examples:\n  policyscope compare --policies policies.json --criteria criteria.json\n  policyscope assess --input analysis.json\n  policyscope config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a policyscope.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the configured log level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Filter, score and rank candidate policies against comparison criteria")]
    Compare {
        #[arg(long, help = "JSON file holding an array of policies")]
        policies: PathBuf,
        #[arg(long, help = "JSON file holding the comparison criteria")]
        criteria: PathBuf,
        #[arg(long, help = "Rank the built-in sample policies when nothing is eligible")]
        sample_on_empty: bool,
    },
    #[command(about = "Detect risk factors in analysis text and build a prioritized assessment")]
    Assess {
        #[arg(long, help = "JSON file holding summaries, coverage gaps, risk factors and profile")]
        input: PathBuf,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
        require_file: false,
        overrides: ConfigOverrides { log_level: cli.log_level, ..ConfigOverrides::default() },
    };

    // Invalid config is reported by the command itself; logging falls back to defaults.
    let logging_config = AppConfig::load(options.clone()).unwrap_or_default();
    init_logging(&logging_config);

    let result = match cli.command {
        Command::Compare { policies, criteria, sample_on_empty } => {
            commands::compare::run(&options, &CompareArgs { policies, criteria, sample_on_empty })
        }
        Command::Assess { input } => commands::assess::run(&options, &input),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr; stdout carries only the JSON envelope.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
