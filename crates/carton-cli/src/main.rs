//! Carton Segregator CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use carton_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use carton_cli::commands::{run_concepts, run_invoices, run_pallets, run_scan};
use carton_cli::logging::{LogConfig, LogFormat, init_logging};
use carton_cli::settings::Settings;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Dispatch the subcommand. `Ok(false)` means a scan did not match.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let settings = Settings::load(cli.config.as_deref())?;
    let resolve = || settings.resolve_source(cli.concept.as_deref(), cli.source.as_deref());
    match &cli.command {
        Command::Concepts => run_concepts(&settings).map(|()| true),
        Command::Invoices => run_invoices(&settings, &resolve()?).map(|()| true),
        Command::Pallets(args) => run_pallets(&settings, &resolve()?, args).map(|()| true),
        Command::Scan(args) => run_scan(&settings, &resolve()?, args),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
