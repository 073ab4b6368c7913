// =============================================================================
// Fourier Arithmetic Simulator - Experiment Driver
// =============================================================================
// Table of Contents:
//   0. Command-line arguments
//   1. Logging setup
//   2. Configuration loading
//   3. Suite execution and reporting
// =============================================================================
// Purpose: Command-line entry point. Usage: `arithmetic_driver [config.toml]`.
//          Log verbosity follows RUST_LOG and defaults to `info`.
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use fourier_arithmetic::config::ArithmeticSuiteConfiguration;
use fourier_arithmetic::suite::{ArithmeticSuite, SuiteEvent};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// =============================================================================
// 0. Command-line arguments
// =============================================================================

/// Runs the Fourier-basis arithmetic experiment suite.
#[derive(Debug, Parser)]
#[command(name = "arithmetic_driver", version)]
struct Cli {
    /// TOML suite configuration; built-in defaults when omitted.
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // =========================================================================
    // 1. Logging setup
    // =========================================================================
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // =========================================================================
    // 2. Configuration loading
    // =========================================================================
    let configuration = match &cli.config {
        Some(path) => ArithmeticSuiteConfiguration::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ArithmeticSuiteConfiguration::default(),
    };
    let json_report = configuration.json_report;
    tracing::info!(
        operand_width = configuration.operand_width,
        large_operand_width = configuration.large_addition.operand_width,
        json_report,
        "Starting arithmetic suite"
    );

    // =========================================================================
    // 3. Suite execution and reporting
    // =========================================================================
    let suite = ArithmeticSuite::new(configuration)?;
    let summary = suite
        .run(|event| match event {
            SuiteEvent::SectionStarted(title) => println!("{title}..."),
            SuiteEvent::Completed(outcome) if json_report => match outcome.to_json() {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::error!(%err, "Could not serialize outcome"),
            },
            SuiteEvent::Completed(outcome) => tracing::debug!(%outcome, "Run verified"),
            SuiteEvent::StateDump(dump) => print!("{dump}"),
        })
        .context("arithmetic suite failed")?;

    println!(
        "All {} runs verified ({} gates, widest state {} qubits).",
        summary.runs, summary.total_gates, summary.widest_state
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_config_path_is_optional() {
        let cli = Cli::try_parse_from(["arithmetic_driver"]).unwrap();
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["arithmetic_driver", "suite.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("suite.toml")));
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["arithmetic_driver", "suite.toml", "extra"]).is_err());

        let err = Cli::try_parse_from(["arithmetic_driver", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_a_config_path() {
        let err = Cli::try_parse_from(["arithmetic_driver", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
