//! Sales data pipeline CLI.

use std::process::ExitCode;

use clap::Parser;

use tally_cli::{PipelineConfig, PipelineError, run_and_export};

mod cli;

use crate::cli::Cli;

/// Exit code when validation stopped the run under the abort policy.
const EXIT_VALIDATION_ABORTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    tally_observability::init(cli.log_format.into());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "run failed");
            eprintln!("error: {error:#}");
            let aborted = error
                .downcast_ref::<PipelineError>()
                .is_some_and(|e| matches!(e, PipelineError::Aborted(_)));
            if aborted {
                ExitCode::from(EXIT_VALIDATION_ABORTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.apply_overrides(PipelineConfig::from_env());
    tracing::info!(
        policy = %config.validation_policy,
        top_n = config.metrics.top_n,
        sort_cap = config.benchmark.sort_cap,
        "starting run"
    );

    let (output, paths) = run_and_export(&cli.input, &config, &cli.output_dir)?;

    if cli.print_summary {
        print!("{}", tally_cli::render_summary(&output, Some(&paths)));
    } else {
        println!("summary written to {}", paths.summary.display());
    }
    Ok(())
}
