mod args;
mod copier;
mod error;
mod logging;
mod options;
mod progress;
mod replacer;
mod scanner;
mod writer;

use anyhow::{Context, Result};
use progress::{ConsoleProgress, NoProgress, ProgressSink};
use std::process::ExitCode;
use std::sync::Arc;

/// Main entry point of the application
/// Help and version requests exit with 0, every failure exits with 1
fn main() -> ExitCode {
    let args = match args::parse() {
        args::Parsed::Run(args) => args,
        args::Parsed::Display(text) => {
            print!("{}", text);
            return ExitCode::SUCCESS;
        }
        args::Parsed::Invalid(text) => {
            eprint!("{}", text);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<error::Error>() {
                // Input problems get a one line message, everything else the full chain
                Some(err) if err.is_configuration() => eprintln!("Error: {}", err),
                _ => eprintln!("Error: {:?}", e),
            }
            ExitCode::FAILURE
        }
    }
}

/// Resolves the plan and runs the copy on a fresh runtime
///
/// # Arguments
/// * `args` - Parsed command line arguments
fn run(args: &args::Args) -> Result<()> {
    let plan = options::ExecutionPlan::from_args(args)?;
    tracing::debug!(?plan, "resolved execution plan");

    let progress: Arc<dyn ProgressSink> = if args.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ConsoleProgress)
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(copier::copy(&plan, progress))?;

    Ok(())
}
