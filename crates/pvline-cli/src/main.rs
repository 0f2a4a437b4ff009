use pvline_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    match CliCommand::run_from_args() {
        Ok(0) => {}
        Ok(code) => std::process::exit(i32::from(code)),
        Err(err) => {
            eprintln!("pvline error: {:#}", err);
            std::process::exit(1);
        }
    }
}
