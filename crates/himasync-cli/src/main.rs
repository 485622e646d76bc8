use himasync_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Item failures are logged, not fatal; only setup errors exit non-zero.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("himasync error: {:#}", err);
        std::process::exit(1);
    }
}
