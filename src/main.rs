// src/main.rs

use std::process::ExitCode;

use lk_reducer::{cli, logging, run};

// Returning instead of calling `process::exit` lets the runtime shut down
// and drop the shell watcher, which kills a still-running shell.
#[tokio::main]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lk-reducer error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
