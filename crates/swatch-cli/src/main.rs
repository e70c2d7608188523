//! `swatch` binary

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = swatch_cli::command().get_matches();
    swatch_cli::init_tracing(matches.get_count("verbose"), matches.get_flag("json-logs"));

    match swatch_cli::run(&matches).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
