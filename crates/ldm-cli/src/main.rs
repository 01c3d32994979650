//! `ldm` - inspect linked-data subjects the way edit forms see them
//!
//! ```text
//! ldm describe --vocabulary shapes.json --metadata data.json http://example.com/iri/collection1
//! ldm validate --vocabulary shapes.json --metadata data.json http://example.com/iri/collection1
//! ldm namespaces --vocabulary shapes.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod cli;
mod commands;

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli::command().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match commands::run(&matches).await {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
