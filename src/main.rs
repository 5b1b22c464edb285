//! CLI entry point for mhttp.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use mhttp_core::{Dispatcher, HttpClient, StdoutSink};
use tracing::debug;

mod cli;
mod terminal;

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let no_color = terminal::should_disable_color(
        terminal::no_color_env_requested(),
        terminal::is_dumb_terminal(),
    );
    terminal::init_tracing(terminal::default_log_level(args.verbose), no_color);
    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let options = args.to_request_options()?;
    let client = HttpClient::new_with_timeouts(args.connect_timeout, args.read_timeout);
    let show_progress =
        terminal::should_show_progress(io::stderr().is_terminal(), terminal::is_dumb_terminal());

    let mut dispatcher = Dispatcher::new(client, StdoutSink)
        .with_output_dir(args.output_dir)
        .with_progress(show_progress);

    let outcome = dispatcher.perform(options).await?;
    debug!(?outcome, "request finished");
    Ok(())
}
