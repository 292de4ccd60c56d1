//! `isogrid` binary: parses arguments, sets up logging and reports failures
//! as miette diagnostics on stderr.

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use miette::GraphicalReportHandler;

use isogrid::IsogridError;
use isogrid_cli::{Args, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(args.log_level)
        .init();

    info!(input = args.input, format:? = args.format; "Starting isogrid");
    debug!(args:?; "Parsed arguments");

    match isogrid_cli::run(&args) {
        Ok(()) => {
            info!("Report complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_diagnostics(&err);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics bypass the logger so `--log-level off` still shows them.
fn print_diagnostics(err: &IsogridError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &reportable).is_err() {
            rendered = reportable.to_string();
        }
        eprintln!("{rendered}");
    }
}
