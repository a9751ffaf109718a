//! CLI entry point for md5mirror.

use std::process::ExitCode;

use clap::Parser;
use md5mirror_core::{HttpClient, Mirror, determine_exit_outcome};
use tracing::debug;

mod app_config;
mod cli;
mod output;
mod terminal;

use cli::Args;
use output::ConsoleReporter;

/// Exit code for an unreadable or invalid config file, same as a clap usage error.
const CONFIG_ERROR_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded = match app_config::load_default_file_config() {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("error: {error:#}");
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };
    let file_config = loaded.config.as_ref();

    terminal::init_tracing(app_config::resolve_log_level(&args, file_config));
    debug!(?args, config_path = ?loaded.path, "CLI arguments parsed");

    let config = app_config::build_run_config(&args, file_config);
    debug!(?config, "run configuration resolved");

    println!(
        "{}",
        output::banner_line(config.base_url(), config.output_dir())
    );

    let client = HttpClient::new();
    let mut reporter = ConsoleReporter;
    let result = Mirror::new(&config, &client).run(&mut reporter).await;

    match &result {
        Ok(summary) => output::print_summary(summary, config.keep_mismatched()),
        Err(error) => println!("{}", output::fatal_line(error)),
    }

    determine_exit_outcome(&result, config.keep_mismatched()).into()
}
