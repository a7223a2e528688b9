//! eso-hourly entry point — CLI wiring and config-driven extraction.

use std::fmt::Display;
use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eso_hourly::cli::{Cli, report_error};
use eso_hourly::config::ExtractConfig;
use eso_hourly::runner::{list_variables, run_extraction};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(errors: &[impl Display]) -> ! {
    let mut stderr = io::stderr().lock();
    for e in errors {
        let _ = report_error(e, &mut stderr);
    }
    process::exit(1);
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Load config: --config file first, then CLI overrides
    let mut cfg = if let Some(ref path) = cli.config {
        ExtractConfig::from_toml_file(path).unwrap_or_else(|e| fail(&[e]))
    } else {
        ExtractConfig::default()
    };
    cli.apply(&mut cfg);

    // Validate
    let errors = cfg.validate();
    if !errors.is_empty() {
        fail(&errors);
    }

    if cli.listing_only() {
        if let Err(e) = list_variables(&cfg.input, cli.find.as_deref(), io::stdout().lock()) {
            fail(&[e]);
        }
        return;
    }

    let stdin = io::stdin();
    let mut prompt_in = stdin.lock();
    let mut prompt_out = io::stdout().lock();
    match run_extraction(&cfg, &mut prompt_in, &mut prompt_out) {
        Ok(report) => println!("\n{report}"),
        Err(e) => fail(&[e]),
    }
}
