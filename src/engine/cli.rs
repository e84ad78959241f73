//! CLI command handler: run one search and print the report to stdout.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::report::{write_json_report, write_report};
use crate::pipeline::search;
use crate::utils::setup_logging;
use crate::utils::config::SearchDefaults;

fn setup_opts(cli: &Cli) -> Opts {
    setup_logging(cli.verbose);
    Opts {
        num_threads: Some(cli.workers),
        top_k: cli.top_k,
        depth: SearchDefaults::DEPTH,
        verbose: cli.verbose,
        json: cli.json,
        cancel: None,
    }
}

/// Run a search for `cli.query` over `cli.dataset_dir` and print the report.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let mut opts = setup_opts(cli);
    debug!(
        "{} CONFIG: {:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_requested_handler = Arc::clone(&cancel_requested);
    ctrlc::set_handler(move || {
        cancel_requested_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;
    opts.cancel = Some(cancel_requested);

    let outcome = search(&cli.query, &cli.dataset_dir, &opts)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if opts.json {
        write_json_report(&mut out, &outcome)?;
    } else {
        write_report(&mut out, &outcome, opts.top_k)?;
    }
    out.flush()?;
    Ok(())
}
