//! histsearch: content-based image similarity search by color histogram intersection

pub mod engine;
pub mod errors;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by public histsearch API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: rank the `*.jpg` files directly under `dataset_dir` by histogram
/// intersection with `query` and return the query histogram, the top-K matches, and skipped files.
///
/// Matches are in the collector's list order (not sorted by distance). Files that fail to
/// decode are listed in [`SearchOutcome::skipped`]; a query that fails to decode is an error.
pub fn search_dir(query: &Path, dataset_dir: &Path, opts: &SearchOpts) -> Result<SearchOutcome> {
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    pipeline::search(query, dataset_dir, &opts)
}
