//! Public and internal types for the histsearch API and pipeline.

use serde::Serialize;
use std::path::PathBuf;

use crate::utils::config::SearchDefaults;

/// Depth-quantized color histogram of one image.
///
/// `bins` has `depth + 1` slots; red, green and blue each add one count per pixel
/// (alpha is ignored), so `total() == 3 * width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    /// Source path. Identity for result reporting.
    pub name: PathBuf,
    pub bins: Vec<u64>,
}

impl Histogram {
    /// Sum of all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Highest bin index (`bins.len() - 1`).
    pub fn depth(&self) -> usize {
        self.bins.len().saturating_sub(1)
    }
}

/// One message on the histogram channel, tagged by where it came from.
#[derive(Debug)]
pub enum Record {
    Query(Histogram),
    Candidate(Histogram),
}

/// A ranked candidate: its histogram and intersection distance to the query.
#[derive(Clone, Debug)]
pub struct Match {
    pub histogram: Histogram,
    pub distance: u64,
}

/// Result of a search: the query histogram, the retained top-K in list order, and skipped files.
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: Histogram,
    pub matches: Vec<Match>,
    /// `(path, reason)` for every candidate whose histogram could not be computed.
    pub skipped: Vec<(PathBuf, String)>,
}

/// JSON shape of a [`SearchOutcome`] for `--json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub query: &'a PathBuf,
    pub histogram: &'a [u64],
    pub matches: Vec<JsonMatch<'a>>,
    pub skipped: Vec<JsonSkipped<'a>>,
}

#[derive(Serialize)]
pub struct JsonMatch<'a> {
    pub rank: usize,
    pub path: &'a PathBuf,
    pub distance: u64,
}

#[derive(Serialize)]
pub struct JsonSkipped<'a> {
    pub path: &'a PathBuf,
    pub reason: &'a str,
}

impl<'a> From<&'a SearchOutcome> for JsonReport<'a> {
    fn from(o: &'a SearchOutcome) -> Self {
        JsonReport {
            query: &o.query.name,
            histogram: &o.query.bins,
            matches: o
                .matches
                .iter()
                .enumerate()
                .map(|(i, m)| JsonMatch {
                    rank: i + 1,
                    path: &m.histogram.name,
                    distance: m.distance,
                })
                .collect(),
            skipped: o
                .skipped
                .iter()
                .map(|(path, reason)| JsonSkipped {
                    path,
                    reason: reason.as_str(),
                })
                .collect(),
        }
    }
}

/// Lib-only options for [`search_dir`](crate::search_dir).
#[derive(Clone, Debug)]
pub struct SearchOpts {
    /// Worker thread count. `None` uses the default; `Some(0)` uses available cores.
    pub num_threads: Option<usize>,
    /// Number of matches to retain.
    pub top_k: usize,
    /// Maximum bin index. Values above it are clamped into the last bin.
    pub depth: usize,
}

impl Default for SearchOpts {
    fn default() -> Self {
        Self {
            num_threads: None,
            top_k: SearchDefaults::TOP_K,
            depth: SearchDefaults::DEPTH,
        }
    }
}

impl From<&SearchOpts> for Opts {
    fn from(o: &SearchOpts) -> Self {
        Opts {
            num_threads: o.num_threads,
            top_k: o.top_k,
            depth: o.depth,
            verbose: false,
            json: false,
            cancel: None,
        }
    }
}

/// Full options (CLI). Use [`SearchOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Worker thread count. `None` uses the default; `Some(0)` uses available cores.
    pub num_threads: Option<usize>,
    /// Number of matches to retain.
    pub top_k: usize,
    /// Maximum bin index.
    pub depth: usize,
    /// Show progress bar (verbose mode).
    pub verbose: bool,
    /// Print the report as JSON.
    pub json: bool,
    /// Set to request cancellation; workers stop before their next file.
    pub cancel: Option<std::sync::Arc<std::sync::atomic::AtomicBool>>,
}

impl Default for Opts {
    fn default() -> Self {
        Opts::from(&SearchOpts::default())
    }
}
