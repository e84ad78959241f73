//! Engine module: histogram building, similarity, ranking, CLI

pub mod arg_parser;
pub mod cli;
pub mod histogram;
pub mod intersection;
pub mod progress;
pub mod ranking;
pub mod report;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, ParsedArgs, parse_args_from};
pub use cli::handle_run;
pub use histogram::{PixelSource, Rgba16Image, compute_histogram, histogram_from_pixels, quantize};
pub use intersection::intersection_distance;
pub use ranking::TopK;
pub use report::{write_json_report, write_report};
pub use tools::{format_bins, is_candidate_name, partition_batches, resolve_worker_count};
