//! Path filters and work partitioning

use log::debug;
use std::path::{Path, PathBuf};

use crate::utils::config::{SearchDefaults, WorkerThreadLimits};
use crate::utils::fd_limit::max_workers_by_fd_limit;

/// True if the file name ends with `.jpg` (case sensitive; `.JPG` and `.jpeg` are not candidates).
pub fn is_candidate_name(path: &Path) -> bool {
    path.file_name().is_some_and(|n| {
        n.as_encoded_bytes()
            .ends_with(SearchDefaults::EXTENSION.as_bytes())
    })
}

/// Split `paths` into contiguous batches of `ceil(len / workers)`; the last batch may be shorter.
/// Returns at most `workers` batches and none for an empty input.
pub fn partition_batches(paths: &[PathBuf], workers: usize) -> Vec<Vec<PathBuf>> {
    if paths.is_empty() {
        return Vec::new();
    }
    let workers = workers.max(1);
    let batch_size = paths.len().div_ceil(workers);
    paths.chunks(batch_size).map(<[PathBuf]>::to_vec).collect()
}

/// Resolve the worker count: `None` → default, `Some(0)` → available cores, then cap by FD limit.
pub fn resolve_worker_count(requested: Option<usize>, limits: WorkerThreadLimits) -> usize {
    let wanted = match requested {
        None => limits.default,
        Some(0) => limits.all_threads.max(1),
        Some(n) => n,
    };
    match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < wanted => {
            debug!("Capping workers {} -> {} (FD limit ~80%)", wanted, fd_cap);
            fd_cap
        }
        _ => wanted,
    }
}

/// Format bins the way the report prints them: `[n0 n1 ... nD]`.
pub fn format_bins(bins: &[u64]) -> String {
    let inner: Vec<String> = bins.iter().map(u64::to_string).collect();
    format!("[{}]", inner.join(" "))
}
