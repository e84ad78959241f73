//! Progress bar utilities for displaying decode status

use kdam::{Animation, Bar, BarExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a progress bar over `total` images.
pub fn create_progress_bar(total: usize, desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " images"
    )))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Increment a shared counter and update the progress bar every `chunk_size` items.
/// Call from parallel workers to reduce lock contention while still updating progress.
pub fn report_progress_batched(pb: Option<&ProgressBar>, counter: &AtomicUsize, chunk_size: usize) {
    let count = counter.fetch_add(1, Ordering::Relaxed);
    if let Some(pb) = pb
        && (count + 1).is_multiple_of(chunk_size)
    {
        update_progress_bar(pb, chunk_size);
    }
}

/// Final progress update: bring the bar to `total` after the workers are joined.
pub fn finish_progress(pb: Option<&ProgressBar>, total: usize) {
    if let Some(pb) = pb
        && let Ok(mut bar) = pb.lock()
    {
        bar.total = total;
        let _ = bar.update_to(total);
        let _ = bar.refresh();
    }
}
