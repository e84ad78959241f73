//! Worker pool: each worker turns its batch of paths into histograms and sends them on the record channel.

use crossbeam_channel::Sender;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

use crate::Record;
use crate::engine::histogram::compute_histogram;
use crate::engine::progress::report_progress_batched;
use crate::utils::config::ProgressConsts;

use super::context::PipelineContext;

/// Process one batch in order. Failures are logged and recorded, never sent.
fn histogram_worker_loop(
    worker_id: usize,
    batch: Vec<PathBuf>,
    record_tx: Sender<Record>,
    ctx: PipelineContext,
) {
    for path in batch {
        if ctx.cancel.load(Ordering::Relaxed) {
            debug!("worker {}: cancelled", worker_id);
            break;
        }
        let result = compute_histogram(&path, ctx.depth);
        report_progress_batched(
            ctx.progress.as_ref(),
            &ctx.processed,
            ProgressConsts::PROGRESS_UPDATE_BATCH_SIZE,
        );
        match result {
            Ok(histogram) => {
                if record_tx.send(Record::Candidate(histogram)).is_err() {
                    // Collector is gone; nothing left to deliver to.
                    break;
                }
            }
            Err(e) => {
                let reason = e.reason();
                warn!("Error computing histogram for {}: {}", path.display(), reason);
                ctx.skipped_paths.lock().unwrap().push((path, reason));
            }
        }
    }
    drop(record_tx);
}

/// Spawn one worker per batch. Caller must drop its sender after this so the channel closes when workers exit.
pub fn spawn_histogram_workers(
    batches: Vec<Vec<PathBuf>>,
    record_tx: &Sender<Record>,
    ctx: &PipelineContext,
) -> Vec<JoinHandle<()>> {
    batches
        .into_iter()
        .enumerate()
        .map(|(worker_id, batch)| {
            let record_tx = record_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || histogram_worker_loop(worker_id, batch, record_tx, ctx))
        })
        .collect()
}

/// Spawn the query task. Its histogram goes on the same channel, tagged [`Record::Query`].
pub fn spawn_query_task(
    query: &Path,
    record_tx: &Sender<Record>,
    ctx: &PipelineContext,
) -> JoinHandle<()> {
    let query = query.to_path_buf();
    let record_tx = record_tx.clone();
    let ctx = ctx.clone();
    thread::spawn(move || {
        let result = compute_histogram(&query, ctx.depth);
        report_progress_batched(
            ctx.progress.as_ref(),
            &ctx.processed,
            ProgressConsts::PROGRESS_UPDATE_BATCH_SIZE,
        );
        match result {
            Ok(histogram) => {
                let _ = record_tx.send(Record::Query(histogram));
            }
            Err(e) => {
                let reason = e.reason();
                warn!("Error computing histogram for {}: {}", query.display(), reason);
                let _ = ctx.query_error.lock().unwrap().get_or_insert(reason);
            }
        }
    })
}
