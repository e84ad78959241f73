//! Pipeline context and tuning: shared state handed to every producer and the handles the collector joins.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::Record;
use crate::engine::progress::ProgressBar;

/// Worker count and channel capacity derived from the options.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
    /// Capacity of the record channel (one slot per worker plus one for the query).
    pub channel_cap: usize,
}

impl PipelineTuning {
    pub fn new(num_threads: usize) -> Self {
        let num_threads = num_threads.max(1);
        Self {
            num_threads,
            channel_cap: num_threads + 1,
        }
    }
}

/// Shared state cloned into each worker and the query task.
#[derive(Clone)]
pub struct PipelineContext {
    pub depth: usize,
    pub cancel: Arc<AtomicBool>,
    /// `(path, reason)` for every candidate whose histogram could not be computed.
    pub skipped_paths: Arc<Mutex<Vec<(PathBuf, String)>>>,
    /// Reason the query histogram failed, if it did.
    pub query_error: Arc<Mutex<Option<String>>>,
    pub progress: Option<ProgressBar>,
    pub processed: Arc<AtomicUsize>,
}

impl PipelineContext {
    pub fn new(depth: usize, cancel: Option<Arc<AtomicBool>>, progress: Option<ProgressBar>) -> Self {
        Self {
            depth,
            cancel: cancel.unwrap_or_default(),
            skipped_paths: Arc::new(Mutex::new(Vec::new())),
            query_error: Arc::new(Mutex::new(None)),
            progress,
            processed: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): drain `record_rx` until it closes, then join.
pub struct PipelineHandles {
    pub record_rx: Receiver<Record>,
    pub query_handle: JoinHandle<()>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub ctx: PipelineContext,
}

pub fn create_record_channel(tuning: &PipelineTuning) -> (Sender<Record>, Receiver<Record>) {
    bounded::<Record>(tuning.channel_cap)
}
