use anyhow::{Context, Result, anyhow};
use crossbeam_channel::Receiver;
use log::debug;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::engine::intersection::intersection_distance;
use crate::engine::progress::{ProgressBar, create_progress_bar, finish_progress};
use crate::engine::ranking::TopK;
use crate::engine::tools::{partition_batches, resolve_worker_count};
use crate::pipeline;
use crate::utils::config::WorkerThreadLimits;
use crate::{Histogram, Opts, Record, SearchOutcome};

/// Start the query task and the worker pool. Returns the receiver and handles; caller drains
/// `record_rx` and must join the handles when done.
pub fn run_pipeline(
    query: &Path,
    candidates: &[PathBuf],
    opts: &Opts,
    progress: Option<ProgressBar>,
) -> pipeline::PipelineHandles {
    let num_threads = resolve_worker_count(opts.num_threads, WorkerThreadLimits::current());
    let tuning = pipeline::PipelineTuning::new(num_threads);
    let batches = partition_batches(candidates, tuning.num_threads);
    debug!(
        "{} candidates, {} workers, batch size {}, channel cap {}",
        candidates.len(),
        batches.len(),
        batches.first().map_or(0, Vec::len),
        tuning.channel_cap
    );

    let ctx = pipeline::PipelineContext::new(opts.depth, opts.cancel.clone(), progress);
    let (record_tx, record_rx) = pipeline::create_record_channel(&tuning);

    let query_handle = pipeline::spawn_query_task(query, &record_tx, &ctx);
    let worker_handles = pipeline::spawn_histogram_workers(batches, &record_tx, &ctx);

    // Dropping the last sender closes the channel once every producer has returned.
    drop(record_tx);

    pipeline::PipelineHandles {
        record_rx,
        query_handle,
        worker_handles,
        ctx,
    }
}

/// Join the query task and workers (after the stream is drained).
pub fn shutdown_pipeline_handles(
    query_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<()> {
    query_handle
        .join()
        .map_err(|_| anyhow!("query task panicked"))?;
    for h in worker_handles {
        h.join().map_err(|_| anyhow!("histogram worker panicked"))?;
    }
    Ok(())
}

fn rank_candidate(query: &Histogram, candidate: Histogram, top: &mut TopK) -> Result<()> {
    let distance = intersection_distance(&query.bins, &candidate.bins)
        .with_context(|| format!("compare {}", candidate.name.display()))?;
    debug!("{}: distance {}", candidate.name.display(), distance);
    top.offer(candidate, distance);
    Ok(())
}

/// Collector: drain `record_rx` until it closes, ranking candidates against the query.
/// Candidates that arrive before the query are buffered and replayed in arrival order.
/// Returns the query histogram (if it arrived) and the final top-K.
pub fn collect_ranked(record_rx: Receiver<Record>, top_k: usize) -> Result<(Option<Histogram>, TopK)> {
    let mut query: Option<Histogram> = None;
    let mut pending: Vec<Histogram> = Vec::new();
    let mut top = TopK::new(top_k);
    let mut received = 0_usize;

    while let Ok(record) = record_rx.recv() {
        received += 1;
        match record {
            Record::Query(q) => {
                for candidate in pending.drain(..) {
                    rank_candidate(&q, candidate, &mut top)?;
                }
                query = Some(q);
            }
            Record::Candidate(candidate) => match &query {
                Some(q) => rank_candidate(q, candidate, &mut top)?,
                None => pending.push(candidate),
            },
        }
    }
    debug!("collector: channel closed after {} records", received);
    Ok((query, top))
}

/// Main orchestrator: enumerate candidates in `dataset_dir`, run the pipeline, and rank against `query`.
pub fn search(query: &Path, dataset_dir: &Path, opts: &Opts) -> Result<SearchOutcome> {
    let candidates = pipeline::enumerate_candidates(dataset_dir)?;
    let total = candidates.len() + 1;
    let progress = opts
        .verbose
        .then(|| create_progress_bar(total, "Histograms"));

    let pipeline::PipelineHandles {
        record_rx,
        query_handle,
        worker_handles,
        ctx,
    } = run_pipeline(query, &candidates, opts, progress.clone());

    let collected = collect_ranked(record_rx, opts.top_k);
    shutdown_pipeline_handles(query_handle, worker_handles)?;
    finish_progress(progress.as_ref(), total);
    let (query_hist, top) = collected?;

    let skipped = pipeline::check_for_cancel_or_skipped_paths(&ctx)?;
    let query_hist = match query_hist {
        Some(q) => q,
        None => {
            let reason = ctx
                .query_error
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| "no histogram produced".to_string());
            return Err(anyhow!(
                "query image {}: {}",
                query.display(),
                reason
            ));
        }
    };

    Ok(SearchOutcome {
        query: query_hist,
        matches: top.into_vec(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn hist(name: &str, bins: Vec<u64>) -> Histogram {
        Histogram {
            name: PathBuf::from(name),
            bins,
        }
    }

    #[test]
    fn buffers_candidates_until_query_arrives() {
        let (tx, rx) = unbounded();
        tx.send(Record::Candidate(hist("far", vec![0, 0, 4]))).unwrap();
        tx.send(Record::Candidate(hist("near", vec![4, 0, 0]))).unwrap();
        tx.send(Record::Query(hist("q", vec![4, 0, 0]))).unwrap();
        tx.send(Record::Candidate(hist("mid", vec![2, 2, 0]))).unwrap();
        drop(tx);

        let (query, top) = collect_ranked(rx, 5).unwrap();
        assert_eq!(query.unwrap().name, PathBuf::from("q"));
        let got: Vec<_> = top
            .as_slice()
            .iter()
            .map(|m| (m.histogram.name.display().to_string(), m.distance))
            .collect();
        assert_eq!(
            got,
            vec![
                ("far".to_string(), 0),
                ("near".to_string(), 4),
                ("mid".to_string(), 2)
            ]
        );
    }

    #[test]
    fn missing_query_yields_none() {
        let (tx, rx) = unbounded();
        tx.send(Record::Candidate(hist("a", vec![1]))).unwrap();
        drop(tx);
        let (query, top) = collect_ranked(rx, 5).unwrap();
        assert!(query.is_none());
        assert!(top.is_empty());
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let (tx, rx) = unbounded();
        tx.send(Record::Query(hist("q", vec![1, 2]))).unwrap();
        tx.send(Record::Candidate(hist("a", vec![1, 2, 3]))).unwrap();
        drop(tx);
        assert!(collect_ranked(rx, 5).is_err());
    }
}
