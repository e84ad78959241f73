//! Pipeline components: context, candidate enumeration, worker pool, collector.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;
pub mod workers;

pub use context::{PipelineContext, PipelineHandles, PipelineTuning, create_record_channel};
pub use error_handler::check_for_cancel_or_skipped_paths;
pub use orchestrator::{collect_ranked, run_pipeline, search, shutdown_pipeline_handles};
pub use walk::enumerate_candidates;
pub use workers::{spawn_histogram_workers, spawn_query_task};
