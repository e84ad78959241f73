use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use super::context::PipelineContext;

/// Call after joining all producers: error if cancelled, otherwise log and return the skipped files.
pub fn check_for_cancel_or_skipped_paths(ctx: &PipelineContext) -> Result<Vec<(PathBuf, String)>> {
    if ctx.cancel.load(Ordering::Relaxed) {
        return Err(anyhow::anyhow!("Search cancelled by user"));
    }
    Ok(take_skipped(&ctx.skipped_paths))
}

fn take_skipped(skipped_paths: &Arc<Mutex<Vec<(PathBuf, String)>>>) -> Vec<(PathBuf, String)> {
    let mut skipped = std::mem::take(&mut *skipped_paths.lock().unwrap());
    if !skipped.is_empty() {
        log::debug!("Skipped {} image(s) that could not be decoded", skipped.len());
        for (p, reason) in &skipped {
            log::debug!("  skipped: {} ({})", p.display(), reason);
        }
    }
    skipped.sort();
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logger::capture;
    use log::Level;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn skipped_files_are_returned_without_extra_warning() {
        capture::install();
        let ctx = PipelineContext::new(255, None, None);
        ctx.skipped_paths.lock().unwrap().extend([
            (PathBuf::from("/data/b.jpg"), "truncated".to_string()),
            (PathBuf::from("/data/a.jpg"), "empty".to_string()),
        ]);

        let skipped = check_for_cancel_or_skipped_paths(&ctx).unwrap();
        assert_eq!(skipped[0].0, PathBuf::from("/data/a.jpg"));
        assert_eq!(skipped.len(), 2);

        let warnings: Vec<_> = capture::records_for("pipeline::error_handler")
            .into_iter()
            .filter(|(level, _)| *level <= Level::Warn)
            .collect();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn cancelled_run_is_error() {
        let ctx = PipelineContext::new(255, Some(Arc::new(AtomicBool::new(true))), None);
        assert!(check_for_cancel_or_skipped_paths(&ctx).is_err());
    }
}
