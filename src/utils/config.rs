//! Application configuration constants.
//! Search defaults and decode thresholds in one place.

use std::sync::OnceLock;

// ---- Package name (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    usage: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                usage: format!("Usage: {pkg} <query_image_path> <dataset_directory>"),
            }
        })
    }

    /// One-line usage printed on argument errors.
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

// ---- Search ----

/// Defaults for the search itself. The CLI flags fall back to these.
pub struct SearchDefaults;

impl SearchDefaults {
    /// Maximum bin index; bin count is `DEPTH + 1`.
    pub const DEPTH: usize = 255;
    /// Number of matches reported.
    pub const TOP_K: usize = 5;
    /// Candidate extension filter (case sensitive).
    pub const EXTENSION: &'static str = ".jpg";
    /// Right shift from a 16-bit channel sample to an 8-bit bin index.
    pub const QUANTIZE_SHIFT: u32 = 8;
}

// ---- Worker threads ----

/// Worker pool sizing.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Worker count when none is requested.
    pub default: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            default: Self::DEFAULT_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const DEFAULT_THREADS: usize = 5;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Progress ----

pub struct ProgressConsts;

impl ProgressConsts {
    /// Files processed per progress bar update from a worker (reduce lock contention).
    pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 8;
}

// ---- Decoding ----

/// Decode I/O thresholds and buffer sizes.
pub struct DecodeConsts;

impl DecodeConsts {
    /// File size above which decoding reads from a memory map (bytes). 50 MB.
    pub const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024;
    /// Buffered reader capacity for files below the mmap threshold (bytes). 256 KB.
    pub const READ_BUFFER_SIZE: usize = 256 * 1024;
}
