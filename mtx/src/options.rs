//! Options shared by the read and write paths
//!
//! One immutable value configures a whole read or write call: whether
//! parallelism is allowed, how many workers to use, how large chunks are and
//! whether symmetric files are expanded on read.

use mtx_core::format::constants::{DEFAULT_CHUNK_SIZE_BYTES, MAX_CHUNK_SIZE_BYTES};

/// Workers allowed per hardware thread after normalization
pub const MAX_WORKERS_PER_CORE: usize = 4;

/// Configuration for chunked body reading and writing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Allow chunks to be processed on worker threads
    pub parallel_allowed: bool,
    /// Number of worker threads for the parallel driver
    pub worker_count: usize,
    /// Target chunk size in bytes
    ///
    /// Exact on the read path (rounded up to the end of a line); converted
    /// to an entry count on the write path.
    pub chunk_size_bytes: usize,
    /// Expand symmetric, skew-symmetric and hermitian files into general
    /// form on read
    pub generalize_symmetry: bool,
}

impl Options {
    /// Options that always run on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel_allowed: false,
            worker_count: 1,
            ..Self::default()
        }
    }

    /// Allow or forbid parallel processing
    pub fn with_parallel(mut self, parallel_allowed: bool) -> Self {
        self.parallel_allowed = parallel_allowed;
        self
    }

    /// Set worker count
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set chunk size in bytes
    pub fn with_chunk_size_bytes(mut self, chunk_size_bytes: usize) -> Self {
        self.chunk_size_bytes = chunk_size_bytes;
        self
    }

    /// Enable or disable symmetry generalization on read
    pub fn with_generalize_symmetry(mut self, generalize_symmetry: bool) -> Self {
        self.generalize_symmetry = generalize_symmetry;
        self
    }

    /// Replace out-of-range knobs with safe values
    ///
    /// A worker count of 0 becomes the host concurrency and a chunk size of
    /// 0 becomes 1 byte (one line per chunk on read, one entry on write).
    /// Worker counts above [`max_worker_count`] and chunk sizes above
    /// [`MAX_CHUNK_SIZE_BYTES`] are clamped.
    pub fn normalized(&self) -> Self {
        let mut options = self.clone();
        let max_workers = max_worker_count();
        if options.worker_count == 0 {
            log::warn!("worker_count 0 replaced by host concurrency");
            options.worker_count = host_concurrency();
        } else if options.worker_count > max_workers {
            log::warn!("worker_count {} clamped to {max_workers}", options.worker_count);
            options.worker_count = max_workers;
        }
        if options.chunk_size_bytes == 0 {
            log::warn!("chunk_size_bytes 0 replaced by 1");
            options.chunk_size_bytes = 1;
        } else if options.chunk_size_bytes > MAX_CHUNK_SIZE_BYTES {
            log::warn!(
                "chunk_size_bytes {} clamped to {MAX_CHUNK_SIZE_BYTES}",
                options.chunk_size_bytes
            );
            options.chunk_size_bytes = MAX_CHUNK_SIZE_BYTES;
        }
        options
    }

    /// Whether the parallel driver should fall back to the sequential one
    pub fn runs_sequentially(&self) -> bool {
        !self.parallel_allowed || self.worker_count <= 1
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parallel_allowed: true,
            worker_count: host_concurrency(),
            chunk_size_bytes: DEFAULT_CHUNK_SIZE_BYTES,
            generalize_symmetry: true,
        }
    }
}

/// Number of threads the host can run in parallel, at least 1
pub fn host_concurrency() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Largest worker count kept by [`Options::normalized`]
pub fn max_worker_count() -> usize {
    host_concurrency().saturating_mul(MAX_WORKERS_PER_CORE)
}
