//! Order-preserving parallel driver
//!
//! The calling thread advances the source, tags each task with a sequence
//! number and spawns it on a rayon pool built for this call alone. Results
//! come back over a channel in completion order and wait in a reorder
//! buffer until every earlier sequence number has been emitted, so the sink
//! sees exactly what the sequential driver would produce.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Mutex};

use hashbrown::HashMap;

use super::SequentialDriver;
use crate::chunk::{ChunkSink, ChunkSource, ChunkTask};
use crate::error::{Error, Result};
use crate::options::Options;

/// Chunks allowed in flight per worker before the producer waits
pub const IN_FLIGHT_PER_WORKER: usize = 2;

/// First-error capture shared by the producer, workers and reassembly
struct Cancellation {
    abort_flag: AtomicBool,
    error_capture: Mutex<Option<Error>>,
}

impl Cancellation {
    fn new() -> Self {
        Self {
            abort_flag: AtomicBool::new(false),
            error_capture: Mutex::new(None),
        }
    }

    fn signal_error(&self, err: Error) {
        let mut guard = self.error_capture.lock().unwrap_or_else(|p| p.into_inner());
        if guard.is_none() {
            log::debug!("aborting parallel run: {err}");
            *guard = Some(err);
            self.abort_flag.store(true, Ordering::SeqCst);
        }
    }

    fn should_abort(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    fn into_result(self) -> Result<()> {
        match self.error_capture.into_inner().unwrap_or_else(|p| p.into_inner()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Driver that executes chunks on a fixed-size per-call worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelDriver {
    worker_count: usize,
}

impl ParallelDriver {
    /// Create a driver for `worker_count` workers
    ///
    /// A count of 0 is treated as 1.
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Upper bound on produced but not yet emitted chunks
    pub fn max_in_flight(&self) -> usize {
        IN_FLIGHT_PER_WORKER.saturating_mul(self.worker_count)
    }

    /// Pull chunks from `source`, execute them on the pool and emit them to
    /// `sink` in production order
    ///
    /// Falls back to [`SequentialDriver`] when `options` disallow
    /// parallelism or this driver has a single worker. On failure the first
    /// error raised by the source, a task or the sink is returned and
    /// nothing after it reaches the sink.
    pub fn run<S, K>(&self, source: &mut S, options: &Options, sink: &mut K) -> Result<()>
    where
        S: ChunkSource,
        K: ChunkSink<<S::Task as ChunkTask>::Output>,
    {
        if !options.parallel_allowed || self.worker_count == 1 {
            return SequentialDriver::run(source, options, sink);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|index| format!("mtx-worker-{index}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        log::debug!(
            "parallel driver started with {} workers, {} chunks in flight",
            self.worker_count,
            self.max_in_flight()
        );

        let max_in_flight = self.max_in_flight() as u64;
        let cancellation = Cancellation::new();
        let (sender, receiver) = mpsc::channel();

        pool.in_place_scope(|scope| {
            let cancellation = &cancellation;
            let mut reorder: HashMap<u64, <S::Task as ChunkTask>::Output> = HashMap::new();
            let mut submitted = 0u64;
            let mut received = 0u64;
            let mut next_emit = 0u64;

            loop {
                while !cancellation.should_abort() && submitted - next_emit < max_in_flight && source.has_next() {
                    let task = match source.next_chunk(options) {
                        Ok(task) => task,
                        Err(err) => {
                            cancellation.signal_error(err);
                            break;
                        }
                    };

                    let sequence = submitted;
                    let sender = sender.clone();
                    scope.spawn(move |_| {
                        let output = if cancellation.should_abort() {
                            None
                        } else {
                            match task.execute() {
                                Ok(output) => Some(output),
                                Err(err) => {
                                    cancellation.signal_error(err);
                                    None
                                }
                            }
                        };
                        // the receiver outlives the scope
                        let _ = sender.send((sequence, output));
                    });
                    submitted += 1;
                }

                // everything submitted has come back: source exhausted or run aborted
                if received == submitted {
                    break;
                }

                let Ok((sequence, output)) = receiver.recv() else {
                    break;
                };
                received += 1;
                log::trace!("chunk {sequence} completed ({received}/{submitted})");

                if cancellation.should_abort() {
                    reorder.clear();
                    continue;
                }
                if let Some(output) = output {
                    reorder.insert(sequence, output);
                }
                while let Some(output) = reorder.remove(&next_emit) {
                    next_emit += 1;
                    if let Err(err) = sink.consume(output) {
                        cancellation.signal_error(err);
                        reorder.clear();
                        break;
                    }
                }
            }
        });

        cancellation.into_result()
    }
}
