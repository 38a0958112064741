//! Drivers that pull chunks from a source and feed a sink in order

pub mod parallel;
pub mod sequential;

pub use parallel::ParallelDriver;
pub use sequential::SequentialDriver;

use crate::chunk::{ChunkSink, ChunkSource, ChunkTask};
use crate::error::Result;
use crate::options::Options;

/// Run a source to completion with the driver `options` call for
///
/// Options are normalized first. The parallel driver is used unless
/// parallelism is disallowed or a single worker is requested.
pub fn drive<S, K>(source: &mut S, options: &Options, sink: &mut K) -> Result<()>
where
    S: ChunkSource,
    K: ChunkSink<<S::Task as ChunkTask>::Output>,
{
    let options = options.normalized();
    if options.runs_sequentially() {
        log::debug!("driving chunks sequentially");
        SequentialDriver::run(source, &options, sink)
    } else {
        ParallelDriver::new(options.worker_count).run(source, &options, sink)
    }
}
