//! Single-threaded driver
//!
//! Every chunk is produced, executed and emitted on the calling thread. The
//! parallel driver must match its output exactly.

use crate::chunk::{ChunkSink, ChunkSource, ChunkTask};
use crate::error::Result;
use crate::options::Options;

/// Driver that processes chunks one at a time on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialDriver;

impl SequentialDriver {
    /// Pull, execute and emit chunks until the source is exhausted
    ///
    /// Stops at the first error, leaving the sink with the chunks emitted
    /// before it.
    pub fn run<S, K>(source: &mut S, options: &Options, sink: &mut K) -> Result<()>
    where
        S: ChunkSource,
        K: ChunkSink<<S::Task as ChunkTask>::Output>,
    {
        let mut chunks = 0u64;
        while source.has_next() {
            let output = source.next_chunk(options)?.execute()?;
            sink.consume(output)?;
            chunks += 1;
        }
        log::debug!("sequential driver emitted {chunks} chunks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Source yielding the numbers `0..count`, failing at `fail_at`
    struct Counter {
        next: u64,
        count: u64,
        fail_at: Option<u64>,
    }

    struct Number(u64, bool);

    impl ChunkTask for Number {
        type Output = u64;

        fn execute(self) -> Result<u64> {
            if self.1 {
                return Err(Error::InvalidArgument(format!("chunk {}", self.0)));
            }
            Ok(self.0)
        }
    }

    impl ChunkSource for Counter {
        type Task = Number;

        fn has_next(&mut self) -> bool {
            self.next < self.count
        }

        fn next_chunk(&mut self, _options: &Options) -> Result<Number> {
            let n = self.next;
            self.next += 1;
            Ok(Number(n, self.fail_at == Some(n)))
        }
    }

    #[test]
    fn test_emits_in_order() {
        let mut source = Counter {
            next: 0,
            count: 5,
            fail_at: None,
        };
        let mut sink = Vec::new();
        SequentialDriver::run(&mut source, &Options::sequential(), &mut sink).unwrap();
        assert_eq!(sink, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut source = Counter {
            next: 0,
            count: 5,
            fail_at: Some(2),
        };
        let mut sink = Vec::new();
        let err = SequentialDriver::run(&mut source, &Options::sequential(), &mut sink).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg == "chunk 2"));
        assert_eq!(source.next, 3);
    }
}
