//! Chunk production and consumption interfaces
//!
//! A [`ChunkSource`] is a single-threaded cursor that carves its input into
//! contiguous chunks. Each chunk comes back as a [`ChunkTask`]: a deferred
//! computation that touches only its own chunk, so the driver may run it on
//! any thread. A [`ChunkSink`] receives task outputs strictly in the order
//! the cursor produced them.

use crate::error::Result;
use crate::options::Options;

/// Deferred formatting or parsing of one chunk
pub trait ChunkTask: Send {
    /// Result of processing the chunk
    type Output: Send;

    /// Run the chunk's work
    fn execute(self) -> Result<Self::Output>;
}

/// Cursor that produces chunks in input order
pub trait ChunkSource {
    /// Task type for one chunk
    type Task: ChunkTask;

    /// True while input remains
    fn has_next(&mut self) -> bool;

    /// Advance the cursor past one chunk and return its deferred work
    fn next_chunk(&mut self, options: &Options) -> Result<Self::Task>;
}

/// Receiver of chunk outputs, fed in input order
pub trait ChunkSink<T> {
    /// Accept the output of the next chunk
    fn consume(&mut self, output: T) -> Result<()>;
}

/// Sink that writes formatted chunks to a byte stream
pub struct WriteSink<W: std::io::Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: std::io::Write> WriteSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Total bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> ChunkSink<String> for WriteSink<W> {
    fn consume(&mut self, output: String) -> Result<()> {
        self.writer.write_all(output.as_bytes())?;
        self.bytes_written += output.len() as u64;
        Ok(())
    }
}

impl<T> ChunkSink<T> for Vec<T> {
    fn consume(&mut self, output: T) -> Result<()> {
        self.push(output);
        Ok(())
    }
}
