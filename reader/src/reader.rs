use core::cell::Cell;

use either::Either::{Left, Right};
use tracing::{debug, trace, warn};
use ufotofu::BulkProducer;

use crate::buffer::{ByteBuffer, DEFAULT_CAPACITY};
use crate::{Progress, ReadError, ReadOptions};

/// The lifecycle of a [`ByteReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadState {
    /// No read has been started yet.
    Empty,
    /// A read is in progress.
    Loading,
    /// A read has finished, successfully or not. The reader cannot be used again.
    Done,
}

/// Reads a byte source to completion into a single contiguous buffer, exactly once.
///
/// If the total length is known up front, the buffer is allocated exactly once with that capacity and
/// the source must produce exactly that many bytes. Otherwise the buffer starts at a default
/// capacity and grows geometrically.
///
/// A reader is not `Sync`, and the future returned by [`read`](Self::read) is not `Send`: the future
/// borrows the reader's [`Cell`] state and owns the progress callback of [`ReadOptions`], which need
/// not be `Send` either. Run reads on a single-threaded executor such as `smol::block_on` or
/// `pollster::block_on`, or on a thread-local task set.
///
/// ```compile_fail
/// use byteseq_reader::{source::FromChunks, ByteReader, ReadOptions};
///
/// fn assert_send<T: Send>(_: T) {}
///
/// let reader = ByteReader::new();
/// assert_send(reader.read(FromChunks::new([&b"abc"[..]]), ReadOptions::new()));
/// ```
///
/// A reader performs a single read. Starting a second one, whether concurrently or after the
/// first has finished, fails with an [`ErrorKind::InvalidState`](byteseq_encoding::ErrorKind::InvalidState) error.
#[derive(Debug)]
pub struct ByteReader {
    state: Cell<ReadState>,
    default_capacity: usize,
}

impl Default for ByteReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteReader {
    pub fn new() -> Self {
        Self::with_default_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a reader whose buffer starts at `capacity` bytes when no total length is declared.
    pub fn with_default_capacity(capacity: usize) -> Self {
        ByteReader {
            state: Cell::new(ReadState::Empty),
            default_capacity: capacity,
        }
    }

    pub fn state(&self) -> ReadState {
        self.state.get()
    }

    /// Pulls every byte out of `source` and returns them as one buffer.
    ///
    /// The cancellation token of the options is checked before every chunk is pulled, and the
    /// progress callback is invoked after every chunk has been appended. The source is dropped
    /// before this returns, whatever the outcome.
    ///
    /// Once called, the reader is [`ReadState::Loading`] until the returned future completes or is
    /// dropped, and [`ReadState::Done`] afterwards.
    pub async fn read<P>(
        &self,
        mut source: P,
        mut options: ReadOptions<'_>,
    ) -> Result<Vec<u8>, ReadError<P::Error>>
    where
        P: BulkProducer<Item = u8>,
    {
        match self.state.get() {
            ReadState::Empty => {}
            ReadState::Loading => return Err(ReadError::AlreadyLoading),
            ReadState::Done => return Err(ReadError::AlreadyDone),
        }

        self.state.set(ReadState::Loading);
        let _finish = FinishOnDrop(&self.state);

        let result = self.accumulate(&mut source, &mut options).await;
        drop(source);

        result
    }

    async fn accumulate<P>(
        &self,
        source: &mut P,
        options: &mut ReadOptions<'_>,
    ) -> Result<Vec<u8>, ReadError<P::Error>>
    where
        P: BulkProducer<Item = u8>,
    {
        let total = options.total_byte_length;
        let accept_size_mismatch = options.accept_size_mismatch;

        let mut buffer = match total {
            Some(total) => usize::try_from(total)
                .ok()
                .filter(|capacity| *capacity <= isize::MAX as usize)
                .and_then(|capacity| ByteBuffer::try_with_capacity(capacity).ok())
                .ok_or(ReadError::TotalTooLarge(total))?,
            None => ByteBuffer::try_with_capacity(self.default_capacity).unwrap_or_else(|err| {
                warn!(capacity = self.default_capacity, %err, "starting with an empty buffer");
                ByteBuffer::default()
            }),
        };
        let capacity = buffer.capacity();
        debug!(?total, capacity, "starting read");

        loop {
            if options.is_cancelled() {
                let loaded = buffer.len() as u64;
                debug!(loaded, "read cancelled");
                return Err(ReadError::Aborted { loaded });
            }

            match source.expose_items().await.map_err(ReadError::Source)? {
                Left(chunk) => {
                    let len = chunk.len();
                    buffer.append(chunk);
                    source
                        .consider_produced(len)
                        .await
                        .map_err(ReadError::Source)?;

                    let loaded = buffer.len() as u64;
                    trace!(chunk = len, loaded, "appended chunk");

                    if let Some(total) = total {
                        if loaded > total && !accept_size_mismatch {
                            debug!(loaded, total, "source exceeded the declared length");
                            return Err(ReadError::TooLong { loaded, total });
                        }
                    }

                    options.report(Progress { loaded, total });
                }
                Right(_fin) => break,
            }
        }

        let loaded = buffer.len() as u64;

        if let Some(total) = total {
            if loaded != total {
                if accept_size_mismatch {
                    warn!(loaded, total, "accepting size mismatch");
                } else {
                    debug!(loaded, total, "source ended before the declared length");
                    return Err(ReadError::TooShort { loaded, total });
                }
            }
        }

        debug!(loaded, "finished read");
        Ok(buffer.into_vec())
    }
}

/// Moves a reader to [`ReadState::Done`] however its read ends, including by being dropped.
struct FinishOnDrop<'r>(&'r Cell<ReadState>);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(ReadState::Done);
    }
}
