use core::fmt;

use crate::CancellationToken;

/// A progress notification, emitted after every chunk a reader appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// The number of bytes read so far.
    pub loaded: u64,
    /// The declared total length, if any.
    pub total: Option<u64>,
}

impl Progress {
    /// Whether a total was declared, so that `loaded` can be related to it.
    pub fn length_computable(&self) -> bool {
        self.total.is_some()
    }
}

/// Configuration of a single read.
///
/// ```
/// use byteseq_reader::{CancellationToken, ReadOptions};
///
/// let token = CancellationToken::new();
/// let options = ReadOptions::new()
///     .total_byte_length(1024)
///     .cancellation(token.clone())
///     .on_progress(|progress| println!("{} bytes", progress.loaded));
/// ```
#[derive(Default)]
pub struct ReadOptions<'a> {
    pub(crate) total_byte_length: Option<u64>,
    pub(crate) accept_size_mismatch: bool,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) on_progress: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a> ReadOptions<'a> {
    /// Options with no declared length, strict length checking, no cancellation, and no progress callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the exact number of bytes the source will produce.
    ///
    /// The buffer is allocated with exactly this capacity up front, and the read fails if the source
    /// produces a different number of bytes (unless [`accept_size_mismatch`](Self::accept_size_mismatch) is set).
    pub fn total_byte_length(mut self, total: u64) -> Self {
        self.total_byte_length = Some(total);
        self
    }

    /// Tolerates sources whose length differs from the declared total.
    pub fn accept_size_mismatch(mut self, accept: bool) -> Self {
        self.accept_size_mismatch = accept;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Registers a callback that is invoked after every appended chunk.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn report(&mut self, progress: Progress) {
        if let Some(callback) = self.on_progress.as_mut() {
            callback(progress);
        }
    }
}

impl fmt::Debug for ReadOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("total_byte_length", &self.total_byte_length)
            .field("accept_size_mismatch", &self.accept_size_mismatch)
            .field("cancellation", &self.cancellation)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
