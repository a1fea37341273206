use byteseq_encoding::ErrorKind;

/// Everything that can go wrong when reading a byte source to completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError<SourceError> {
    /// The source produced more bytes than the declared total.
    #[error("the source produced {loaded} bytes, more than the declared {total}")]
    TooLong { loaded: u64, total: u64 },
    /// The source finished before producing the declared total.
    #[error("the source finished after {loaded} bytes, fewer than the declared {total}")]
    TooShort { loaded: u64, total: u64 },
    /// Another read on the same reader is still in progress.
    #[error("a read is already in progress on this reader")]
    AlreadyLoading,
    /// The reader has already completed a read, successfully or not.
    #[error("this reader has already finished reading")]
    AlreadyDone,
    /// The read was cancelled, before any bytes were pulled or in between two chunks.
    #[error("the read was cancelled after {loaded} bytes")]
    Aborted { loaded: u64 },
    /// The declared total cannot be buffered in memory on this platform.
    #[error("a declared total of {0} bytes exceeds the addressable memory")]
    TotalTooLarge(u64),
    /// The source itself reported an error.
    #[error("the byte source failed")]
    Source(#[source] SourceError),
}

impl<SourceError> ReadError<SourceError> {
    /// The category of the failure, or `None` if the source failed.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ReadError::TooLong { .. } | ReadError::TooShort { .. } => Some(ErrorKind::Data),
            ReadError::AlreadyLoading | ReadError::AlreadyDone => Some(ErrorKind::InvalidState),
            ReadError::Aborted { .. } => Some(ErrorKind::Abort),
            ReadError::TotalTooLarge(_) => Some(ErrorKind::Range),
            ReadError::Source(_) => None,
        }
    }
}
