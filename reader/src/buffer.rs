use std::collections::TryReserveError;

use tracing::trace;

/// Capacity of the buffer of a read whose total length is unknown.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Chunk size assumed when sizing a growing buffer, so that tiny chunks do not cause tiny growth steps.
pub const DEFAULT_CHUNK: usize = 64 * 1024;

/// Factor by which the space for upcoming chunks is overallocated when the buffer grows.
pub const GROWTH_FACTOR: usize = 2;

/// A contiguous, growable byte buffer that accumulates chunks.
///
/// The buffer grows only when an incoming chunk does not fit. It then makes room for at least
/// `GROWTH_FACTOR` times the larger of the chunk and [`DEFAULT_CHUNK`] beyond the current contents,
/// and at least doubles its capacity, so the number of reallocations is logarithmic in the total
/// length and every byte is copied a constant number of times on average.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        ByteBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Like [`with_capacity`](Self::with_capacity), but reports an allocation failure instead of
    /// aborting the process.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity)?;
        Ok(ByteBuffer { bytes })
    }

    /// The number of bytes appended so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `chunk` to the end of the buffer, growing it first if necessary.
    pub fn append(&mut self, chunk: &[u8]) {
        if self.bytes.len().saturating_add(chunk.len()) > self.bytes.capacity() {
            self.grow(chunk.len());
        }

        self.bytes.extend_from_slice(chunk);
    }

    /// Hands out the accumulated bytes without copying them.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    fn grow(&mut self, incoming: usize) {
        let headroom = incoming.max(DEFAULT_CHUNK).saturating_mul(GROWTH_FACTOR);
        let old_capacity = self.bytes.capacity();
        self.bytes.reserve(headroom);

        trace!(
            old_capacity,
            new_capacity = self.bytes.capacity(),
            len = self.bytes.len(),
            "grew byte buffer"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_within_capacity_without_growing() {
        let mut buffer = ByteBuffer::with_capacity(8);
        buffer.append(&[1, 2, 3]);
        buffer.append(&[4, 5, 6, 7, 8]);

        assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buffer.capacity(), 8);
    }

    #[test]
    fn growth_leaves_room_for_default_chunks() {
        let mut buffer = ByteBuffer::with_capacity(4);
        buffer.append(&[0; 3]);
        buffer.append(&[1; 3]);

        assert_eq!(buffer.len(), 6);
        assert!(buffer.capacity() >= 3 + DEFAULT_CHUNK * GROWTH_FACTOR);
    }

    #[test]
    fn growth_scales_with_large_chunks() {
        let mut buffer = ByteBuffer::with_capacity(0);
        let chunk = vec![7; DEFAULT_CHUNK * 3];
        buffer.append(&chunk);

        assert!(buffer.capacity() >= chunk.len() * GROWTH_FACTOR);
        assert_eq!(buffer.as_slice(), &chunk[..]);
    }

    #[test]
    fn reallocations_stay_logarithmic() {
        let chunk = vec![3; DEFAULT_CHUNK];
        let mut buffer = ByteBuffer::with_capacity(16);
        let mut reallocations = 0;

        for _ in 0..256 {
            let before = buffer.capacity();
            buffer.append(&chunk);
            if buffer.capacity() != before {
                reallocations += 1;
            }
        }

        assert_eq!(buffer.len(), 256 * DEFAULT_CHUNK);
        assert!(reallocations <= 12, "{reallocations} reallocations");
    }

    #[test]
    fn try_with_capacity_reserves_exactly() {
        let buffer = ByteBuffer::try_with_capacity(100).unwrap();
        assert_eq!(buffer.capacity(), 100);
        assert!(buffer.is_empty());
    }

    #[test]
    fn try_with_capacity_reports_exhaustion() {
        assert!(ByteBuffer::try_with_capacity(isize::MAX as usize).is_err());
    }

    #[test]
    fn into_vec_keeps_the_allocation() {
        let mut buffer = ByteBuffer::with_capacity(16);
        buffer.append(b"hello");
        let pointer = buffer.as_slice().as_ptr();

        let bytes = buffer.into_vec();
        assert_eq!(bytes, b"hello");
        assert_eq!(bytes.as_ptr(), pointer);
    }

    #[test]
    fn empty_appends_are_harmless() {
        let mut buffer = ByteBuffer::default();
        buffer.append(&[]);

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }
}
