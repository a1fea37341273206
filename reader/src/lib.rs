//! # Byteseq Reader
//!
//! Reads a [ufotofu](https://docs.rs/ufotofu) [`BulkProducer`](ufotofu::BulkProducer) of bytes to
//! completion into a single contiguous buffer.
//!
//! A [`ByteReader`] performs exactly one read. The read can declare the total number of bytes the
//! source will produce, in which case the buffer is allocated once and any deviation from the
//! declared length is an error (unless explicitly tolerated). Reads can be cancelled in between two
//! chunks through a [`CancellationToken`], and report their [`Progress`] after every chunk.
//!
//! The [`source`] module adapts iterators of chunks and [`futures::Stream`]s of chunks into producers.
//!
//! ```
//! use byteseq_reader::{source::FromChunks, ByteReader, ReadOptions};
//!
//! let reader = ByteReader::new();
//! let bytes = smol::block_on(reader.read(
//!     FromChunks::new([&b"Hello, "[..], b"World!"]),
//!     ReadOptions::new().total_byte_length(13),
//! ))
//! .unwrap();
//!
//! assert_eq!(bytes, b"Hello, World!");
//! ```

pub mod buffer;
mod cancellation;
mod error;
mod options;
mod reader;
pub mod source;

pub use cancellation::CancellationToken;
pub use error::ReadError;
pub use options::{Progress, ReadOptions};
pub use reader::{ByteReader, ReadState};
