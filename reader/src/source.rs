//! Adapters that turn common chunk sources into [`BulkProducer`]s of bytes.
//!
//! Both adapters expose one chunk at a time through [`BulkProducer::expose_items`], skipping empty
//! chunks, and finish with `()` once the underlying source is exhausted.

use core::convert::Infallible;
use core::iter::Fuse;

use either::Either::{self, Left, Right};
use futures::{Stream, StreamExt};
use ufotofu::{BufferedProducer, BulkProducer, Producer};

/// Produces the bytes of a sequence of in-memory chunks.
///
/// ```
/// use byteseq_reader::{source::FromChunks, ByteReader, ReadOptions};
///
/// let reader = ByteReader::new();
/// let bytes = smol::block_on(reader.read(
///     FromChunks::new([&b"he"[..], b"", b"llo"]),
///     ReadOptions::new(),
/// ))
/// .unwrap();
/// assert_eq!(bytes, b"hello");
/// ```
#[derive(Debug)]
pub struct FromChunks<I: Iterator> {
    chunks: Fuse<I>,
    current: Option<I::Item>,
    offset: usize,
}

impl<I> FromChunks<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    pub fn new<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        FromChunks {
            chunks: chunks.into_iter().fuse(),
            current: None,
            offset: 0,
        }
    }

    /// The unproduced rest of the current chunk, moving on to the next non-empty chunk if needed.
    fn remaining(&mut self) -> Option<&[u8]> {
        while self
            .current
            .as_ref()
            .map_or(true, |chunk| self.offset >= chunk.as_ref().len())
        {
            self.current = Some(self.chunks.next()?);
            self.offset = 0;
        }

        self.current
            .as_ref()
            .map(|chunk| &chunk.as_ref()[self.offset..])
    }
}

impl<I> Producer for FromChunks<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Item = u8;
    type Final = ();
    type Error = Infallible;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        match self.remaining() {
            Some(rest) => {
                let byte = rest[0];
                self.offset += 1;
                Ok(Left(byte))
            }
            None => Ok(Right(())),
        }
    }
}

impl<I> BufferedProducer for FromChunks<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    async fn slurp(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<I> BulkProducer for FromChunks<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    async fn expose_items<'a>(
        &'a mut self,
    ) -> Result<Either<&'a [Self::Item], Self::Final>, Self::Error>
    where
        Self::Item: 'a,
    {
        match self.remaining() {
            Some(rest) => Ok(Left(rest)),
            None => Ok(Right(())),
        }
    }

    async fn consider_produced(&mut self, amount: usize) -> Result<(), Self::Error> {
        self.offset += amount;
        Ok(())
    }
}

/// Produces the bytes of a [`Stream`] of fallible chunks.
///
/// The first error the stream yields becomes the error of the producer. The stream is not polled
/// again after it has ended.
#[derive(Debug)]
pub struct FromStream<S, C> {
    stream: S,
    current: Option<C>,
    offset: usize,
    ended: bool,
}

impl<S, C, E> FromStream<S, C>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
{
    pub fn new(stream: S) -> Self {
        FromStream {
            stream,
            current: None,
            offset: 0,
            ended: false,
        }
    }

    async fn remaining(&mut self) -> Result<Option<&[u8]>, E> {
        while self
            .current
            .as_ref()
            .map_or(true, |chunk| self.offset >= chunk.as_ref().len())
        {
            if self.ended {
                return Ok(None);
            }

            match self.stream.next().await {
                Some(Ok(chunk)) => {
                    self.current = Some(chunk);
                    self.offset = 0;
                }
                Some(Err(err)) => return Err(err),
                None => {
                    self.ended = true;
                    self.current = None;
                }
            }
        }

        Ok(self
            .current
            .as_ref()
            .map(|chunk| &chunk.as_ref()[self.offset..]))
    }
}

impl<S, C, E> Producer for FromStream<S, C>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
{
    type Item = u8;
    type Final = ();
    type Error = E;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        match self.remaining().await? {
            Some(rest) => {
                let byte = rest[0];
                self.offset += 1;
                Ok(Left(byte))
            }
            None => Ok(Right(())),
        }
    }
}

impl<S, C, E> BufferedProducer for FromStream<S, C>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
{
    async fn slurp(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S, C, E> BulkProducer for FromStream<S, C>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
{
    async fn expose_items<'a>(
        &'a mut self,
    ) -> Result<Either<&'a [Self::Item], Self::Final>, Self::Error>
    where
        Self::Item: 'a,
    {
        match self.remaining().await? {
            Some(rest) => Ok(Left(rest)),
            None => Ok(Right(())),
        }
    }

    async fn consider_produced(&mut self, amount: usize) -> Result<(), Self::Error> {
        self.offset += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_skip_empty_and_finish() {
        smol::block_on(async {
            let mut producer = FromChunks::new(vec![vec![], vec![1u8, 2], vec![], vec![3]]);

            assert_eq!(producer.expose_items().await.unwrap(), Left(&[1, 2][..]));
            producer.consider_produced(1).await.unwrap();
            assert_eq!(producer.produce().await.unwrap(), Left(2));
            assert_eq!(producer.expose_items().await.unwrap(), Left(&[3][..]));
            producer.consider_produced(1).await.unwrap();
            assert_eq!(producer.produce().await.unwrap(), Right(()));
            assert_eq!(producer.expose_items().await.unwrap(), Right(()));
        });
    }

    #[test]
    fn stream_forwards_errors() {
        smol::block_on(async {
            let chunks: Vec<Result<&[u8], &str>> = vec![Ok(&b"ab"[..]), Err("boom"), Ok(&b"c"[..])];
            let mut producer = FromStream::new(futures::stream::iter(chunks));

            assert_eq!(producer.produce().await, Ok(Left(b'a')));
            assert_eq!(producer.produce().await, Ok(Left(b'b')));
            assert_eq!(producer.produce().await, Err("boom"));
        });
    }

    #[test]
    fn stream_stays_finished() {
        smol::block_on(async {
            let chunks: Vec<Result<Vec<u8>, Infallible>> = vec![Ok(vec![9])];
            let mut producer = FromStream::new(futures::stream::iter(chunks));

            assert_eq!(producer.expose_items().await.unwrap(), Left(&[9][..]));
            producer.consider_produced(1).await.unwrap();
            assert_eq!(producer.expose_items().await.unwrap(), Right(()));
            assert_eq!(producer.produce().await.unwrap(), Right(()));
        });
    }
}
