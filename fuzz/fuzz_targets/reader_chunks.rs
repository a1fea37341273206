#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use byteseq_reader::source::FromChunks;
use byteseq_reader::{ByteReader, CancellationToken, ReadError, ReadOptions, ReadState};

#[derive(Debug, Arbitrary)]
struct ReadCase {
    chunks: Vec<Vec<u8>>,
    declared: Option<u16>,
    accept_size_mismatch: bool,
    cancel_after_chunks: Option<u8>,
}

/// Computes the outcome of a read by walking the chunks the way a reader must.
fn expected(case: &ReadCase) -> Result<Vec<u8>, ReadError<core::convert::Infallible>> {
    let total = case.declared.map(u64::from);
    let cancel_after = case.cancel_after_chunks.map(usize::from);

    if cancel_after == Some(0) {
        return Err(ReadError::Aborted { loaded: 0 });
    }

    let mut bytes = Vec::new();
    let mut events = 0;

    for chunk in case.chunks.iter().filter(|chunk| !chunk.is_empty()) {
        bytes.extend_from_slice(chunk);
        let loaded = bytes.len() as u64;

        if let Some(total) = total {
            if loaded > total && !case.accept_size_mismatch {
                return Err(ReadError::TooLong { loaded, total });
            }
        }

        events += 1;
        if cancel_after == Some(events) {
            return Err(ReadError::Aborted { loaded });
        }
    }

    let loaded = bytes.len() as u64;
    if let Some(total) = total {
        if loaded < total && !case.accept_size_mismatch {
            return Err(ReadError::TooShort { loaded, total });
        }
    }

    Ok(bytes)
}

fuzz_target!(|case: ReadCase| {
    pollster::block_on(async {
        let token = CancellationToken::new();
        let cancel_after = case.cancel_after_chunks.map(usize::from);
        if cancel_after == Some(0) {
            token.cancel();
        }

        let mut options = ReadOptions::new()
            .accept_size_mismatch(case.accept_size_mismatch)
            .cancellation(token.clone());
        if let Some(total) = case.declared {
            options = options.total_byte_length(u64::from(total));
        }

        let mut events = 0;
        let options = options.on_progress(|_| {
            events += 1;
            if cancel_after == Some(events) {
                token.cancel();
            }
        });

        let reader = ByteReader::new();
        let result = reader.read(FromChunks::new(&case.chunks), options).await;

        assert_eq!(result, expected(&case));
        assert_eq!(reader.state(), ReadState::Done);
    });
});
