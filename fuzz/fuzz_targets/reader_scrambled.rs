#![no_main]

use libfuzzer_sys::fuzz_target;

use ufotofu::producer::{self, BulkProducerOperation, FromSlice};

use byteseq_reader::{ByteReader, Progress, ReadOptions};

// The bytes read must not depend on how the producer slices and delays them.
fuzz_target!(|data: (Box<[u8]>, Vec<BulkProducerOperation>, bool)| {
    let (input, ops, declare_length) = data;

    pollster::block_on(async {
        let source = producer::BulkScrambler::new(FromSlice::new(&input), ops);

        let mut last = None;
        let mut options = ReadOptions::new();
        if declare_length {
            options = options.total_byte_length(input.len() as u64);
        }
        let options = options.on_progress(|progress| last = Some(progress));

        let bytes = ByteReader::with_default_capacity(1)
            .read(source, options)
            .await
            .unwrap();

        assert_eq!(&bytes[..], &input[..]);

        if input.is_empty() {
            assert_eq!(last, None);
        } else {
            let total = declare_length.then_some(input.len() as u64);
            assert_eq!(
                last,
                Some(Progress {
                    loaded: input.len() as u64,
                    total,
                })
            );
        }
    });
});
