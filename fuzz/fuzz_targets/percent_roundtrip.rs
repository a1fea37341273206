#![no_main]

use libfuzzer_sys::fuzz_target;

use byteseq_encoding::percent::{self, PercentOptions};

fuzz_target!(|data: (Box<[u8]>, String, PercentOptions)| {
    let (bytes, text, options) = data;

    let encoded = percent::encode(&bytes, &options);
    assert!(encoded.bytes().all(|byte| (0x20..0x7F).contains(&byte)));
    assert_eq!(percent::decode(&encoded, &options), Ok(bytes.to_vec()));

    // Decoding arbitrary text may fail, but must not panic.
    let _ = percent::decode(&text, &options);
});
