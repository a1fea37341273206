#![no_main]

use libfuzzer_sys::fuzz_target;

use byteseq_encoding::base64::{self, Base64Options};

// Arbitrary input must never panic, and every successful decode must be stable under re-encoding.
fuzz_target!(|data: (String, Base64Options)| {
    let (text, options) = data;

    if let Ok(bytes) = base64::decode(&text, &options) {
        let reencoded = base64::encode(&bytes, &options);
        assert_eq!(base64::decode(&reencoded, &options), Ok(bytes));
    }
});
