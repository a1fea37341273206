#![no_main]

use libfuzzer_sys::fuzz_target;

use byteseq_encoding::base64::{self, Base64Options};

fuzz_target!(|data: (Box<[u8]>, Base64Options)| {
    let (bytes, options) = data;

    let text = base64::encode(&bytes, &options);
    assert_eq!(Some(text.len()), base64::encoded_len(bytes.len(), options.use_padding()));
    assert_eq!(base64::decode(&text, &options), Ok(bytes.to_vec()));

    let forgiving = options.with_forgiving(true);
    assert_eq!(base64::decode(&text, &forgiving), Ok(bytes.to_vec()));
});
