#![no_main]

use libfuzzer_sys::fuzz_target;

use byteseq_encoding::numeral::NumeralFormat;

fuzz_target!(|data: (Box<[u8]>, NumeralFormat)| {
    let (bytes, fmt) = data;

    let text = fmt.format(&bytes);
    let per_byte = fmt.padded_length() + fmt.prefix().len() + fmt.suffix().len();
    let separators = bytes.len().saturating_sub(1) * fmt.separator().len();
    assert_eq!(text.len(), bytes.len() * per_byte + separators);

    assert_eq!(fmt.parse(&text), Ok(bytes.to_vec()));
});
