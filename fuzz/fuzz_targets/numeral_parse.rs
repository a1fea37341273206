#![no_main]

use libfuzzer_sys::fuzz_target;

use byteseq_encoding::numeral::NumeralFormat;

// Whatever parses must format back to the same text, up to letter case.
fuzz_target!(|data: (String, NumeralFormat)| {
    let (text, fmt) = data;

    if let Ok(bytes) = fmt.parse(&text) {
        let formatted = fmt.format(&bytes);

        if fmt.case_insensitive() {
            assert!(formatted.eq_ignore_ascii_case(&text));
        } else {
            assert_eq!(formatted, text);
        }
    }
});
