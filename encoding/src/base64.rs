//! Base64 encoding and decoding with a configurable alphabet and padding policy, including the
//! [forgiving-base64 decode](https://infra.spec.whatwg.org/#forgiving-base64-decode) of the WHATWG
//! Infra Standard.
//!
//! ```
//! use byteseq_encoding::base64::{self, Base64Options};
//!
//! let standard = Base64Options::standard();
//! assert_eq!("AwIBAP/+/fw=", base64::encode(&[3, 2, 1, 0, 255, 254, 253, 252], &standard));
//!
//! let url_safe = Base64Options::url_safe_no_pad();
//! assert_eq!("AwIBAP_-_fw", base64::encode(&[3, 2, 1, 0, 255, 254, 253, 252], &url_safe));
//!
//! let forgiving = Base64Options::standard().with_forgiving(true);
//! assert_eq!(b"foobar".to_vec(), base64::decode(" Zm9v\nYmFy ", &forgiving).unwrap());
//! ```

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;

use ::base64::alphabet::{self, ParseAlphabetError};
use ::base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use ::base64::{DecodeError, Engine};

use crate::error::{Base64Error, OptionsError};

const FIXED_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const PADDING: char = '=';

/// The mapping between 6-bit values and output symbols.
///
/// Values 0 to 61 are always `A`-`Z`, `a`-`z`, `0`-`9`; only the symbols for 62 and 63 can be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    inner: alphabet::Alphabet,
}

impl Alphabet {
    /// `+` and `/`, as in RFC 4648 section 4.
    pub const STANDARD: Alphabet = Alphabet {
        inner: alphabet::STANDARD,
    };

    /// `-` and `_`, as in RFC 4648 section 5.
    pub const URL_SAFE: Alphabet = Alphabet {
        inner: alphabet::URL_SAFE,
    };

    /// Creates an alphabet with the given symbols for the values 62 and 63.
    ///
    /// Both must be printable non-alphanumeric ASCII other than `=`, and they must differ.
    ///
    /// ```
    /// use byteseq_encoding::base64::Alphabet;
    ///
    /// assert_eq!(Alphabet::URL_SAFE, Alphabet::new('-', '_').unwrap());
    /// assert!(Alphabet::new('-', '-').is_err());
    /// assert!(Alphabet::new('a', '_').is_err());
    /// assert!(Alphabet::new('=', '_').is_err());
    /// ```
    pub fn new(symbol_62: char, symbol_63: char) -> Result<Self, OptionsError> {
        for symbol in [symbol_62, symbol_63] {
            if !symbol.is_ascii_graphic() || symbol.is_ascii_alphanumeric() || symbol == PADDING {
                return Err(OptionsError::InvalidAlphabetSymbol(symbol));
            }
        }

        if symbol_62 == symbol_63 {
            return Err(OptionsError::DuplicateAlphabetSymbol(symbol_62));
        }

        let mut symbols = String::with_capacity(64);
        symbols.push_str(FIXED_SYMBOLS);
        symbols.push(symbol_62);
        symbols.push(symbol_63);

        let inner = alphabet::Alphabet::new(&symbols).map_err(|err| match err {
            ParseAlphabetError::DuplicatedByte(byte) => {
                OptionsError::DuplicateAlphabetSymbol(char::from(byte))
            }
            _ => OptionsError::InvalidAlphabetSymbol(symbol_62),
        })?;

        Ok(Alphabet { inner })
    }

    pub fn symbol_62(&self) -> char {
        char::from(self.inner.as_str().as_bytes()[62])
    }

    pub fn symbol_63(&self) -> char {
        char::from(self.inner.as_str().as_bytes()[63])
    }

    /// The 6-bit value of `symbol`, or `None` if it is not part of this alphabet.
    pub fn value_of(&self, symbol: char) -> Option<u8> {
        if !symbol.is_ascii() {
            return None;
        }

        self.inner
            .as_str()
            .bytes()
            .position(|candidate| char::from(candidate) == symbol)
            .and_then(|value| u8::try_from(value).ok())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::STANDARD
    }
}

#[cfg(feature = "dev")]
impl<'a> Arbitrary<'a> for Alphabet {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        const CANDIDATES: [char; 8] = ['+', '/', '-', '_', '.', '~', '!', '*'];

        let symbol_62 = *u.choose(&CANDIDATES)?;
        let symbol_63 = *u.choose(&CANDIDATES)?;
        Alphabet::new(symbol_62, symbol_63).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

/// Options for [`encode`] and [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "dev", derive(Arbitrary))]
pub struct Base64Options {
    alphabet: Alphabet,
    use_padding: bool,
    forgiving: bool,
}

impl Base64Options {
    /// Standard alphabet, padded, strict decoding.
    pub const fn standard() -> Self {
        Base64Options {
            alphabet: Alphabet::STANDARD,
            use_padding: true,
            forgiving: false,
        }
    }

    /// Standard alphabet, unpadded, strict decoding.
    pub const fn standard_no_pad() -> Self {
        Base64Options {
            alphabet: Alphabet::STANDARD,
            use_padding: false,
            forgiving: false,
        }
    }

    /// URL-safe alphabet, padded, strict decoding.
    pub const fn url_safe() -> Self {
        Base64Options {
            alphabet: Alphabet::URL_SAFE,
            use_padding: true,
            forgiving: false,
        }
    }

    /// URL-safe alphabet, unpadded, strict decoding.
    pub const fn url_safe_no_pad() -> Self {
        Base64Options {
            alphabet: Alphabet::URL_SAFE,
            use_padding: false,
            forgiving: false,
        }
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_padding(mut self, use_padding: bool) -> Self {
        self.use_padding = use_padding;
        self
    }

    /// Decode leniently: ignore ASCII whitespace and accept missing or partial padding.
    pub fn with_forgiving(mut self, forgiving: bool) -> Self {
        self.forgiving = forgiving;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn use_padding(&self) -> bool {
        self.use_padding
    }

    pub fn forgiving(&self) -> bool {
        self.forgiving
    }

    /// An engine for these options. Leftover bits in a final partial group are always accepted.
    fn engine(&self, padding_mode: DecodePaddingMode) -> GeneralPurpose {
        let config = GeneralPurposeConfig::new()
            .with_encode_padding(self.use_padding)
            .with_decode_padding_mode(padding_mode)
            .with_decode_allow_trailing_bits(true);

        GeneralPurpose::new(&self.alphabet.inner, config)
    }
}

impl Default for Base64Options {
    fn default() -> Self {
        Base64Options::standard()
    }
}

/// The number of symbols [`encode`] emits for `len` bytes, or `None` if that overflows `usize`.
pub fn encoded_len(len: usize, use_padding: bool) -> Option<usize> {
    ::base64::encoded_len(len, use_padding)
}

/// Encodes `bytes` as Base64.
pub fn encode(bytes: &[u8], options: &Base64Options) -> String {
    options.engine(DecodePaddingMode::Indifferent).encode(bytes)
}

/// Decodes Base64 `text`.
///
/// The whole input is validated before any bytes are produced. In strict mode, padded input must be
/// canonically padded, and unpadded input must not contain `=` at all. In forgiving mode, ASCII
/// whitespace is removed first, up to two trailing `=` are dropped if the length is divisible by
/// four, inputs whose remaining length leaves a remainder of one modulo four are rejected, and the
/// rest must not contain `=`.
pub fn decode(text: &str, options: &Base64Options) -> Result<Vec<u8>, Base64Error> {
    if !options.forgiving {
        let padding_mode = if options.use_padding {
            DecodePaddingMode::RequireCanonical
        } else {
            DecodePaddingMode::RequireNone
        };

        return options
            .engine(padding_mode)
            .decode(text)
            .map_err(|err| decode_error(err, text, |offset| offset));
    }

    // `offsets[i]` is the offset in `text` of byte `i` of `symbols`.
    let mut symbols = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    for (offset, c) in text.char_indices().filter(|(_, c)| !c.is_ascii_whitespace()) {
        symbols.push(c);
        offsets.extend(offset..offset + c.len_utf8());
    }

    let mut len = symbols.chars().count();
    if len % 4 == 0 {
        for _ in 0..2 {
            if symbols.ends_with(PADDING) {
                symbols.pop();
                len -= 1;
            }
        }
    }

    if len % 4 == 1 {
        return Err(Base64Error::InvalidLength(len));
    }

    options
        .engine(DecodePaddingMode::RequireNone)
        .decode(&symbols)
        .map_err(|err| {
            decode_error(err, text, |offset| {
                offsets.get(offset).copied().unwrap_or(offset)
            })
        })
}

/// Translates an error of the engine, whose offsets `original` maps back into `text`.
fn decode_error(err: DecodeError, text: &str, original: impl Fn(usize) -> usize) -> Base64Error {
    match err {
        DecodeError::InvalidByte(offset, byte) | DecodeError::InvalidLastSymbol(offset, byte) => {
            let offset = original(offset);
            let character = text
                .get(offset..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::from(byte));

            Base64Error::InvalidCharacter { character, offset }
        }
        DecodeError::InvalidLength(len) => Base64Error::InvalidLength(len),
        DecodeError::InvalidPadding => Base64Error::InvalidPadding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: [u8; 8] = [3, 2, 1, 0, 255, 254, 253, 252];

    #[test]
    fn encode_variants() {
        assert_eq!("AwIBAP/+/fw=", encode(&SAMPLE, &Base64Options::standard()));
        assert_eq!("AwIBAP/+/fw", encode(&SAMPLE, &Base64Options::standard_no_pad()));
        assert_eq!("AwIBAP_-_fw=", encode(&SAMPLE, &Base64Options::url_safe()));
        assert_eq!("AwIBAP_-_fw", encode(&SAMPLE, &Base64Options::url_safe_no_pad()));
        assert_eq!("", encode(&[], &Base64Options::standard()));
    }

    #[test]
    fn rfc4648_vectors() {
        let options = Base64Options::default();
        let vectors: [(&[u8], &str); 7] = [
            (b"", ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foob", "Zm9vYg=="),
            (b"fooba", "Zm9vYmE="),
            (b"foobar", "Zm9vYmFy"),
        ];

        for (bytes, text) in vectors {
            assert_eq!(text, encode(bytes, &options));
            assert_eq!(bytes.to_vec(), decode(text, &options).unwrap());
        }
    }

    #[test]
    fn encoded_len_matches_output() {
        for len in 0..10 {
            let bytes = vec![0xA5; len];
            for padding in [true, false] {
                let options = Base64Options::standard().with_padding(padding);
                assert_eq!(encoded_len(len, padding), Some(encode(&bytes, &options).len()));
            }
        }
    }

    #[test]
    fn strict_padded_decode() {
        let options = Base64Options::standard();
        assert_eq!(SAMPLE.to_vec(), decode("AwIBAP/+/fw=", &options).unwrap());

        assert_eq!(
            Err(Base64Error::InvalidPadding),
            decode("AwIBAP/+/fw", &options)
        );
        assert!(decode("A===", &options).is_err());
        assert!(decode("Zg=g", &options).is_err());
        assert!(decode("Zg=", &options).is_err());
        assert!(decode("=", &options).is_err());
    }

    #[test]
    fn strict_rejects_wrong_alphabet() {
        let err = decode("AwIBAP_-_fw=", &Base64Options::standard()).unwrap_err();
        assert_eq!(
            Base64Error::InvalidCharacter {
                character: '_',
                offset: 6
            },
            err
        );
        assert_eq!(ErrorKind::Encoding, err.kind());

        assert!(decode("AwIBAP/+/fw=", &Base64Options::url_safe()).is_err());
    }

    #[test]
    fn strict_unpadded_decode() {
        let options = Base64Options::url_safe_no_pad();
        assert_eq!(SAMPLE.to_vec(), decode("AwIBAP_-_fw", &options).unwrap());
        assert!(decode("AwIBAP_-_fw=", &options).is_err());
        assert!(matches!(
            decode("AAAAA", &options),
            Err(Base64Error::InvalidLength(_))
        ));
    }

    #[test]
    fn strict_rejects_whitespace() {
        assert!(decode("Zm9v YmFy", &Base64Options::standard()).is_err());
    }

    #[test]
    fn forgiving_decode() {
        let options = Base64Options::standard().with_forgiving(true);

        assert_eq!(b"f".to_vec(), decode("Zg==", &options).unwrap());
        assert_eq!(b"f".to_vec(), decode("Zg", &options).unwrap());
        assert_eq!(b"fo".to_vec(), decode("Zm8", &options).unwrap());
        assert_eq!(b"fo".to_vec(), decode("Zm8=", &options).unwrap());
        assert_eq!(
            SAMPLE.to_vec(),
            decode("\tAwIB AP/+\r\n/fw\x0c", &options).unwrap()
        );
        assert_eq!(Vec::<u8>::new(), decode("  ", &options).unwrap());
    }

    #[test]
    fn forgiving_rejects_residue_one() {
        let options = Base64Options::standard().with_forgiving(true);

        assert_eq!(Err(Base64Error::InvalidLength(1)), decode("Z", &options));
        assert_eq!(Err(Base64Error::InvalidLength(5)), decode("Zm9vY", &options));
        // Padding is only stripped when the length is divisible by four.
        assert!(decode("Zg=", &options).is_err());
        assert!(decode("Zg===", &options).is_err());
        assert!(decode("Z===", &options).is_err());
    }

    #[test]
    fn forgiving_reports_offsets_in_the_original_text() {
        let options = Base64Options::standard().with_forgiving(true);

        assert_eq!(
            Err(Base64Error::InvalidCharacter {
                character: '_',
                offset: 7
            }),
            decode("Zm 9\nv\t_mFy", &options)
        );
    }

    #[test]
    fn leftover_bits_are_discarded() {
        assert_eq!(b"f".to_vec(), decode("Zh==", &Base64Options::standard()).unwrap());
        assert_eq!(b"f".to_vec(), decode("Zh", &Base64Options::standard_no_pad()).unwrap());
    }

    #[test]
    fn forgiving_still_checks_alphabet() {
        let options = Base64Options::url_safe().with_forgiving(true);
        assert!(decode("AwIBAP/+/fw", &options).is_err());
        assert!(decode("Zm9v\u{00A0}YmFy", &options).is_err());
    }

    #[test]
    fn custom_alphabet() {
        let alphabet = Alphabet::new('.', '~').unwrap();
        let options = Base64Options::standard_no_pad().with_alphabet(alphabet.clone());

        assert_eq!('.', alphabet.symbol_62());
        assert_eq!('~', alphabet.symbol_63());
        assert_eq!("AwIBAP~.~fw", encode(&SAMPLE, &options));
        assert_eq!(SAMPLE.to_vec(), decode("AwIBAP~.~fw", &options).unwrap());
    }

    #[test]
    fn alphabet_validation() {
        assert_eq!(
            Err(OptionsError::DuplicateAlphabetSymbol('+')),
            Alphabet::new('+', '+')
        );
        assert_eq!(
            Err(OptionsError::InvalidAlphabetSymbol(' ')),
            Alphabet::new(' ', '/')
        );
        assert_eq!(
            Err(OptionsError::InvalidAlphabetSymbol('\u{e9}')),
            Alphabet::new('+', '\u{e9}')
        );
        assert_eq!(
            ErrorKind::Type,
            Alphabet::new('Z', '/').unwrap_err().kind()
        );
    }
}
