use core::fmt::{Display, Formatter};

/// The broad category of a failure, shared by every codec and by the incremental reader.
///
/// Callers that only care about *what sort* of thing went wrong (for example, to map failures onto
/// the error classes of some host environment) can match on this instead of on the concrete error
/// enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An option value of the wrong type, such as an unknown preset name.
    Type,
    /// A numeric option outside its permitted range.
    Range,
    /// Text to be decoded does not conform to the expected character set, padding, or alphabet.
    Encoding,
    /// A stream was longer or shorter than its declared length.
    Data,
    /// An operation was invoked on an object in a state that does not permit it.
    InvalidState,
    /// An operation was cancelled.
    Abort,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ErrorKind::Type => "TypeError",
            ErrorKind::Range => "RangeError",
            ErrorKind::Encoding => "EncodingError",
            ErrorKind::Data => "DataError",
            ErrorKind::InvalidState => "InvalidStateError",
            ErrorKind::Abort => "AbortError",
        };

        write!(f, "{}", name)
    }
}

/// Everything that can go wrong when constructing codec options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// A radix other than 2, 8, 10, or 16 was requested.
    #[error("unsupported radix: {0}")]
    UnsupportedRadix(String),
    /// The zero-padded width is too small to represent every byte in the chosen radix.
    #[error("padded length {given} is shorter than the {minimum} digits needed for radix {radix}")]
    PaddedLengthTooShort {
        given: usize,
        minimum: usize,
        radix: u32,
    },
    /// A configurable Base64 symbol is not usable (control, whitespace, alphanumeric, non-ASCII, or `=`).
    #[error("invalid Base64 alphabet symbol: {0:?}")]
    InvalidAlphabetSymbol(char),
    /// The 62nd and 63rd Base64 symbols are identical.
    #[error("Base64 alphabet symbols must be unique, got {0:?} twice")]
    DuplicateAlphabetSymbol(char),
    /// `space_as_plus` was requested with an encode set that would not escape a literal `+`.
    #[error("space-as-plus requires `+` to be a member of the encode set")]
    SpaceAsPlusWithoutPlus,
    /// An encode set name did not match any preset.
    #[error("unknown encode set: {0}")]
    UnknownEncodeSet(String),
}

impl OptionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionsError::PaddedLengthTooShort { .. } => ErrorKind::Range,
            OptionsError::UnsupportedRadix(_)
            | OptionsError::InvalidAlphabetSymbol(_)
            | OptionsError::DuplicateAlphabetSymbol(_)
            | OptionsError::SpaceAsPlusWithoutPlus
            | OptionsError::UnknownEncodeSet(_) => ErrorKind::Type,
        }
    }
}

/// Text that could not be parsed as numerals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumeralError {
    /// A chunk does not consist of valid digits for the radix, or denotes a value above 255.
    #[error("invalid numeral: {0:?}")]
    InvalidDigits(String),
    /// A chunk does not carry the configured prefix or suffix.
    #[error("missing prefix or suffix: {0:?}")]
    MissingAffix(String),
    /// Characters left over after the last complete fixed-width chunk.
    #[error("trailing characters do not form a complete numeral: {0:?}")]
    Trailing(String),
}

impl NumeralError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}

/// Text that could not be decoded as Base64.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base64Error {
    /// A character outside the configured alphabet, or `=` in a position where padding may not occur.
    #[error("invalid Base64 character {character:?} at offset {offset}")]
    InvalidCharacter { character: char, offset: usize },
    /// The length of the input is impossible under the configured padding policy.
    #[error("invalid Base64 length: {0}")]
    InvalidLength(usize),
    /// Padding is missing where it is required, or present where it is not allowed.
    #[error("invalid Base64 padding")]
    InvalidPadding,
}

impl Base64Error {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}

/// Text that could not be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercentError {
    /// A character outside printable ASCII (`0x20` to `0x7E`).
    #[error("invalid character {character:?} at offset {offset} in percent-encoded text")]
    InvalidCharacter { character: char, offset: usize },
}

impl PercentError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}
