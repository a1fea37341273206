//! Positional-numeral text forms of bytestrings: every byte becomes a fixed-width run of digits in
//! base 2, 8, 10, or 16.
//!
//! ```
//! use byteseq_encoding::numeral::{self, NumeralFormat, Radix};
//!
//! assert_eq!("ff", numeral::format(&[255], Radix::Hexadecimal));
//! assert_eq!("011", numeral::format(&[9], Radix::Octal));
//!
//! let fmt = NumeralFormat::new(Radix::Hexadecimal)
//!     .with_upper_case(true)
//!     .with_prefix("0x")
//!     .with_separator(" ");
//! assert_eq!("0x0A 0xFF", fmt.format(&[10, 255]));
//! assert_eq!(vec![10, 255], fmt.parse("0x0A 0xFF").unwrap());
//! ```

use core::fmt::Write;
use core::str::FromStr;

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;

use crate::error::{NumeralError, OptionsError};

/// The supported bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dev", derive(Arbitrary))]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    /// The numeric value of the base.
    pub const fn value(&self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// The least number of digits that can represent every byte, i.e., the number of digits of 255.
    pub const fn min_digits(&self) -> usize {
        match self {
            Radix::Binary => 8,
            Radix::Octal => 3,
            Radix::Decimal => 3,
            Radix::Hexadecimal => 2,
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = OptionsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Radix::Binary),
            8 => Ok(Radix::Octal),
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hexadecimal),
            other => Err(OptionsError::UnsupportedRadix(other.to_string())),
        }
    }
}

impl FromStr for Radix {
    type Err = OptionsError;

    /// Accepts the base as a number (`"16"`) or by name (`"hexadecimal"`, `"hex"`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2" | "binary" | "bin" => Ok(Radix::Binary),
            "8" | "octal" | "oct" => Ok(Radix::Octal),
            "10" | "decimal" | "dec" => Ok(Radix::Decimal),
            "16" | "hexadecimal" | "hex" => Ok(Radix::Hexadecimal),
            _ => Err(OptionsError::UnsupportedRadix(s.to_string())),
        }
    }
}

/// How to render and parse bytes as numerals of a particular [`Radix`].
///
/// Each byte is written as exactly [`padded_length`](NumeralFormat::padded_length) digits, wrapped
/// in `prefix` and `suffix`; consecutive bytes are joined with `separator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralFormat {
    radix: Radix,
    padded_length: usize,
    upper_case: bool,
    case_insensitive: bool,
    prefix: String,
    suffix: String,
    separator: String,
}

impl NumeralFormat {
    /// The default format for `radix`: minimal zero-padding, lowercase, no affixes, no separator.
    pub fn new(radix: Radix) -> Self {
        NumeralFormat {
            radix,
            padded_length: radix.min_digits(),
            upper_case: false,
            case_insensitive: false,
            prefix: String::new(),
            suffix: String::new(),
            separator: String::new(),
        }
    }

    /// Zero-pads every byte to `padded_length` digits.
    ///
    /// Errors if `padded_length` is less than [`Radix::min_digits`].
    pub fn with_padded_length(mut self, padded_length: usize) -> Result<Self, OptionsError> {
        let minimum = self.radix.min_digits();
        if padded_length < minimum {
            return Err(OptionsError::PaddedLengthTooShort {
                given: padded_length,
                minimum,
                radix: self.radix.value(),
            });
        }

        self.padded_length = padded_length;
        Ok(self)
    }

    /// Emit uppercase hexadecimal digits. Has no effect for other radixes.
    pub fn with_upper_case(mut self, upper_case: bool) -> Self {
        self.upper_case = upper_case;
        self
    }

    /// Accept hexadecimal digits of either case when parsing.
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn padded_length(&self) -> usize {
        self.padded_length
    }

    pub fn upper_case(&self) -> bool {
        self.upper_case
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Length in bytes of the text for a single byte, including prefix and suffix.
    fn chunk_len(&self) -> usize {
        self.padded_length + self.prefix.len() + self.suffix.len()
    }

    /// Renders `bytes` as numerals.
    pub fn format(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(
            bytes.len() * (self.chunk_len() + self.separator.len()),
        );

        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }

            out.push_str(&self.prefix);
            self.write_digits(&mut out, *byte);
            out.push_str(&self.suffix);
        }

        out
    }

    fn write_digits(&self, out: &mut String, byte: u8) {
        let width = self.padded_length;
        // Writing into a `String` cannot fail.
        let _ = match (self.radix, self.upper_case) {
            (Radix::Binary, _) => write!(out, "{:0width$b}", byte, width = width),
            (Radix::Octal, _) => write!(out, "{:0width$o}", byte, width = width),
            (Radix::Decimal, _) => write!(out, "{:0width$}", byte, width = width),
            (Radix::Hexadecimal, false) => write!(out, "{:0width$x}", byte, width = width),
            (Radix::Hexadecimal, true) => write!(out, "{:0width$X}", byte, width = width),
        };
    }

    /// Parses text produced by [`format`](NumeralFormat::format) under the same options.
    ///
    /// With a non-empty separator the text is split on it; otherwise it is cut into fixed-width
    /// chunks. Empty text parses to no bytes.
    pub fn parse(&self, text: &str) -> Result<Vec<u8>, NumeralError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        if !self.separator.is_empty() {
            return text
                .split(self.separator.as_str())
                .map(|chunk| self.parse_chunk(chunk))
                .collect();
        }

        let width = self.chunk_len();
        let whole = text.len() - (text.len() % width);
        if whole != text.len() {
            let rest = text.get(whole..).unwrap_or(text);
            return Err(NumeralError::Trailing(rest.to_string()));
        }

        let mut bytes = Vec::with_capacity(text.len() / width);
        let mut start = 0;
        while start < text.len() {
            let end = start + width;
            let chunk = text
                .get(start..end)
                .ok_or_else(|| NumeralError::InvalidDigits(text[start..].to_string()))?;
            bytes.push(self.parse_chunk(chunk)?);
            start = end;
        }

        Ok(bytes)
    }

    fn parse_chunk(&self, chunk: &str) -> Result<u8, NumeralError> {
        let digits = chunk
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()))
            .ok_or_else(|| NumeralError::MissingAffix(chunk.to_string()))?;

        if digits.len() != self.padded_length || !digits.chars().all(|c| self.is_digit(c)) {
            return Err(NumeralError::InvalidDigits(chunk.to_string()));
        }

        u32::from_str_radix(digits, self.radix.value())
            .ok()
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| NumeralError::InvalidDigits(chunk.to_string()))
    }

    fn is_digit(&self, c: char) -> bool {
        match self.radix {
            Radix::Binary => matches!(c, '0' | '1'),
            Radix::Octal => matches!(c, '0'..='7'),
            Radix::Decimal => c.is_ascii_digit(),
            Radix::Hexadecimal => {
                let lower = !self.upper_case || self.case_insensitive;
                let upper = self.upper_case || self.case_insensitive;
                c.is_ascii_digit()
                    || (lower && matches!(c, 'a'..='f'))
                    || (upper && matches!(c, 'A'..='F'))
            }
        }
    }
}

impl Default for NumeralFormat {
    /// Lowercase hexadecimal, two digits per byte.
    fn default() -> Self {
        NumeralFormat::new(Radix::Hexadecimal)
    }
}

#[cfg(feature = "dev")]
impl<'a> Arbitrary<'a> for NumeralFormat {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Affixes and separators come from fixed menus so that no separator can occur inside a digit run.
        const AFFIXES: [&str; 5] = ["", "0x", "\\x", "#", "%"];
        const SEPARATORS: [&str; 5] = ["", " ", ",", ", ", "-"];

        let radix = Radix::arbitrary(u)?;
        let extra = usize::from(u8::arbitrary(u)? % 4);

        let fmt = NumeralFormat::new(radix)
            .with_upper_case(bool::arbitrary(u)?)
            .with_case_insensitive(bool::arbitrary(u)?)
            .with_prefix(*u.choose(&AFFIXES)?)
            .with_suffix(*u.choose(&AFFIXES)?)
            .with_separator(*u.choose(&SEPARATORS)?);

        fmt.with_padded_length(radix.min_digits() + extra)
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

/// Renders `bytes` in `radix` with default options.
pub fn format(bytes: &[u8], radix: Radix) -> String {
    NumeralFormat::new(radix).format(bytes)
}

/// Parses text in `radix` with default options.
pub fn parse(text: &str, radix: Radix) -> Result<Vec<u8>, NumeralError> {
    NumeralFormat::new(radix).parse(text)
}
