//! Percent-encoding (`%XX` escapes) of bytestrings, parameterised by an [`EncodeSet`] of bytes that
//! must be escaped and an optional space-as-plus convention, following the
//! [WHATWG URL Standard](https://url.spec.whatwg.org/#percent-encoded-bytes).
//!
//! ```
//! use byteseq_encoding::percent::{self, EncodeSet, PercentOptions};
//!
//! assert_eq!("+%21%22%23", percent::encode(&[0x20, 0x21, 0x22, 0x23], &PercentOptions::form_urlencoded()));
//!
//! let path = PercentOptions::new(EncodeSet::PATH, false).unwrap();
//! assert_eq!("a%20b/c%3Fd", percent::encode(b"a b/c?d", &path));
//! assert_eq!(b"a b/c?d".to_vec(), percent::decode("a%20b/c%3Fd", &path).unwrap());
//! ```

use core::str::FromStr;

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;

use crate::error::{OptionsError, PercentError};

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// A set of printable ASCII bytes that must be percent-escaped.
///
/// Bytes below `0x20`, above `0x7E`, and `0x25` (`%`) are escaped regardless of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeSet(u128);

impl EncodeSet {
    /// Only the implicitly escaped bytes.
    pub const EMPTY: EncodeSet = EncodeSet(0);

    /// The [fragment percent-encode set](https://url.spec.whatwg.org/#fragment-percent-encode-set).
    pub const FRAGMENT: EncodeSet = EncodeSet::EMPTY.with(b" \"<>`");

    /// The [query percent-encode set](https://url.spec.whatwg.org/#query-percent-encode-set).
    pub const QUERY: EncodeSet = EncodeSet::EMPTY.with(b" \"#<>");

    /// The [special-query percent-encode set](https://url.spec.whatwg.org/#special-query-percent-encode-set).
    pub const SPECIAL_QUERY: EncodeSet = EncodeSet::QUERY.with(b"'");

    /// The [path percent-encode set](https://url.spec.whatwg.org/#path-percent-encode-set).
    pub const PATH: EncodeSet = EncodeSet::QUERY.with(b"?`{}");

    /// The [userinfo percent-encode set](https://url.spec.whatwg.org/#userinfo-percent-encode-set).
    pub const USERINFO: EncodeSet = EncodeSet::PATH.with(b"/:;=@[\\]^|");

    /// The [component percent-encode set](https://url.spec.whatwg.org/#component-percent-encode-set).
    pub const COMPONENT: EncodeSet = EncodeSet::USERINFO.with(b"$%&+,");

    /// The [application/x-www-form-urlencoded percent-encode set](https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set).
    pub const FORM_URLENCODED: EncodeSet = EncodeSet::COMPONENT.with(b"!'()~");

    /// Adds the given ASCII bytes. Only usable for bytes below `0x80`.
    const fn with(self, bytes: &[u8]) -> Self {
        let mut bits = self.0;
        let mut i = 0;
        while i < bytes.len() {
            bits |= 1u128 << bytes[i];
            i += 1;
        }
        EncodeSet(bits)
    }

    /// A set containing exactly the given bytes (on top of the implicitly escaped ones).
    ///
    /// Bytes outside printable ASCII are always escaped, so listing them has no effect.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .filter(|byte| byte.is_ascii())
            .fold(0u128, |bits, byte| bits | 1u128 << *byte);
        EncodeSet(bits)
    }

    /// Whether `byte` was explicitly made part of this set.
    pub const fn contains(&self, byte: u8) -> bool {
        byte < 0x80 && self.0 & (1u128 << byte) != 0
    }

    pub const fn union(self, other: EncodeSet) -> Self {
        EncodeSet(self.0 | other.0)
    }

    /// Whether `byte` must be written as `%XX` under this set.
    pub const fn must_escape(&self, byte: u8) -> bool {
        byte < 0x20 || byte > 0x7E || byte == b'%' || self.contains(byte)
    }
}

impl Default for EncodeSet {
    fn default() -> Self {
        EncodeSet::FORM_URLENCODED
    }
}

impl FromStr for EncodeSet {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(EncodeSet::EMPTY),
            "fragment" => Ok(EncodeSet::FRAGMENT),
            "query" => Ok(EncodeSet::QUERY),
            "special-query" => Ok(EncodeSet::SPECIAL_QUERY),
            "path" => Ok(EncodeSet::PATH),
            "userinfo" => Ok(EncodeSet::USERINFO),
            "component" => Ok(EncodeSet::COMPONENT),
            "form-urlencoded" | "application/x-www-form-urlencoded" => {
                Ok(EncodeSet::FORM_URLENCODED)
            }
            _ => Err(OptionsError::UnknownEncodeSet(s.to_string())),
        }
    }
}

#[cfg(feature = "dev")]
impl<'a> Arbitrary<'a> for EncodeSet {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        const PRESETS: [EncodeSet; 8] = [
            EncodeSet::EMPTY,
            EncodeSet::FRAGMENT,
            EncodeSet::QUERY,
            EncodeSet::SPECIAL_QUERY,
            EncodeSet::PATH,
            EncodeSet::USERINFO,
            EncodeSet::COMPONENT,
            EncodeSet::FORM_URLENCODED,
        ];

        Ok(*u.choose(&PRESETS)?)
    }
}

/// Options for [`encode`] and [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentOptions {
    encode_set: EncodeSet,
    space_as_plus: bool,
}

impl PercentOptions {
    /// Errors if `space_as_plus` is set but `encode_set` does not contain `+`, since a literal `+`
    /// in the output would then be indistinguishable from an encoded space.
    pub fn new(encode_set: EncodeSet, space_as_plus: bool) -> Result<Self, OptionsError> {
        if space_as_plus && !encode_set.contains(b'+') {
            return Err(OptionsError::SpaceAsPlusWithoutPlus);
        }

        Ok(PercentOptions {
            encode_set,
            space_as_plus,
        })
    }

    /// The `application/x-www-form-urlencoded` convention: the form encode set, with spaces as `+`.
    pub const fn form_urlencoded() -> Self {
        PercentOptions {
            encode_set: EncodeSet::FORM_URLENCODED,
            space_as_plus: true,
        }
    }

    pub fn encode_set(&self) -> &EncodeSet {
        &self.encode_set
    }

    pub fn space_as_plus(&self) -> bool {
        self.space_as_plus
    }
}

impl Default for PercentOptions {
    /// The form encode set, with spaces as `%20`.
    fn default() -> Self {
        PercentOptions {
            encode_set: EncodeSet::FORM_URLENCODED,
            space_as_plus: false,
        }
    }
}

#[cfg(feature = "dev")]
impl<'a> Arbitrary<'a> for PercentOptions {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let encode_set = EncodeSet::arbitrary(u)?;
        let space_as_plus = bool::arbitrary(u)? && encode_set.contains(b'+');

        Ok(PercentOptions {
            encode_set,
            space_as_plus,
        })
    }
}

/// Percent-encodes `bytes`.
pub fn encode(bytes: &[u8], options: &PercentOptions) -> String {
    let mut out = String::with_capacity(bytes.len());

    for &byte in bytes {
        if byte == b' ' && options.space_as_plus {
            out.push('+');
        } else if options.encode_set.must_escape(byte) {
            out.push('%');
            out.push(UPPER_HEX[usize::from(byte >> 4)] as char);
            out.push(UPPER_HEX[usize::from(byte & 0x0F)] as char);
        } else {
            out.push(byte as char);
        }
    }

    out
}

/// Decodes percent-encoded `text`.
///
/// The text must consist of printable ASCII only. A `%` that is not followed by two hexadecimal
/// digits stands for itself.
pub fn decode(text: &str, options: &PercentOptions) -> Result<Vec<u8>, PercentError> {
    if let Some((offset, character)) = text
        .char_indices()
        .find(|(_, c)| !matches!(c, ' '..='~'))
    {
        return Err(PercentError::InvalidCharacter { character, offset });
    }

    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let high = bytes.get(i + 1).and_then(|b| hex_value(*b));
                let low = bytes.get(i + 2).and_then(|b| hex_value(*b));
                if let (Some(high), Some(low)) = (high, low) {
                    out.push(high << 4 | low);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b'+' if options.space_as_plus => out.push(b' '),
            other => out.push(other),
        }
        i += 1;
    }

    Ok(out)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}
