//! Four-character codes and extension buffer tags.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Pack four ASCII bytes little-endian: `c0 | c1 << 8 | c2 << 16 | c3 << 24`.
pub const fn fourcc(code: [u8; 4]) -> u32 {
    (code[0] as u32) | (code[1] as u32) << 8 | (code[2] as u32) << 16 | (code[3] as u32) << 24
}

/// Unpack a code produced by [`fourcc`].
pub const fn fourcc_bytes(code: u32) -> [u8; 4] {
    code.to_le_bytes()
}

/// Identifier of an extension record type.
///
/// Tags are four-character codes (`CDO2`, `VSIN`, ...). The same value is
/// stored in the `BufferId` header field of every attached buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferTag(pub u32);

impl BufferTag {
    pub const fn new(code: [u8; 4]) -> Self {
        BufferTag(fourcc(code))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// The four characters of this tag, if they are all printable ASCII.
    pub fn code(&self) -> Option<[u8; 4]> {
        let bytes = fourcc_bytes(self.0);
        bytes
            .iter()
            .all(|b| b.is_ascii_graphic() || *b == b' ')
            .then_some(bytes)
    }
}

impl fmt::Display for BufferTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(bytes) => bytes.iter().try_for_each(|b| write!(f, "{}", *b as char)),
            None => write!(f, "{:#010x}", self.0),
        }
    }
}

impl Serialize for BufferTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when parsing a [`BufferTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBufferTagError(pub String);

impl fmt::Display for ParseBufferTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid buffer tag '{}': expected four characters or a 32-bit integer",
            self.0
        )
    }
}

impl std::error::Error for ParseBufferTagError {}

impl FromStr for BufferTag {
    type Err = ParseBufferTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u32::from_str_radix(hex, 16)
                .map(BufferTag)
                .map_err(|_| ParseBufferTagError(s.to_string()));
        }

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u32>()
                .map(BufferTag)
                .map_err(|_| ParseBufferTagError(s.to_string()));
        }

        match s.as_bytes() {
            &[a, b, c, d] if s.is_ascii() => Ok(BufferTag::new([a, b, c, d])),
            _ => Err(ParseBufferTagError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_packing() {
        assert_eq!(fourcc(*b"NV12"), 0x3231564E);
        assert_eq!(fourcc_bytes(0x3231564E), *b"NV12");
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(BufferTag::new(*b"CDO2").to_string(), "CDO2");
        assert_eq!(BufferTag::new(*b"FRC ").to_string(), "FRC ");
        assert_eq!(BufferTag(1).to_string(), "0x00000001");
    }

    #[test]
    fn test_tag_from_str() {
        assert_eq!("VSIN".parse::<BufferTag>().unwrap(), BufferTag::new(*b"VSIN"));
        assert_eq!("0x10".parse::<BufferTag>().unwrap(), BufferTag(16));
        assert_eq!("12345".parse::<BufferTag>().unwrap(), BufferTag(12345));
        assert!("toolong".parse::<BufferTag>().is_err());
    }
}
