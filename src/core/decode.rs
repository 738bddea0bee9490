//! URL and UTF-8 text decoding
//!
//! Content links arrive from the renderer percent-encoded, and article titles
//! inside older archives are stored as raw UTF-8 bytes. This module turns both
//! back into strings: [`decode_url`] strips the percent-encoding and then runs
//! the byte-level decoder, [`decode_utf8`] interprets a byte sequence as 1-, 2-
//! and 3-byte UTF-8.
//!
//! Archives never contain characters outside the Basic Multilingual Plane, so
//! 4-byte sequences are rejected rather than decoded. Malformed input is a
//! reported [`DecodeError`], never a silent mis-decode or an out-of-bounds
//! read.

use thiserror::Error;

/// Error type for text decoding operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A multi-byte sequence ran past the end of the input
    #[error("truncated sequence at offset {offset}: lead byte {lead:#04x} needs {needed} continuation byte(s)")]
    Truncated {
        offset: usize,
        lead: u8,
        needed: usize,
    },

    /// A continuation byte (0x80..=0xBF) appeared in lead position
    #[error("invalid lead byte {byte:#04x} at offset {offset}")]
    InvalidLead { offset: usize, byte: u8 },

    /// A 4-byte (beyond-BMP) sequence, which this decoder does not support
    #[error("unsupported 4-byte sequence at offset {offset} (lead byte {byte:#04x})")]
    Unsupported { offset: usize, byte: u8 },

    /// The arithmetic produced a value that is not a Unicode scalar (surrogate)
    #[error("decoded value {value:#06x} at offset {offset} is not a Unicode scalar")]
    NotAScalar { offset: usize, value: u32 },
}

fn continuation(bytes: &[u8], offset: usize, index: usize, needed: usize) -> Result<u8, DecodeError> {
    bytes.get(offset + index).copied().ok_or(DecodeError::Truncated {
        offset,
        lead: bytes[offset],
        needed,
    })
}

fn scalar(value: u32, offset: usize) -> Result<char, DecodeError> {
    char::from_u32(value).ok_or(DecodeError::NotAScalar { offset, value })
}

/// Decodes a byte sequence as 1-, 2- and 3-byte UTF-8.
///
/// The cursor walks the input left to right:
/// - bytes below 128 pass through as-is,
/// - bytes in 192..=223 start a 2-byte sequence,
/// - bytes in 224..=239 start a 3-byte sequence.
///
/// Continuation bytes contribute their low 6 bits; their high bits are masked
/// off without further validation. Lead bytes in the continuation range and
/// 4-byte lead bytes are rejected, as are sequences truncated at the end of
/// input.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c < 128 {
            out.push(char::from(c));
            i += 1;
        } else if (192..224).contains(&c) {
            let c2 = continuation(bytes, i, 1, 1)?;
            let value = ((u32::from(c) & 0x1F) << 6) | (u32::from(c2) & 0x3F);
            out.push(scalar(value, i)?);
            i += 2;
        } else if (224..240).contains(&c) {
            let c2 = continuation(bytes, i, 1, 2)?;
            let c3 = continuation(bytes, i, 2, 2)?;
            let value = ((u32::from(c) & 0x0F) << 12)
                | ((u32::from(c2) & 0x3F) << 6)
                | (u32::from(c3) & 0x3F);
            out.push(scalar(value, i)?);
            i += 3;
        } else if c < 192 {
            return Err(DecodeError::InvalidLead { offset: i, byte: c });
        } else {
            return Err(DecodeError::Unsupported { offset: i, byte: c });
        }
    }

    Ok(out)
}

/// Decodes URL-encoded text: percent-decoding first, then UTF-8.
///
/// The percent-decoding step yields raw bytes so that the byte-level decoder
/// above, not the unescaping, owns the UTF-8 interpretation.
pub fn decode_url(text: &str) -> Result<String, DecodeError> {
    let bytes = urlencoding::decode_binary(text.as_bytes());
    decode_utf8(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_passes_through() {
        let input: Vec<u8> = (0u8..128).collect();
        let decoded = decode_utf8(&input).unwrap();
        let expected: String = (0u8..128).map(char::from).collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_mixed_two_byte_sequence() {
        // "A", 0xC3 0xA9 = U+00E9 "é", "B"
        let decoded = decode_utf8(&[0x41, 0xC3, 0xA9, 0x42]).unwrap();
        assert_eq!(decoded, "AéB");
    }

    #[test]
    fn test_three_byte_sequence() {
        // 0xE2 0x82 0xAC = U+20AC "€"
        let decoded = decode_utf8(&[0xE2, 0x82, 0xAC]).unwrap();
        assert_eq!(decoded, "€");
    }

    #[test]
    fn test_truncated_two_byte_sequence() {
        let err = decode_utf8(&[0x41, 0xC3]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                offset: 1,
                lead: 0xC3,
                needed: 1
            }
        );
    }

    #[test]
    fn test_truncated_three_byte_sequence() {
        let err = decode_utf8(&[0xE2, 0x82]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { offset: 0, .. }));
    }

    #[test]
    fn test_continuation_byte_in_lead_position() {
        let err = decode_utf8(&[0x80]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidLead {
                offset: 0,
                byte: 0x80
            }
        );
    }

    #[test]
    fn test_four_byte_sequence_rejected() {
        // U+1F600 as UTF-8; beyond the BMP, out of scope
        let err = decode_utf8(&[0xF0, 0x9F, 0x98, 0x80]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Unsupported {
                offset: 0,
                byte: 0xF0
            }
        );
    }

    #[test]
    fn test_surrogate_rejected() {
        // 0xED 0xA0 0x80 would decode to 0xD800
        let err = decode_utf8(&[0xED, 0xA0, 0x80]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NotAScalar {
                offset: 0,
                value: 0xD800
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_utf8(&[]).unwrap(), "");
    }

    #[test]
    fn test_decode_url_mixed() {
        assert_eq!(decode_url("A%C3%A9B").unwrap(), "AéB");
    }

    #[test]
    fn test_decode_url_plain_text_unchanged() {
        assert_eq!(decode_url("plain-text_123").unwrap(), "plain-text_123");
    }

    #[test]
    fn test_decode_url_space() {
        assert_eq!(decode_url("two%20words").unwrap(), "two words");
    }

    proptest! {
        #[test]
        fn prop_two_byte_round_trip(value in 0x80u32..=0x7FF) {
            let ch = char::from_u32(value).unwrap();
            let mut buf = [0u8; 4];
            let encoded = ch.encode_utf8(&mut buf);
            let decoded = decode_utf8(encoded.as_bytes()).unwrap();
            prop_assert_eq!(decoded.chars().next().unwrap(), ch);
        }

        #[test]
        fn prop_three_byte_round_trip(value in 0x800u32..=0xFFFF) {
            // Skip the surrogate gap; those are not scalar values
            prop_assume!(!(0xD800..=0xDFFF).contains(&value));
            let ch = char::from_u32(value).unwrap();
            let mut buf = [0u8; 4];
            let encoded = ch.encode_utf8(&mut buf);
            let decoded = decode_utf8(encoded.as_bytes()).unwrap();
            prop_assert_eq!(decoded.chars().next().unwrap(), ch);
        }

        #[test]
        fn prop_bmp_string_round_trip(s in "[\\x00-\\x{FFFF}]{0,32}") {
            let decoded = decode_utf8(s.as_bytes()).unwrap();
            prop_assert_eq!(decoded, s);
        }
    }
}
