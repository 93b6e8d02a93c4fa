//! ASN.1 tag parsing and encoding.

use super::{Tag, TagClass};
use crlkit_types::CryptoError;

/// Tag numbers above this would need more than four base-128 octets.
const MAX_TAG_OCTETS: usize = 4;

impl Tag {
    /// A universal-class tag.
    pub const fn universal(number: u32, constructed: bool) -> Self {
        Tag {
            class: TagClass::Universal,
            constructed,
            number,
        }
    }

    /// A context-specific tag (`[n]`).
    pub const fn context(number: u32, constructed: bool) -> Self {
        Tag {
            class: TagClass::ContextSpecific,
            constructed,
            number,
        }
    }

    /// Build the tag described by a single low-number identifier octet.
    pub const fn from_octet(octet: u8) -> Self {
        let class = match octet >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        };
        Tag {
            class,
            constructed: octet & 0x20 != 0,
            number: (octet & 0x1F) as u32,
        }
    }

    /// Whether this is the universal tag `number`, primitive or not as given.
    pub fn is_universal(&self, number: u8, constructed: bool) -> bool {
        self.class == TagClass::Universal
            && self.number == number as u32
            && self.constructed == constructed
    }

    /// First identifier octet. Long-form tags report the `0x1F` escape.
    pub fn first_octet(&self) -> u8 {
        let class_bits = match self.class {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xC0,
        };
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };
        let number_bits = if self.number < 0x1F {
            self.number as u8
        } else {
            0x1F
        };
        class_bits | constructed_bit | number_bits
    }

    /// Parse a tag from the first bytes of `input`.
    /// Returns the tag and number of bytes consumed.
    pub fn from_bytes(input: &[u8]) -> Result<(Self, usize), CryptoError> {
        let first = *input.first().ok_or(CryptoError::DecodeTruncated)?;
        let mut tag = Tag::from_octet(first);
        if first & 0x1F != 0x1F {
            return Ok((tag, 1));
        }

        // Long form: base-128 continuation octets, minimal encoding only.
        let mut number: u32 = 0;
        for (i, &byte) in input.iter().enumerate().skip(1) {
            if i > MAX_TAG_OCTETS || (i == 1 && byte == 0x80) {
                return Err(CryptoError::DecodeAsn1Fail);
            }
            number = (number << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                if number < 0x1F {
                    return Err(CryptoError::DecodeAsn1Fail);
                }
                tag.number = number;
                return Ok((tag, i + 1));
            }
        }
        Err(CryptoError::DecodeTruncated)
    }

    /// Encode this tag to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = vec![self.first_octet()];
        if self.number >= 0x1F {
            let mut num = self.number;
            let mut rev = Vec::new();
            while num > 0 {
                rev.push((num & 0x7F) as u8);
                num >>= 7;
            }
            let last = rev.len() - 1;
            result.extend(
                rev.iter()
                    .rev()
                    .enumerate()
                    .map(|(i, b)| if i < last { b | 0x80 } else { *b }),
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tag() {
        let (tag, len) = Tag::from_bytes(&[0x30]).unwrap();
        assert_eq!(tag.class, TagClass::Universal);
        assert!(tag.constructed);
        assert_eq!(tag.number, 0x10);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_parse_context_tag() {
        let (tag, _) = Tag::from_bytes(&[0xA0]).unwrap();
        assert_eq!(tag, Tag::context(0, true));
        let (tag, _) = Tag::from_bytes(&[0x82]).unwrap();
        assert_eq!(tag, Tag::context(2, false));
        assert!(!tag.is_universal(0x02, false));
    }

    #[test]
    fn test_long_form_tag() {
        let tag = Tag::context(200, false);
        let bytes = tag.to_bytes();
        assert_eq!(bytes, vec![0x9F, 0x81, 0x48]);
        let (parsed, len) = Tag::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, tag);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_long_form_rejects_small_numbers_and_truncation() {
        // 0x1F escape used for a number that fits the short form
        assert!(Tag::from_bytes(&[0x1F, 0x05]).is_err());
        // continuation bit set on the final available byte
        assert_eq!(
            Tag::from_bytes(&[0x1F, 0x81]),
            Err(CryptoError::DecodeTruncated)
        );
        // runaway continuation
        assert!(Tag::from_bytes(&[0x1F, 0x81, 0x81, 0x81, 0x81, 0x81, 0x01]).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Tag::from_bytes(&[]), Err(CryptoError::DecodeTruncated));
    }
}
