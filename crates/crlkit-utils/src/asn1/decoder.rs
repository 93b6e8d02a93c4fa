//! ASN.1 DER decoder.

use super::{tags, Tag, Time, Tlv};
use crlkit_types::CryptoError;

/// Maximum nesting accepted by [`Decoder::walk`].
pub const MAX_DEPTH: usize = 32;

/// Lengths wider than this many octets cannot describe an in-memory buffer.
const MAX_LENGTH_OCTETS: usize = 4;

/// A streaming ASN.1 DER decoder.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the remaining undecoded bytes.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// Current offset from the start of the decoder's input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<(), CryptoError> {
        match self.remaining().len() {
            0 => Ok(()),
            n => Err(CryptoError::DecodeTrailingData(n)),
        }
    }

    /// Parse the next TLV element.
    pub fn read_tlv(&mut self) -> Result<Tlv<'a>, CryptoError> {
        let start = self.pos;
        let (tag, tag_len) = Tag::from_bytes(self.remaining())?;
        self.pos += tag_len;

        let length = self.read_length()?;
        let end = self
            .pos
            .checked_add(length)
            .filter(|&end| end <= self.data.len())
            .ok_or(CryptoError::DecodeTruncated)?;

        let value = &self.data[self.pos..end];
        let raw = &self.data[start..end];
        self.pos = end;

        Ok(Tlv { tag, value, raw })
    }

    /// Parse a DER length. Indefinite and non-minimal forms are rejected.
    fn read_length(&mut self) -> Result<usize, CryptoError> {
        let first = *self
            .data
            .get(self.pos)
            .ok_or(CryptoError::DecodeTruncated)?;
        self.pos += 1;

        if first < 0x80 {
            return Ok(first as usize);
        }
        if first == 0x80 {
            return Err(CryptoError::DecodeIndefiniteLength);
        }
        let num_bytes = (first & 0x7F) as usize;
        if num_bytes > MAX_LENGTH_OCTETS {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        let octets = self
            .data
            .get(self.pos..self.pos + num_bytes)
            .ok_or(CryptoError::DecodeTruncated)?;
        if octets[0] == 0 {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        let length = octets
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        if length < 0x80 {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        self.pos += num_bytes;
        Ok(length)
    }

    /// Read one TLV and require a universal tag.
    fn read_universal(&mut self, tag_octet: u8) -> Result<Tlv<'a>, CryptoError> {
        let tlv = self.read_tlv()?;
        let expected = Tag::from_octet(tag_octet);
        if tlv.tag != expected {
            return Err(CryptoError::DecodeUnexpectedTag {
                expected: tag_octet,
                found: tlv.tag.first_octet(),
            });
        }
        Ok(tlv)
    }

    /// Read the next element and return it whole (identifier, length and
    /// contents), after checking that it is the expected universal type.
    pub fn read_raw_tlv(&mut self, tag_octet: u8) -> Result<&'a [u8], CryptoError> {
        self.read_universal(tag_octet).map(|tlv| tlv.raw)
    }

    /// Read an INTEGER and return its bytes (big-endian, may include leading zero).
    pub fn read_integer(&mut self) -> Result<&'a [u8], CryptoError> {
        let tlv = self.read_universal(tags::INTEGER)?;
        if tlv.value.is_empty() {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        Ok(tlv.value)
    }

    /// Read an ENUMERATED and return its value.
    pub fn read_enumerated(&mut self) -> Result<u8, CryptoError> {
        let tlv = self.read_universal(tags::ENUMERATED)?;
        match tlv.value {
            [v] => Ok(*v),
            _ => Err(CryptoError::DecodeAsn1Fail),
        }
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<&'a [u8], CryptoError> {
        self.read_universal(tags::OCTET_STRING).map(|tlv| tlv.value)
    }

    /// Read a BIT STRING and return (unused_bits, data).
    pub fn read_bit_string(&mut self) -> Result<(u8, &'a [u8]), CryptoError> {
        let tlv = self.read_universal(tags::BIT_STRING)?;
        match tlv.value.split_first() {
            Some((&unused, data)) if unused <= 7 && (unused == 0 || !data.is_empty()) => {
                Ok((unused, data))
            }
            _ => Err(CryptoError::DecodeAsn1Fail),
        }
    }

    /// Read an OID and return the raw bytes.
    pub fn read_oid(&mut self) -> Result<&'a [u8], CryptoError> {
        let tlv = self.read_universal(tags::OID)?;
        if tlv.value.is_empty() {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        Ok(tlv.value)
    }

    /// Read a SEQUENCE, returning a sub-decoder over its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder<'a>, CryptoError> {
        self.read_universal(tags::SEQUENCE)
            .map(|tlv| Decoder::new(tlv.value))
    }

    /// Read a SET, returning a sub-decoder over its contents.
    pub fn read_set(&mut self) -> Result<Decoder<'a>, CryptoError> {
        self.read_universal(tags::SET)
            .map(|tlv| Decoder::new(tlv.value))
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Result<Tag, CryptoError> {
        Tag::from_bytes(self.remaining()).map(|(tag, _)| tag)
    }

    /// Whether the next element carries the given universal tag. Returns
    /// `false` at end of input.
    pub fn next_is(&self, tag_octet: u8) -> bool {
        !self.is_empty()
            && self
                .peek_tag()
                .map(|tag| tag == Tag::from_octet(tag_octet))
                .unwrap_or(false)
    }

    /// Read a BOOLEAN value. DER allows only 0x00 (false) and 0xFF (true).
    pub fn read_boolean(&mut self) -> Result<bool, CryptoError> {
        let tlv = self.read_universal(tags::BOOLEAN)?;
        match tlv.value {
            [0x00] => Ok(false),
            [0xFF] => Ok(true),
            _ => Err(CryptoError::DecodeAsn1Fail),
        }
    }

    /// Read a context-specific tagged value with the expected tag number.
    pub fn read_context_specific(
        &mut self,
        tag_num: u32,
        constructed: bool,
    ) -> Result<Tlv<'a>, CryptoError> {
        let tlv = self.read_tlv()?;
        if tlv.tag != Tag::context(tag_num, constructed) {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        Ok(tlv)
    }

    /// Try to read a context-specific tagged value. Returns `None` if
    /// the next tag does not match, without consuming any bytes.
    pub fn try_read_context_specific(
        &mut self,
        tag_num: u32,
        constructed: bool,
    ) -> Result<Option<Tlv<'a>>, CryptoError> {
        if self.is_empty() {
            return Ok(None);
        }
        if self.peek_tag()? == Tag::context(tag_num, constructed) {
            Ok(Some(self.read_tlv()?))
        } else {
            Ok(None)
        }
    }

    /// Read a Time value (UTCTime or GeneralizedTime) as a UNIX timestamp.
    pub fn read_time(&mut self) -> Result<i64, CryptoError> {
        self.read_time_value().map(|t| t.timestamp)
    }

    /// Read a Time value keeping its wire form alongside the timestamp.
    pub fn read_time_value(&mut self) -> Result<Time<'a>, CryptoError> {
        let tlv = self.read_tlv()?;
        let s = core::str::from_utf8(tlv.value).map_err(|_| CryptoError::DecodeInvalidTime)?;
        let generalized = if tlv.tag.is_universal(tags::UTC_TIME, false) {
            false
        } else if tlv.tag.is_universal(tags::GENERALIZED_TIME, false) {
            true
        } else {
            return Err(CryptoError::DecodeUnexpectedTag {
                expected: tags::UTC_TIME,
                found: tlv.tag.first_octet(),
            });
        };
        let timestamp = if generalized {
            parse_generalized_time(s)?
        } else {
            parse_utc_time(s)?
        };
        Ok(Time {
            generalized,
            text: tlv.value,
            timestamp,
        })
    }

    /// Walk every element below the cursor without interpreting it, and
    /// return how many elements were seen. Constructed elements are entered
    /// up to `max_depth` levels; deeper nesting is an error.
    pub fn walk(&mut self, max_depth: usize) -> Result<usize, CryptoError> {
        let mut count = 0usize;
        // Decoders for the constructed elements currently open.
        let mut stack: Vec<Decoder<'a>> = vec![self.clone()];
        while let Some(top) = stack.last_mut() {
            if top.is_empty() {
                stack.pop();
                continue;
            }
            let tlv = top.read_tlv()?;
            count += 1;
            if tlv.tag.constructed {
                if stack.len() > max_depth {
                    return Err(CryptoError::DecodeDepthExceeded(max_depth));
                }
                stack.push(Decoder::new(tlv.value));
            }
        }
        self.pos = self.data.len();
        Ok(count)
    }
}

/// Decode the contents of a universal string type into text.
///
/// The character set is chosen from the tag: the ASCII-only types reject
/// any byte above 0x7F, UTF8String must be valid UTF-8, TeletexString is
/// read as Latin-1, and BMPString/UniversalString are UTF-16BE/UCS-4.
pub fn decode_string(tag_number: u32, value: &[u8]) -> Result<String, CryptoError> {
    const NUMERIC: u32 = tags::NUMERIC_STRING as u32;
    const PRINTABLE: u32 = tags::PRINTABLE_STRING as u32;
    const IA5: u32 = tags::IA5_STRING as u32;
    const VISIBLE: u32 = tags::VISIBLE_STRING as u32;
    const UTF8: u32 = tags::UTF8_STRING as u32;
    const T61: u32 = tags::T61_STRING as u32;
    const BMP: u32 = tags::BMP_STRING as u32;
    const UNIVERSAL: u32 = tags::UNIVERSAL_STRING as u32;

    match tag_number {
        NUMERIC | PRINTABLE | IA5 | VISIBLE => {
            if !value.is_ascii() {
                return Err(CryptoError::DecodeAsn1Fail);
            }
            Ok(value.iter().map(|&b| b as char).collect())
        }
        UTF8 => String::from_utf8(value.to_vec()).map_err(|_| CryptoError::DecodeAsn1Fail),
        T61 => Ok(value.iter().map(|&b| b as char).collect()),
        BMP => {
            if value.len() % 2 != 0 {
                return Err(CryptoError::DecodeAsn1Fail);
            }
            let units = value.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
            char::decode_utf16(units)
                .collect::<Result<String, _>>()
                .map_err(|_| CryptoError::DecodeAsn1Fail)
        }
        UNIVERSAL => {
            if value.len() % 4 != 0 {
                return Err(CryptoError::DecodeAsn1Fail);
            }
            value
                .chunks_exact(4)
                .map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
                .collect::<Option<String>>()
                .ok_or(CryptoError::DecodeAsn1Fail)
        }
        _ => Err(CryptoError::DecodeAsn1Fail),
    }
}

fn parse_digits(s: &str, range: core::ops::Range<usize>) -> Result<u32, CryptoError> {
    let part = s.get(range).ok_or(CryptoError::DecodeInvalidTime)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CryptoError::DecodeInvalidTime);
    }
    part.parse().map_err(|_| CryptoError::DecodeInvalidTime)
}

/// Parse UTCTime string "YYMMDDHHMMSSZ" to UNIX timestamp.
/// RFC 5280: 00-49 → 2000-2049, 50-99 → 1950-1999.
fn parse_utc_time(s: &str) -> Result<i64, CryptoError> {
    let s = s.strip_suffix('Z').ok_or(CryptoError::DecodeInvalidTime)?;
    if s.len() != 12 {
        return Err(CryptoError::DecodeInvalidTime);
    }
    let yy = parse_digits(s, 0..2)?;
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    datetime_to_unix(
        year,
        parse_digits(s, 2..4)?,
        parse_digits(s, 4..6)?,
        parse_digits(s, 6..8)?,
        parse_digits(s, 8..10)?,
        parse_digits(s, 10..12)?,
    )
}

/// Parse GeneralizedTime string "YYYYMMDDHHMMSSZ" to UNIX timestamp.
fn parse_generalized_time(s: &str) -> Result<i64, CryptoError> {
    let s = s.strip_suffix('Z').ok_or(CryptoError::DecodeInvalidTime)?;
    if s.len() != 14 {
        return Err(CryptoError::DecodeInvalidTime);
    }
    datetime_to_unix(
        parse_digits(s, 0..4)?,
        parse_digits(s, 4..6)?,
        parse_digits(s, 6..8)?,
        parse_digits(s, 8..10)?,
        parse_digits(s, 10..12)?,
        parse_digits(s, 12..14)?,
    )
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Convert a date-time to a UNIX timestamp (seconds since 1970-01-01 00:00:00 UTC).
fn datetime_to_unix(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> Result<i64, CryptoError> {
    if year == 0
        || !(1..=12).contains(&month)
        || day == 0
        || day > days_in_month(year, month)
        || hour > 23
        || min > 59
        || sec > 59
    {
        return Err(CryptoError::DecodeInvalidTime);
    }
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let y = if month <= 2 { year - 1 } else { year };
    let m = if month <= 2 { month + 9 } else { month - 3 };
    let days = 365 * y + y / 4 - y / 100 + y / 400 + (m * 306 + 5) / 10 + (day - 1) - 719468;
    Ok(days * 86400 + hour as i64 * 3600 + min as i64 * 60 + sec as i64)
}
