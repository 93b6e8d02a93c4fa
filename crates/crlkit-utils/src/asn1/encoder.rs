//! ASN.1 DER encoder.

use super::{tags, Tag};

/// A builder for constructing DER-encoded ASN.1 data.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Consume the encoder and return the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a raw TLV with the given tag byte and value.
    pub fn write_tlv(&mut self, tag: u8, value: &[u8]) -> &mut Self {
        self.buf.push(tag);
        self.write_length(value.len());
        self.buf.extend_from_slice(value);
        self
    }

    /// Write a TLV for an arbitrary (possibly long-form) tag.
    pub fn write_tagged(&mut self, tag: Tag, value: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(&tag.to_bytes());
        self.write_length(value.len());
        self.buf.extend_from_slice(value);
        self
    }

    /// Write a constructed element whose contents are produced by `f`.
    pub fn write_nested<F>(&mut self, tag: u8, f: F) -> &mut Self
    where
        F: FnOnce(&mut Encoder),
    {
        let mut inner = Encoder::new();
        f(&mut inner);
        self.write_tlv(tag, &inner.buf)
    }

    /// Write a DER length encoding in the minimal number of octets.
    fn write_length(&mut self, length: usize) {
        if length < 0x80 {
            self.buf.push(length as u8);
            return;
        }
        let bytes = length.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        self.buf.push(0x80 | (bytes.len() - skip) as u8);
        self.buf.extend_from_slice(&bytes[skip..]);
    }

    /// Write an INTEGER value.
    pub fn write_integer(&mut self, value: &[u8]) -> &mut Self {
        // Add leading zero if high bit is set (to keep it positive)
        if !value.is_empty() && (value[0] & 0x80) != 0 {
            let mut padded = vec![0x00];
            padded.extend_from_slice(value);
            self.write_tlv(tags::INTEGER, &padded)
        } else {
            self.write_tlv(tags::INTEGER, value)
        }
    }

    /// Write an INTEGER whose contents are already in two's complement
    /// form, without adding a sign octet.
    pub fn write_integer_raw(&mut self, value: &[u8]) -> &mut Self {
        self.write_tlv(tags::INTEGER, value)
    }

    /// Write a small non-negative INTEGER.
    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        let bytes = value.to_be_bytes();
        let skip = bytes
            .iter()
            .take(bytes.len() - 1)
            .take_while(|&&b| b == 0)
            .count();
        self.write_integer(&bytes[skip..])
    }

    /// Write an OCTET STRING.
    pub fn write_octet_string(&mut self, value: &[u8]) -> &mut Self {
        self.write_tlv(tags::OCTET_STRING, value)
    }

    /// Write a BIT STRING with the given unused_bits count.
    pub fn write_bit_string(&mut self, unused_bits: u8, value: &[u8]) -> &mut Self {
        let mut content = Vec::with_capacity(value.len() + 1);
        content.push(unused_bits);
        content.extend_from_slice(value);
        self.write_tlv(tags::BIT_STRING, &content)
    }

    /// Write an OID from raw encoded bytes.
    pub fn write_oid(&mut self, oid_bytes: &[u8]) -> &mut Self {
        self.write_tlv(tags::OID, oid_bytes)
    }

    /// Write a NULL.
    pub fn write_null(&mut self) -> &mut Self {
        self.write_tlv(tags::NULL, &[])
    }

    /// Write raw bytes directly (already DER-encoded).
    pub fn write_raw(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Write a UTF8String (tag 0x0C).
    pub fn write_utf8_string(&mut self, s: &str) -> &mut Self {
        self.write_tlv(tags::UTF8_STRING, s.as_bytes())
    }

    /// Write a BOOLEAN (tag 0x01).
    pub fn write_boolean(&mut self, val: bool) -> &mut Self {
        self.write_tlv(tags::BOOLEAN, &[if val { 0xFF } else { 0x00 }])
    }

    /// Write an ENUMERATED (tag 0x0A).
    pub fn write_enumerated(&mut self, val: u8) -> &mut Self {
        self.write_tlv(tags::ENUMERATED, &[val])
    }

    /// Write a context-specific tagged value.
    pub fn write_context_specific(
        &mut self,
        tag_num: u32,
        constructed: bool,
        content: &[u8],
    ) -> &mut Self {
        self.write_tagged(Tag::context(tag_num, constructed), content)
    }

    /// Write a UTCTime (tag 0x17) from a UNIX timestamp.
    /// Format: YYMMDDHHmmSSZ (dates before 2050 use 2-digit year).
    pub fn write_utc_time(&mut self, timestamp: i64) -> &mut Self {
        let s = unix_to_utc_time(timestamp);
        self.write_tlv(tags::UTC_TIME, s.as_bytes())
    }

    /// Write a GeneralizedTime (tag 0x18) from a UNIX timestamp.
    /// Format: YYYYMMDDHHmmSSZ.
    pub fn write_generalized_time(&mut self, timestamp: i64) -> &mut Self {
        let s = unix_to_generalized_time(timestamp);
        self.write_tlv(tags::GENERALIZED_TIME, s.as_bytes())
    }

    /// Write a Time (UTCTime for 1950-2049, GeneralizedTime otherwise).
    pub fn write_time(&mut self, timestamp: i64) -> &mut Self {
        let (year, ..) = unix_to_datetime(timestamp);
        if (1950..2050).contains(&year) {
            self.write_utc_time(timestamp)
        } else {
            self.write_generalized_time(timestamp)
        }
    }

    /// Write a Time exactly as it was read: the chosen CHOICE arm and the
    /// original text.
    pub fn write_time_text(&mut self, generalized: bool, text: &[u8]) -> &mut Self {
        let tag = if generalized {
            tags::GENERALIZED_TIME
        } else {
            tags::UTC_TIME
        };
        self.write_tlv(tag, text)
    }
}

/// Convert a UNIX timestamp to date-time components.
pub(crate) fn unix_to_datetime(timestamp: i64) -> (i64, u32, u32, u32, u32, u32) {
    let days = timestamp.div_euclid(86400);
    let day_secs = timestamp.rem_euclid(86400) as u32;
    let hour = day_secs / 3600;
    let minute = (day_secs % 3600) / 60;
    let second = day_secs % 60;

    // Civil date from days since epoch (algorithm from Howard Hinnant)
    let days = days + 719468;
    let era = days.div_euclid(146097);
    let doe = (days - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };

    (year, m, d, hour, minute, second)
}

/// Format a UNIX timestamp as UTCTime string "YYMMDDHHmmSSZ".
fn unix_to_utc_time(timestamp: i64) -> String {
    let (year, month, day, hour, minute, second) = unix_to_datetime(timestamp);
    let yy = year.rem_euclid(100);
    format!("{yy:02}{month:02}{day:02}{hour:02}{minute:02}{second:02}Z")
}

/// Format a UNIX timestamp as GeneralizedTime string "YYYYMMDDHHmmSSZ".
fn unix_to_generalized_time(timestamp: i64) -> String {
    let (year, month, day, hour, minute, second) = unix_to_datetime(timestamp);
    format!("{year:04}{month:02}{day:02}{hour:02}{minute:02}{second:02}Z")
}
