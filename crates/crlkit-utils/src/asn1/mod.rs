//! ASN.1 DER encoding and decoding.
//!
//! The decoder is a borrowed cursor over DER bytes: every `read_*` call
//! consumes exactly one TLV and checks its tag, so a schema is expressed as
//! the sequence of calls the caller makes. Nothing is copied until the
//! caller asks for an owned value.

mod decoder;
mod encoder;
mod tag;

pub use decoder::{decode_string, Decoder, MAX_DEPTH};
pub use encoder::Encoder;

/// ASN.1 tag constants (first identifier octet).
pub mod tags {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OID: u8 = 0x06;
    pub const ENUMERATED: u8 = 0x0A;
    pub const UTF8_STRING: u8 = 0x0C;
    pub const NUMERIC_STRING: u8 = 0x12;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const T61_STRING: u8 = 0x14;
    pub const IA5_STRING: u8 = 0x16;
    pub const UTC_TIME: u8 = 0x17;
    pub const GENERALIZED_TIME: u8 = 0x18;
    pub const VISIBLE_STRING: u8 = 0x1A;
    pub const UNIVERSAL_STRING: u8 = 0x1C;
    pub const BMP_STRING: u8 = 0x1E;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
    pub const CONSTRUCTED: u8 = 0x20;
}

/// Represents a parsed ASN.1 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub constructed: bool,
    pub number: u32,
}

/// ASN.1 tag class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

/// A borrowed ASN.1 TLV element.
#[derive(Debug, Clone)]
pub struct Tlv<'a> {
    pub tag: Tag,
    /// Contents octets.
    pub value: &'a [u8],
    /// The whole element, identifier and length octets included.
    pub raw: &'a [u8],
}

/// A decoded `Time` CHOICE (UTCTime or GeneralizedTime).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time<'a> {
    /// `true` for GeneralizedTime, `false` for UTCTime.
    pub generalized: bool,
    /// The text of the time value as it appeared on the wire.
    pub text: &'a [u8],
    /// Seconds since 1970-01-01 00:00:00 UTC.
    pub timestamp: i64,
}
