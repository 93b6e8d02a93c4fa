//! Distinguished Name decoding and rendering.
//!
//! A [`Name`] keeps its exact DER encoding next to the decoded attributes so
//! that the raw issuer bytes can be handed out and re-emitted unchanged.

use crlkit_types::PkiError;
use crlkit_utils::asn1::{decode_string, tags, Decoder, Tag, TagClass};
use crlkit_utils::oid::{known, Oid};

use super::{asn1_err, hex};

/// One `AttributeTypeAndValue` of a Name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub oid: Oid,
    /// Tag of the value (e.g. PrintableString, UTF8String).
    pub value_tag: Tag,
    /// Contents octets of the value.
    pub value: Vec<u8>,
    /// The whole value TLV.
    pub raw_value: Vec<u8>,
}

/// An X.501 `Name`: a sequence of relative distinguished names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// RDNs in encoding order; each holds one or more attributes.
    pub rdns: Vec<Vec<AttributeTypeAndValue>>,
    raw: Vec<u8>,
}

impl Name {
    /// Decode the next `Name` from `dec`, capturing its DER bytes.
    pub fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        let raw = dec.read_raw_tlv(tags::SEQUENCE).map_err(asn1_err)?;
        Self::from_der(raw)
    }

    /// Decode a complete DER `Name`.
    pub fn from_der(raw: &[u8]) -> Result<Self, PkiError> {
        let mut outer = Decoder::new(raw);
        let mut name_dec = outer.read_sequence().map_err(asn1_err)?;
        outer.finish().map_err(asn1_err)?;

        let mut rdns = Vec::new();
        while !name_dec.is_empty() {
            let mut rdn_dec = name_dec.read_set().map_err(asn1_err)?;
            let mut rdn = Vec::new();
            while !rdn_dec.is_empty() {
                let mut atv = rdn_dec.read_sequence().map_err(asn1_err)?;
                let oid = Oid::from_der_value(atv.read_oid().map_err(asn1_err)?)
                    .map_err(asn1_err)?;
                let value = atv.read_tlv().map_err(asn1_err)?;
                atv.finish().map_err(asn1_err)?;
                rdn.push(AttributeTypeAndValue {
                    oid,
                    value_tag: value.tag,
                    value: value.value.to_vec(),
                    raw_value: value.raw.to_vec(),
                });
            }
            if rdn.is_empty() {
                return Err(PkiError::Asn1Error("empty relative distinguished name".into()));
            }
            rdns.push(rdn);
        }

        Ok(Name {
            rdns,
            raw: raw.to_vec(),
        })
    }

    /// The exact DER encoding this name was decoded from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// All attributes, flattened across RDNs in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdns.iter().flatten()
    }
}

impl AttributeTypeAndValue {
    /// Short attribute name for printable attribute types.
    pub fn short_name(&self) -> Option<&'static str> {
        known::oid_to_dn_short_name(&self.oid)
    }

    /// Text of the value if it is one of the directory string types.
    ///
    /// Returns `Ok(None)` for a value that is not a string at all, and a
    /// decode error for a string whose bytes violate its declared type.
    pub fn text(&self) -> Result<Option<String>, PkiError> {
        if self.value_tag.class != TagClass::Universal || self.value_tag.constructed {
            return Ok(None);
        }
        if !is_string_type(self.value_tag.number) {
            return Ok(None);
        }
        decode_string(self.value_tag.number, &self.value)
            .map(Some)
            .map_err(asn1_err)
    }

    /// `#` followed by the hex of the value TLV (RFC 4514 §2.4).
    pub fn hex_value(&self) -> String {
        format!("#{}", hex(&self.raw_value))
    }
}

fn is_string_type(number: u32) -> bool {
    [
        tags::UTF8_STRING,
        tags::NUMERIC_STRING,
        tags::PRINTABLE_STRING,
        tags::T61_STRING,
        tags::IA5_STRING,
        tags::VISIBLE_STRING,
        tags::UNIVERSAL_STRING,
        tags::BMP_STRING,
    ]
    .iter()
    .any(|&t| t as u32 == number)
}

/// Render a name as `SHORT=value` pairs joined by `,` in encoding order,
/// with multi-valued RDN members joined by `+`.
pub fn format_name(name: &Name) -> Result<String, PkiError> {
    let mut out = String::new();
    for (i, rdn) in name.rdns.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        for (j, atv) in rdn.iter().enumerate() {
            if j > 0 {
                out.push('+');
            }
            out.push_str(&format_attribute(atv)?);
        }
    }
    Ok(out)
}

fn format_attribute(atv: &AttributeTypeAndValue) -> Result<String, PkiError> {
    let Some(short) = atv.short_name() else {
        return Ok(format!("{}={}", atv.oid, atv.hex_value()));
    };
    match atv.text()? {
        Some(text) => Ok(format!("{short}={}", escape_value(&text))),
        None => Ok(format!("{short}={}", atv.hex_value())),
    }
}

/// Escape an attribute value per RFC 4514 §2.4.
pub fn escape_value(value: &str) -> String {
    let count = value.chars().count();
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '#' if i == 0 => out.push_str("\\#"),
            ' ' if i == 0 || i + 1 == count => out.push_str("\\ "),
            '\0' => out.push_str("\\00"),
            _ => out.push(c),
        }
    }
    out
}

/// Value of the `index`-th (0-based) attribute of type `oid`.
///
/// `raw` asks for the `#hex` form of the value TLV; that form is also used
/// for attribute types without a printable short name.
pub fn dn_by_oid(name: &Name, oid: &Oid, index: usize, raw: bool) -> Result<String, PkiError> {
    let atv = name
        .attributes()
        .filter(|atv| atv.oid == *oid)
        .nth(index)
        .ok_or(PkiError::DataNotAvailable)?;
    if raw || atv.short_name().is_none() {
        return Ok(atv.hex_value());
    }
    Ok(atv.text()?.unwrap_or_else(|| atv.hex_value()))
}

/// Dotted OID of the `index`-th attribute, counted across all RDNs.
pub fn dn_oid(name: &Name, index: usize) -> Result<String, PkiError> {
    name.attributes()
        .nth(index)
        .map(|atv| atv.oid.to_dot_string())
        .ok_or(PkiError::DataNotAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crlkit_utils::asn1::Encoder;

    fn atv(enc: &mut Encoder, oid: &Oid, tag: u8, value: &[u8]) {
        enc.write_nested(tags::SEQUENCE, |a| {
            a.write_oid(&oid.to_der_value());
            a.write_tlv(tag, value);
        });
    }

    type Attr = (Oid, u8, Vec<u8>);

    fn attr(oid: Oid, tag: u8, value: &[u8]) -> Attr {
        (oid, tag, value.to_vec())
    }

    fn build_name(rdns: &[Vec<Attr>]) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_nested(tags::SEQUENCE, |name| {
            for rdn in rdns {
                name.write_nested(tags::SET, |set| {
                    for (oid, tag, value) in rdn {
                        atv(set, oid, *tag, value);
                    }
                });
            }
        });
        enc.finish()
    }

    #[test]
    fn test_format_simple_name() {
        let der = build_name(&[
            vec![attr(known::country_name(), tags::PRINTABLE_STRING, b"US")],
            vec![attr(known::organization_name(), tags::UTF8_STRING, b"Example Org")],
            vec![attr(known::common_name(), tags::UTF8_STRING, b"Example CRL CA")],
        ]);
        let name = Name::from_der(&der).unwrap();
        assert_eq!(name.raw(), &der[..]);
        assert_eq!(
            format_name(&name).unwrap(),
            "C=US,O=Example Org,CN=Example CRL CA"
        );
    }

    #[test]
    fn test_multi_valued_rdn() {
        let der = build_name(&[vec![
            attr(known::common_name(), tags::UTF8_STRING, b"alice"),
            attr(known::organizational_unit_name(), tags::UTF8_STRING, b"ops"),
        ]]);
        let name = Name::from_der(&der).unwrap();
        assert_eq!(format_name(&name).unwrap(), "CN=alice+OU=ops");
        assert_eq!(dn_oid(&name, 1).unwrap(), "2.5.4.11");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_value("a,b+c"), "a\\,b\\+c");
        assert_eq!(escape_value("#lead"), "\\#lead");
        assert_eq!(escape_value(" pad "), "\\ pad\\ ");
        assert_eq!(escape_value("in#side"), "in#side");
        assert_eq!(escape_value("q\"<>;\\"), "q\\\"\\<\\>\\;\\\\");
    }

    #[test]
    fn test_unknown_attribute_rendered_as_hex() {
        let unknown = Oid::new(&[1, 2, 3, 4]);
        let der = build_name(&[vec![attr(unknown.clone(), tags::UTF8_STRING, b"hi")]]);
        let name = Name::from_der(&der).unwrap();
        assert_eq!(format_name(&name).unwrap(), "1.2.3.4=#0c026869");
        // unknown types always come back in raw form
        assert_eq!(dn_by_oid(&name, &unknown, 0, false).unwrap(), "#0c026869");
    }

    #[test]
    fn test_dn_by_oid_occurrences() {
        let der = build_name(&[
            vec![attr(known::organizational_unit_name(), tags::UTF8_STRING, b"first")],
            vec![attr(known::common_name(), tags::UTF8_STRING, b"cn")],
            vec![attr(known::organizational_unit_name(), tags::UTF8_STRING, b"second")],
        ]);
        let name = Name::from_der(&der).unwrap();
        let ou = known::organizational_unit_name();
        assert_eq!(dn_by_oid(&name, &ou, 0, false).unwrap(), "first");
        assert_eq!(dn_by_oid(&name, &ou, 1, false).unwrap(), "second");
        assert!(matches!(
            dn_by_oid(&name, &ou, 2, false),
            Err(PkiError::DataNotAvailable)
        ));
        assert_eq!(
            dn_by_oid(&name, &known::common_name(), 0, true).unwrap(),
            "#0c02636e"
        );
    }

    #[test]
    fn test_dn_oid_past_end() {
        let der = build_name(&[vec![attr(known::common_name(), tags::UTF8_STRING, b"x")]]);
        let name = Name::from_der(&der).unwrap();
        assert_eq!(dn_oid(&name, 0).unwrap(), "2.5.4.3");
        assert!(matches!(dn_oid(&name, 1), Err(PkiError::DataNotAvailable)));
    }

    #[test]
    fn test_non_ascii_printable_is_decode_error() {
        let der = build_name(&[vec![attr(
            known::common_name(),
            tags::PRINTABLE_STRING,
            &[0xC3, 0xA9],
        )]]);
        let name = Name::from_der(&der).unwrap();
        let err = format_name(&name).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_bmp_string_value() {
        let der = build_name(&[vec![attr(
            known::common_name(),
            tags::BMP_STRING,
            &[0x00, 0x4A, 0x00, 0xE9],
        )]]);
        let name = Name::from_der(&der).unwrap();
        assert_eq!(format_name(&name).unwrap(), "CN=Jé");
    }

    #[test]
    fn test_empty_rdn_rejected() {
        // SEQUENCE { SET {} }
        let der = [0x30, 0x02, 0x31, 0x00];
        assert!(Name::from_der(&der).is_err());
    }

    #[test]
    fn test_empty_name() {
        let name = Name::from_der(&[0x30, 0x00]).unwrap();
        assert_eq!(format_name(&name).unwrap(), "");
        assert!(matches!(dn_oid(&name, 0), Err(PkiError::DataNotAvailable)));
    }
}
