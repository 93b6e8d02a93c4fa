//! CRL extensions (RFC 5280 §5.2) and CRL entry extensions (§5.3).

use crlkit_types::{Fill, PkiError};
use crlkit_utils::asn1::{decode_string, tags, Decoder, Encoder, TagClass, Tlv};
use crlkit_utils::oid::{known, Oid};

use super::crl::{CertificateRevocationList, RevokedEntry};
use super::dn::{format_name, Name};
use super::asn1_err;

// ---------------------------------------------------------------------------
// Extension types
// ---------------------------------------------------------------------------

/// One `Extension` as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub oid: Oid,
    /// `None` when the DEFAULT FALSE field was omitted.
    critical: Option<bool>,
    /// Contents of the `extnValue` OCTET STRING.
    pub value: Vec<u8>,
}

/// Extension types this crate knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    AuthorityKeyIdentifier,
    CrlNumber,
    DeltaCrlIndicator,
    CrlReason,
    InvalidityDate,
    CertificateIssuer,
    Other,
}

/// A decoded CRL-level extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrlExtension {
    AuthorityKeyIdentifier(AuthorityKeyIdentifier),
    /// Big-endian INTEGER contents.
    CrlNumber(Vec<u8>),
    /// Big-endian INTEGER contents of the base CRL number.
    DeltaCrlIndicator(Vec<u8>),
    Opaque { oid: Oid, value: Vec<u8> },
}

/// Parsed Authority Key Identifier extension (RFC 5280 §4.2.1.1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Option<Vec<u8>>,
    pub authority_cert_issuer: Vec<GeneralName>,
    pub authority_cert_serial: Option<Vec<u8>>,
}

/// A GeneralName value (RFC 5280 §4.2.1.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    Rfc822Name(String),
    DnsName(String),
    /// Rendered with the same rules as the issuer DN.
    DirectoryName(String),
    Uri(String),
    IpAddress(Vec<u8>),
    /// Dotted OID.
    RegisteredId(String),
    /// otherName, x400Address, ediPartyName: kept as the raw TLV.
    Other { tag: u32, value: Vec<u8> },
}

/// The issuer-name-and-serial form of an Authority Key Identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityKeyGnSerial {
    pub name: GeneralName,
    pub serial: Vec<u8>,
    pub critical: bool,
}

/// CRL revocation reason codes (RFC 5280 §5.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RevocationReason {
    Unspecified = 0,
    KeyCompromise = 1,
    CaCompromise = 2,
    AffiliationChanged = 3,
    Superseded = 4,
    CessationOfOperation = 5,
    CertificateHold = 6,
    // 7 is not used
    RemoveFromCrl = 8,
    PrivilegeWithdrawn = 9,
    AaCompromise = 10,
}

/// A revoked certificate entry with its entry extensions interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedCertificate {
    /// Certificate serial number.
    pub serial_number: Vec<u8>,
    /// Revocation date (UNIX timestamp).
    pub revocation_date: i64,
    /// Revocation reason (from CRLReason extension).
    pub reason: Option<RevocationReason>,
    /// Invalidity date (from InvalidityDate extension).
    pub invalidity_date: Option<i64>,
    /// Raw `GeneralNames` of the Certificate Issuer extension.
    pub certificate_issuer: Option<Vec<u8>>,
    /// Entry-level extensions.
    pub extensions: Vec<Extension>,
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

impl Extension {
    pub fn new(oid: Oid, critical: bool, value: Vec<u8>) -> Self {
        Self {
            oid,
            critical: critical.then_some(true),
            value,
        }
    }

    /// Whether the extension is marked critical.
    pub fn critical(&self) -> bool {
        self.critical == Some(true)
    }

    pub fn kind(&self) -> ExtensionKind {
        ExtensionKind::from_oid(&self.oid)
    }

    /// `Extension ::= SEQUENCE { extnID, critical BOOLEAN DEFAULT FALSE, extnValue }`
    pub(crate) fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        let mut ext_dec = dec.read_sequence().map_err(asn1_err)?;
        let oid = Oid::from_der_value(ext_dec.read_oid().map_err(asn1_err)?).map_err(asn1_err)?;
        let critical = if ext_dec.next_is(tags::BOOLEAN) {
            Some(ext_dec.read_boolean().map_err(asn1_err)?)
        } else {
            None
        };
        let value = ext_dec.read_octet_string().map_err(asn1_err)?.to_vec();
        ext_dec.finish().map_err(asn1_err)?;
        Ok(Extension {
            oid,
            critical,
            value,
        })
    }

    pub(crate) fn encode(&self, enc: &mut Encoder) {
        enc.write_nested(tags::SEQUENCE, |e| {
            e.write_oid(&self.oid.to_der_value());
            if let Some(critical) = self.critical {
                e.write_boolean(critical);
            }
            e.write_octet_string(&self.value);
        });
    }
}

/// Decode `Extensions ::= SEQUENCE OF Extension`.
pub(crate) fn decode_extensions(dec: &mut Decoder) -> Result<Vec<Extension>, PkiError> {
    let mut seq = dec.read_sequence().map_err(asn1_err)?;
    let mut extensions = Vec::new();
    while !seq.is_empty() {
        extensions.push(Extension::decode(&mut seq)?);
    }
    Ok(extensions)
}

pub(crate) fn encode_extensions(extensions: &[Extension], enc: &mut Encoder) {
    enc.write_nested(tags::SEQUENCE, |seq| {
        for ext in extensions {
            ext.encode(seq);
        }
    });
}

impl ExtensionKind {
    pub fn from_oid(oid: &Oid) -> Self {
        if *oid == known::authority_key_identifier() {
            ExtensionKind::AuthorityKeyIdentifier
        } else if *oid == known::crl_number() {
            ExtensionKind::CrlNumber
        } else if *oid == known::delta_crl_indicator() {
            ExtensionKind::DeltaCrlIndicator
        } else if *oid == known::crl_reason() {
            ExtensionKind::CrlReason
        } else if *oid == known::invalidity_date() {
            ExtensionKind::InvalidityDate
        } else if *oid == known::certificate_issuer() {
            ExtensionKind::CertificateIssuer
        } else {
            ExtensionKind::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Extension value parsing
// ---------------------------------------------------------------------------

impl CrlExtension {
    /// Interpret a CRL-level extension. Types without a dedicated variant
    /// come back as `Opaque`.
    pub fn decode(ext: &Extension) -> Result<Self, PkiError> {
        match ext.kind() {
            ExtensionKind::AuthorityKeyIdentifier => {
                AuthorityKeyIdentifier::from_der(&ext.value).map(Self::AuthorityKeyIdentifier)
            }
            ExtensionKind::CrlNumber => parse_integer_value(&ext.value).map(Self::CrlNumber),
            ExtensionKind::DeltaCrlIndicator => {
                parse_integer_value(&ext.value).map(Self::DeltaCrlIndicator)
            }
            _ => Ok(Self::Opaque {
                oid: ext.oid.clone(),
                value: ext.value.clone(),
            }),
        }
    }
}

impl AuthorityKeyIdentifier {
    /// Parse the extension value.
    ///
    /// ```text
    /// AuthorityKeyIdentifier ::= SEQUENCE {
    ///     keyIdentifier             [0] KeyIdentifier           OPTIONAL,
    ///     authorityCertIssuer       [1] GeneralNames            OPTIONAL,
    ///     authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL }
    /// ```
    pub fn from_der(value: &[u8]) -> Result<Self, PkiError> {
        if value.is_empty() {
            return Err(PkiError::DataNotAvailable);
        }
        let mut outer = Decoder::new(value);
        let mut dec = outer.read_sequence().map_err(asn1_err)?;
        outer.finish().map_err(asn1_err)?;

        let key_identifier = dec
            .try_read_context_specific(0, false)
            .map_err(asn1_err)?
            .map(|tlv| tlv.value.to_vec());

        let mut authority_cert_issuer = Vec::new();
        if let Some(names) = dec.try_read_context_specific(1, true).map_err(asn1_err)? {
            let mut names_dec = Decoder::new(names.value);
            while !names_dec.is_empty() {
                let tlv = names_dec.read_tlv().map_err(asn1_err)?;
                authority_cert_issuer.push(GeneralName::from_tlv(&tlv)?);
            }
        }

        let authority_cert_serial = dec
            .try_read_context_specific(2, false)
            .map_err(asn1_err)?
            .map(|tlv| tlv.value.to_vec());
        dec.finish().map_err(asn1_err)?;

        Ok(AuthorityKeyIdentifier {
            key_identifier,
            authority_cert_issuer,
            authority_cert_serial,
        })
    }
}

impl GeneralName {
    /// Parse a GeneralName from a context-tagged TLV.
    /// GeneralName ::= CHOICE {
    ///   otherName       [0], rfc822Name [1] IA5String, dNSName [2] IA5String,
    ///   x400Address     [3], directoryName [4] EXPLICIT Name,
    ///   ediPartyName    [5], uniformResourceIdentifier [6] IA5String,
    ///   iPAddress       [7] OCTET STRING, registeredID [8] OID
    /// }
    pub(crate) fn from_tlv(tlv: &Tlv) -> Result<Self, PkiError> {
        if tlv.tag.class != TagClass::ContextSpecific {
            return Err(PkiError::Asn1Error(format!(
                "GeneralName with non-context tag 0x{:02x}",
                tlv.tag.first_octet()
            )));
        }
        let ia5 = |value: &[u8]| {
            decode_string(tags::IA5_STRING as u32, value).map_err(asn1_err)
        };
        match (tlv.tag.number, tlv.tag.constructed) {
            (1, false) => ia5(tlv.value).map(GeneralName::Rfc822Name),
            (2, false) => ia5(tlv.value).map(GeneralName::DnsName),
            (4, true) => {
                let name = Name::from_der(tlv.value)?;
                format_name(&name).map(GeneralName::DirectoryName)
            }
            (6, false) => ia5(tlv.value).map(GeneralName::Uri),
            (7, false) => Ok(GeneralName::IpAddress(tlv.value.to_vec())),
            (8, false) => Oid::from_der_value(tlv.value)
                .map(|oid| GeneralName::RegisteredId(oid.to_dot_string()))
                .map_err(asn1_err),
            (tag, _) => Ok(GeneralName::Other {
                tag,
                value: tlv.raw.to_vec(),
            }),
        }
    }
}

impl RevocationReason {
    /// Parse a reason code from an integer value.
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Unspecified),
            1 => Some(Self::KeyCompromise),
            2 => Some(Self::CaCompromise),
            3 => Some(Self::AffiliationChanged),
            4 => Some(Self::Superseded),
            5 => Some(Self::CessationOfOperation),
            6 => Some(Self::CertificateHold),
            8 => Some(Self::RemoveFromCrl),
            9 => Some(Self::PrivilegeWithdrawn),
            10 => Some(Self::AaCompromise),
            _ => None,
        }
    }

    /// Display text used by `openssl crl -text`.
    pub fn description(self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::KeyCompromise => "Key Compromise",
            Self::CaCompromise => "CA Compromise",
            Self::AffiliationChanged => "Affiliation Changed",
            Self::Superseded => "Superseded",
            Self::CessationOfOperation => "Cessation Of Operation",
            Self::CertificateHold => "Certificate Hold",
            Self::RemoveFromCrl => "Remove From CRL",
            Self::PrivilegeWithdrawn => "Privilege Withdrawn",
            Self::AaCompromise => "AA Compromise",
        }
    }
}

impl RevokedCertificate {
    pub(crate) fn from_entry(entry: &RevokedEntry) -> Result<Self, PkiError> {
        let extensions = entry.extensions.clone().unwrap_or_default();
        let mut reason = None;
        let mut invalidity_date = None;
        let mut certificate_issuer = None;
        for ext in &extensions {
            match ext.kind() {
                ExtensionKind::CrlReason => reason = Some(parse_reason_code(&ext.value)?),
                ExtensionKind::InvalidityDate => {
                    invalidity_date = Some(parse_invalidity_date(&ext.value)?)
                }
                ExtensionKind::CertificateIssuer => certificate_issuer = Some(ext.value.clone()),
                _ => {}
            }
        }
        Ok(RevokedCertificate {
            serial_number: entry.serial.clone(),
            revocation_date: entry.revocation_date.timestamp,
            reason,
            invalidity_date,
            certificate_issuer,
            extensions,
        })
    }
}

/// Parse an extension value that is a single INTEGER.
fn parse_integer_value(value: &[u8]) -> Result<Vec<u8>, PkiError> {
    let mut dec = Decoder::new(value);
    let int = dec.read_integer().map_err(asn1_err)?.to_vec();
    dec.finish().map_err(asn1_err)?;
    Ok(int)
}

/// Parse a CRLReason extension value (ENUMERATED).
fn parse_reason_code(value: &[u8]) -> Result<RevocationReason, PkiError> {
    let mut dec = Decoder::new(value);
    let code = dec.read_enumerated().map_err(asn1_err)?;
    dec.finish().map_err(asn1_err)?;
    RevocationReason::from_u8(code)
        .ok_or_else(|| PkiError::InvalidCrl(format!("unknown reason code: {code}")))
}

/// Parse an InvalidityDate extension value (GeneralizedTime).
fn parse_invalidity_date(value: &[u8]) -> Result<i64, PkiError> {
    let mut dec = Decoder::new(value);
    let time = dec.read_time().map_err(asn1_err)?;
    dec.finish().map_err(asn1_err)?;
    Ok(time)
}

// ---------------------------------------------------------------------------
// CertificateRevocationList extension accessors
// ---------------------------------------------------------------------------

impl CertificateRevocationList {
    /// CRL-level extensions in encoding order (empty when absent).
    pub fn extensions(&self) -> Result<&[Extension], PkiError> {
        Ok(self.tree()?.tbs.extensions.as_deref().unwrap_or_default())
    }

    fn extension_at(&self, index: usize) -> Result<&Extension, PkiError> {
        self.extensions()?
            .get(index)
            .ok_or(PkiError::DataNotAvailable)
    }

    fn find_extension(&self, oid: &Oid, occurrence: usize) -> Result<&Extension, PkiError> {
        self.extensions()?
            .iter()
            .filter(|ext| ext.oid == *oid)
            .nth(occurrence)
            .ok_or(PkiError::DataNotAvailable)
    }

    /// Value and critical flag of the `occurrence`-th extension with `oid`.
    pub fn extension(&self, oid: &Oid, occurrence: usize) -> Result<(Vec<u8>, bool), PkiError> {
        let ext = self.find_extension(oid, occurrence)?;
        Ok((ext.value.clone(), ext.critical()))
    }

    pub fn extension_into(
        &self,
        oid: &Oid,
        occurrence: usize,
        out: &mut [u8],
    ) -> Result<(Fill, bool), PkiError> {
        let ext = self.find_extension(oid, occurrence)?;
        Ok((Fill::copy(&ext.value, out), ext.critical()))
    }

    /// Dotted OID of the extension at `index`.
    pub fn extension_oid(&self, index: usize) -> Result<String, PkiError> {
        Ok(self.extension_at(index)?.oid.to_dot_string())
    }

    pub fn extension_oid_into(&self, index: usize, out: &mut [u8]) -> Result<Fill, PkiError> {
        let oid = self.extension_oid(index)?;
        Ok(Fill::copy(oid.as_bytes(), out))
    }

    /// Dotted OID and critical flag of the extension at `index`.
    pub fn extension_info(&self, index: usize) -> Result<(String, bool), PkiError> {
        let ext = self.extension_at(index)?;
        Ok((ext.oid.to_dot_string(), ext.critical()))
    }

    /// `extnValue` contents of the extension at `index`.
    pub fn extension_data(&self, index: usize) -> Result<Vec<u8>, PkiError> {
        Ok(self.extension_at(index)?.value.clone())
    }

    pub fn extension_data_into(&self, index: usize, out: &mut [u8]) -> Result<Fill, PkiError> {
        let ext = self.extension_at(index)?;
        Ok(Fill::copy(&ext.value, out))
    }

    /// Every CRL-level extension, interpreted.
    pub fn typed_extensions(&self) -> Result<Vec<CrlExtension>, PkiError> {
        self.extensions()?.iter().map(CrlExtension::decode).collect()
    }

    fn authority_key_identifier(&self) -> Result<(AuthorityKeyIdentifier, bool), PkiError> {
        let ext = self.find_extension(&known::authority_key_identifier(), 0)?;
        Ok((AuthorityKeyIdentifier::from_der(&ext.value)?, ext.critical()))
    }

    /// The `keyIdentifier` of the Authority Key Identifier extension.
    ///
    /// An extension that only carries the issuer-name-and-serial form is
    /// reported as `UnsupportedExtension`.
    pub fn authority_key_id(&self) -> Result<(Vec<u8>, bool), PkiError> {
        let (aki, critical) = self.authority_key_identifier()?;
        let key_id = aki.key_identifier.ok_or_else(|| {
            PkiError::UnsupportedExtension("authority key identifier has no keyIdentifier".into())
        })?;
        Ok((key_id, critical))
    }

    pub fn authority_key_id_into(&self, out: &mut [u8]) -> Result<(Fill, bool), PkiError> {
        let (key_id, critical) = self.authority_key_id()?;
        Ok((Fill::copy(&key_id, out), critical))
    }

    /// The `seq`-th authority issuer name together with the authority
    /// serial number.
    pub fn authority_key_gn_serial(&self, seq: usize) -> Result<AuthorityKeyGnSerial, PkiError> {
        let (aki, critical) = self.authority_key_identifier()?;
        let serial = aki
            .authority_cert_serial
            .ok_or(PkiError::DataNotAvailable)?;
        let name = aki
            .authority_cert_issuer
            .into_iter()
            .nth(seq)
            .ok_or(PkiError::DataNotAvailable)?;
        Ok(AuthorityKeyGnSerial {
            name,
            serial,
            critical,
        })
    }

    /// INTEGER contents of the CRL Number extension.
    pub fn number(&self) -> Result<(Vec<u8>, bool), PkiError> {
        let ext = self.find_extension(&known::crl_number(), 0)?;
        if ext.value.is_empty() {
            return Err(PkiError::DataNotAvailable);
        }
        Ok((parse_integer_value(&ext.value)?, ext.critical()))
    }

    pub fn number_into(&self, out: &mut [u8]) -> Result<(Fill, bool), PkiError> {
        let (number, critical) = self.number()?;
        Ok((Fill::copy(&number, out), critical))
    }

    /// INTEGER contents of the Delta CRL Indicator extension.
    pub fn delta_crl_indicator(&self) -> Result<(Vec<u8>, bool), PkiError> {
        let ext = self.find_extension(&known::delta_crl_indicator(), 0)?;
        if ext.value.is_empty() {
            return Err(PkiError::DataNotAvailable);
        }
        Ok((parse_integer_value(&ext.value)?, ext.critical()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aki_value(key_id: Option<&[u8]>, names: &[Vec<u8>], serial: Option<&[u8]>) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_nested(tags::SEQUENCE, |seq| {
            if let Some(key_id) = key_id {
                seq.write_context_specific(0, false, key_id);
            }
            if !names.is_empty() {
                let body: Vec<u8> = names.concat();
                seq.write_context_specific(1, true, &body);
            }
            if let Some(serial) = serial {
                seq.write_context_specific(2, false, serial);
            }
        });
        enc.finish()
    }

    fn dns_name(name: &str) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_context_specific(2, false, name.as_bytes());
        enc.finish()
    }

    #[test]
    fn test_extension_decode_critical_forms() {
        // critical omitted
        let mut enc = Encoder::new();
        Extension::new(known::crl_number(), false, vec![0x02, 0x01, 0x07]).encode(&mut enc);
        let der = enc.finish();
        assert_eq!(der, &[0x30, 0x0A, 0x06, 0x03, 0x55, 0x1D, 0x14, 0x04, 0x03, 0x02, 0x01, 0x07]);
        let ext = Extension::decode(&mut Decoder::new(&der)).unwrap();
        assert!(!ext.critical());
        assert_eq!(ext.kind(), ExtensionKind::CrlNumber);

        // critical TRUE
        let mut enc = Encoder::new();
        Extension::new(known::crl_number(), true, vec![0x02, 0x01, 0x07]).encode(&mut enc);
        let der = enc.finish();
        let ext = Extension::decode(&mut Decoder::new(&der)).unwrap();
        assert!(ext.critical());

        // explicit FALSE survives a re-encode
        let mut enc = Encoder::new();
        enc.write_nested(tags::SEQUENCE, |e| {
            e.write_oid(&known::crl_number().to_der_value());
            e.write_boolean(false);
            e.write_octet_string(&[0x02, 0x01, 0x07]);
        });
        let der = enc.finish();
        let ext = Extension::decode(&mut Decoder::new(&der)).unwrap();
        assert!(!ext.critical());
        let mut enc = Encoder::new();
        ext.encode(&mut enc);
        assert_eq!(enc.finish(), der);
    }

    #[test]
    fn test_extension_rejects_non_der_boolean() {
        let der = [
            0x30, 0x0D, 0x06, 0x03, 0x55, 0x1D, 0x14, 0x01, 0x01, 0x01, 0x04, 0x03, 0x02, 0x01,
            0x07,
        ];
        assert!(Extension::decode(&mut Decoder::new(&der)).is_err());
    }

    #[test]
    fn test_aki_key_id_only() {
        let value = aki_value(Some(&[0xAA, 0xBB]), &[], None);
        let aki = AuthorityKeyIdentifier::from_der(&value).unwrap();
        assert_eq!(aki.key_identifier, Some(vec![0xAA, 0xBB]));
        assert!(aki.authority_cert_issuer.is_empty());
        assert_eq!(aki.authority_cert_serial, None);
    }

    #[test]
    fn test_aki_name_and_serial() {
        let value = aki_value(
            None,
            &[dns_name("ca.example"), dns_name("backup.example")],
            Some(&[0x01, 0x02]),
        );
        let aki = AuthorityKeyIdentifier::from_der(&value).unwrap();
        assert_eq!(aki.key_identifier, None);
        assert_eq!(
            aki.authority_cert_issuer,
            vec![
                GeneralName::DnsName("ca.example".into()),
                GeneralName::DnsName("backup.example".into())
            ]
        );
        assert_eq!(aki.authority_cert_serial, Some(vec![0x01, 0x02]));
    }

    #[test]
    fn test_aki_empty_value_not_available() {
        assert!(matches!(
            AuthorityKeyIdentifier::from_der(&[]),
            Err(PkiError::DataNotAvailable)
        ));
    }

    #[test]
    fn test_aki_out_of_order_fields_rejected() {
        // [2] before [0]
        let mut enc = Encoder::new();
        enc.write_nested(tags::SEQUENCE, |seq| {
            seq.write_context_specific(2, false, &[0x01]);
            seq.write_context_specific(0, false, &[0xAA]);
        });
        assert!(AuthorityKeyIdentifier::from_der(&enc.finish()).is_err());
    }

    #[test]
    fn test_general_name_variants() {
        let mut dir = Encoder::new();
        dir.write_nested(tags::SEQUENCE, |name| {
            name.write_nested(tags::SET, |set| {
                set.write_nested(tags::SEQUENCE, |atv| {
                    atv.write_oid(&known::common_name().to_der_value());
                    atv.write_utf8_string("Root");
                });
            });
        });
        let dir_name = dir.finish();
        let mut enc = Encoder::new();
        enc.write_context_specific(4, true, &dir_name);
        let der = enc.finish();
        let tlv = Decoder::new(&der).read_tlv().unwrap();
        assert_eq!(
            GeneralName::from_tlv(&tlv).unwrap(),
            GeneralName::DirectoryName("CN=Root".into())
        );

        let der = [0x87, 0x04, 192, 0, 2, 1];
        let tlv = Decoder::new(&der).read_tlv().unwrap();
        assert_eq!(
            GeneralName::from_tlv(&tlv).unwrap(),
            GeneralName::IpAddress(vec![192, 0, 2, 1])
        );

        let der = [0x88, 0x03, 0x55, 0x1D, 0x14];
        let tlv = Decoder::new(&der).read_tlv().unwrap();
        assert_eq!(
            GeneralName::from_tlv(&tlv).unwrap(),
            GeneralName::RegisteredId("2.5.29.20".into())
        );

        // x400Address is kept raw
        let der = [0xA3, 0x02, 0x05, 0x00];
        let tlv = Decoder::new(&der).read_tlv().unwrap();
        assert_eq!(
            GeneralName::from_tlv(&tlv).unwrap(),
            GeneralName::Other {
                tag: 3,
                value: der.to_vec()
            }
        );

        // universal tags are not GeneralNames
        let der = [0x16, 0x01, b'x'];
        let tlv = Decoder::new(&der).read_tlv().unwrap();
        assert!(GeneralName::from_tlv(&tlv).is_err());
    }

    #[test]
    fn test_crl_extension_decode() {
        let number = Extension::new(known::crl_number(), false, vec![0x02, 0x02, 0x01, 0x00]);
        assert_eq!(
            CrlExtension::decode(&number).unwrap(),
            CrlExtension::CrlNumber(vec![0x01, 0x00])
        );
        let delta = Extension::new(known::delta_crl_indicator(), true, vec![0x02, 0x01, 0x05]);
        assert_eq!(
            CrlExtension::decode(&delta).unwrap(),
            CrlExtension::DeltaCrlIndicator(vec![0x05])
        );
        let idp = Extension::new(known::issuing_distribution_point(), true, vec![0x30, 0x00]);
        assert_eq!(
            CrlExtension::decode(&idp).unwrap(),
            CrlExtension::Opaque {
                oid: known::issuing_distribution_point(),
                value: vec![0x30, 0x00]
            }
        );
        // trailing bytes after the INTEGER
        let bad = Extension::new(known::crl_number(), false, vec![0x02, 0x01, 0x05, 0x00]);
        assert!(CrlExtension::decode(&bad).is_err());
    }

    #[test]
    fn test_revocation_reason_from_u8() {
        assert_eq!(
            RevocationReason::from_u8(1),
            Some(RevocationReason::KeyCompromise)
        );
        assert_eq!(
            RevocationReason::from_u8(10),
            Some(RevocationReason::AaCompromise)
        );
        // 7 is not used
        assert_eq!(RevocationReason::from_u8(7), None);
        assert_eq!(RevocationReason::from_u8(11), None);
        assert_eq!(RevocationReason::Superseded.description(), "Superseded");
    }

    #[test]
    fn test_parse_reason_and_invalidity_values() {
        assert_eq!(
            parse_reason_code(&[0x0A, 0x01, 0x04]).unwrap(),
            RevocationReason::Superseded
        );
        assert!(parse_reason_code(&[0x0A, 0x01, 0x07]).is_err());
        // INTEGER is not ENUMERATED
        assert!(parse_reason_code(&[0x02, 0x01, 0x01]).is_err());

        let mut enc = Encoder::new();
        enc.write_generalized_time(1_792_117_407);
        assert_eq!(parse_invalidity_date(&enc.finish()).unwrap(), 1_792_117_407);
    }
}
