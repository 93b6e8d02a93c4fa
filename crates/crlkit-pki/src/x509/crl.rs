//! X.509 Certificate Revocation List (CRL) object (RFC 5280 §5).

use crlkit_types::{EncodingFormat, Fill, PkiError, SignAlgorithm};
use crlkit_utils::asn1::{tags, Decoder, Encoder, Time};
use crlkit_utils::oid::Oid;
use tracing::debug;

use super::dn::{dn_by_oid, dn_oid, format_name, Name};
use super::extensions::{decode_extensions, encode_extensions, Extension, RevokedCertificate};
use super::{asn1_err, pem_err, PEM_CRL_LABEL};
use crate::oid_mapping::oid_to_sign_algorithm;

// ---------------------------------------------------------------------------
// Decoded tree
// ---------------------------------------------------------------------------

/// `CertificateList`: the decoded form of one CRL.
///
/// Every node keeps enough of its wire form to re-encode to the exact DER
/// it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertList {
    pub tbs: TbsCertList,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
}

/// `TBSCertList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertList {
    /// INTEGER contents of the version field, when present.
    pub version: Option<Vec<u8>>,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub this_update: CrlTime,
    pub next_update: Option<CrlTime>,
    /// `None` when the field is absent; `Some(vec![])` for an encoded empty
    /// SEQUENCE.
    pub revoked: Option<Vec<RevokedEntry>>,
    /// Contents of `[0] EXPLICIT Extensions`.
    pub extensions: Option<Vec<Extension>>,
}

/// `AlgorithmIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub oid: Oid,
    /// The parameters TLV as encoded (e.g. `05 00`).
    pub params: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    pub unused_bits: u8,
    pub data: Vec<u8>,
}

/// A `Time` value with its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlTime {
    pub generalized: bool,
    pub text: Vec<u8>,
    /// Seconds since the UNIX epoch.
    pub timestamp: i64,
}

/// One element of `revokedCertificates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedEntry {
    /// `userCertificate` INTEGER contents.
    pub serial: Vec<u8>,
    pub revocation_date: CrlTime,
    pub extensions: Option<Vec<Extension>>,
}

impl From<Time<'_>> for CrlTime {
    fn from(time: Time<'_>) -> Self {
        CrlTime {
            generalized: time.generalized,
            text: time.text.to_vec(),
            timestamp: time.timestamp,
        }
    }
}

impl CrlTime {
    fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        dec.read_time_value().map(CrlTime::from).map_err(asn1_err)
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.write_time_text(self.generalized, &self.text);
    }
}

impl AlgorithmIdentifier {
    fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        let mut seq = dec.read_sequence().map_err(asn1_err)?;
        let oid = Oid::from_der_value(seq.read_oid().map_err(asn1_err)?).map_err(asn1_err)?;
        let params = if seq.is_empty() {
            None
        } else {
            Some(seq.read_tlv().map_err(asn1_err)?.raw.to_vec())
        };
        seq.finish().map_err(asn1_err)?;
        Ok(AlgorithmIdentifier { oid, params })
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.write_nested(tags::SEQUENCE, |e| {
            e.write_oid(&self.oid.to_der_value());
            if let Some(params) = &self.params {
                e.write_raw(params);
            }
        });
    }
}

impl RevokedEntry {
    fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        let mut entry_dec = dec.read_sequence().map_err(asn1_err)?;
        let serial = entry_dec.read_integer().map_err(asn1_err)?.to_vec();
        let revocation_date = CrlTime::decode(&mut entry_dec)?;
        let extensions = if entry_dec.is_empty() {
            None
        } else {
            Some(decode_extensions(&mut entry_dec)?)
        };
        entry_dec.finish().map_err(asn1_err)?;
        Ok(RevokedEntry {
            serial,
            revocation_date,
            extensions,
        })
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.write_nested(tags::SEQUENCE, |e| {
            e.write_integer_raw(&self.serial);
            self.revocation_date.encode(e);
            if let Some(exts) = &self.extensions {
                encode_extensions(exts, e);
            }
        });
    }
}

impl TbsCertList {
    fn decode(dec: &mut Decoder) -> Result<Self, PkiError> {
        let mut tbs = dec.read_sequence().map_err(asn1_err)?;

        // version INTEGER OPTIONAL
        let version = if tbs.next_is(tags::INTEGER) {
            let raw = tbs.read_integer().map_err(asn1_err)?.to_vec();
            version_number(&raw)?;
            Some(raw)
        } else {
            None
        };

        let signature = AlgorithmIdentifier::decode(&mut tbs)?;
        let issuer = Name::decode(&mut tbs)?;
        let this_update = CrlTime::decode(&mut tbs)?;

        let next_update = if tbs.next_is(tags::UTC_TIME) || tbs.next_is(tags::GENERALIZED_TIME) {
            Some(CrlTime::decode(&mut tbs)?)
        } else {
            None
        };

        let revoked = if tbs.next_is(tags::SEQUENCE) {
            let mut revoked_seq = tbs.read_sequence().map_err(asn1_err)?;
            let mut entries = Vec::new();
            while !revoked_seq.is_empty() {
                entries.push(RevokedEntry::decode(&mut revoked_seq)?);
            }
            Some(entries)
        } else {
            None
        };

        // crlExtensions [0] EXPLICIT Extensions OPTIONAL
        let extensions = match tbs.try_read_context_specific(0, true).map_err(asn1_err)? {
            Some(tlv) => {
                let mut explicit = Decoder::new(tlv.value);
                let exts = decode_extensions(&mut explicit)?;
                explicit.finish().map_err(asn1_err)?;
                Some(exts)
            }
            None => None,
        };

        // Anything left is an unknown or out-of-order field.
        tbs.finish().map_err(asn1_err)?;

        Ok(TbsCertList {
            version,
            signature,
            issuer,
            this_update,
            next_update,
            revoked,
            extensions,
        })
    }

    fn encode(&self, enc: &mut Encoder) {
        enc.write_nested(tags::SEQUENCE, |e| {
            if let Some(version) = &self.version {
                e.write_integer_raw(version);
            }
            self.signature.encode(e);
            e.write_raw(self.issuer.raw());
            self.this_update.encode(e);
            if let Some(next_update) = &self.next_update {
                next_update.encode(e);
            }
            if let Some(revoked) = &self.revoked {
                e.write_nested(tags::SEQUENCE, |seq| {
                    for entry in revoked {
                        entry.encode(seq);
                    }
                });
            }
            if let Some(exts) = &self.extensions {
                let mut inner = Encoder::new();
                encode_extensions(exts, &mut inner);
                e.write_context_specific(0, true, &inner.finish());
            }
        });
    }
}

impl CertList {
    /// Decode a complete DER `CertificateList`. Trailing bytes are an error.
    pub fn from_der(data: &[u8]) -> Result<Self, PkiError> {
        let mut outer = Decoder::new(data);
        let mut seq = outer.read_sequence().map_err(asn1_err)?;
        outer.finish().map_err(asn1_err)?;

        let tbs = TbsCertList::decode(&mut seq)?;
        let signature_algorithm = AlgorithmIdentifier::decode(&mut seq)?;
        let (unused_bits, data) = seq.read_bit_string().map_err(asn1_err)?;
        seq.finish().map_err(asn1_err)?;

        Ok(CertList {
            tbs,
            signature_algorithm,
            signature: BitString {
                unused_bits,
                data: data.to_vec(),
            },
        })
    }

    /// Re-encode the tree to DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_nested(tags::SEQUENCE, |e| {
            self.tbs.encode(e);
            self.signature_algorithm.encode(e);
            e.write_bit_string(self.signature.unused_bits, &self.signature.data);
        });
        enc.finish()
    }
}

/// Interpret version INTEGER contents as an unsigned wire value.
fn version_number(raw: &[u8]) -> Result<u32, PkiError> {
    if raw.first().is_some_and(|b| b & 0x80 != 0) {
        return Err(PkiError::Asn1Error("negative CRL version".into()));
    }
    let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
    let digits = &raw[start..];
    if digits.len() > 4 {
        return Err(PkiError::Asn1Error("CRL version out of range".into()));
    }
    let value = digits.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
    if value == u32::MAX {
        return Err(PkiError::Asn1Error("CRL version out of range".into()));
    }
    Ok(value)
}

/// Strip leading zero bytes from a byte slice.
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

// ---------------------------------------------------------------------------
// CRL object
// ---------------------------------------------------------------------------

/// A certificate revocation list.
///
/// Either empty or holding exactly one decoded [`CertList`]. Accessors on
/// an empty object fail with [`PkiError::NotInitialized`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateRevocationList {
    tree: Option<CertList>,
}

impl CertificateRevocationList {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CRL from DER-encoded bytes.
    pub fn from_der(data: &[u8]) -> Result<Self, PkiError> {
        let mut crl = Self::new();
        crl.import(data, EncodingFormat::Der)?;
        Ok(crl)
    }

    /// Parse a CRL from a PEM string holding an `X509 CRL` block.
    pub fn from_pem(pem: &str) -> Result<Self, PkiError> {
        let mut crl = Self::new();
        crl.import(pem.as_bytes(), EncodingFormat::Pem)?;
        Ok(crl)
    }

    /// Decode `data` and replace the current tree with it.
    ///
    /// On failure the object keeps whatever it held before the call.
    pub fn import(&mut self, data: &[u8], format: EncodingFormat) -> Result<(), PkiError> {
        debug!(len = data.len(), ?format, "importing CRL");
        let tree = match format {
            EncodingFormat::Der => CertList::from_der(data)?,
            EncodingFormat::Pem => {
                let der = crlkit_utils::pem::decode(PEM_CRL_LABEL, data).map_err(pem_err)?;
                CertList::from_der(&der)?
            }
        };
        debug!(
            revoked = tree.tbs.revoked.as_ref().map_or(0, Vec::len),
            extensions = tree.tbs.extensions.as_ref().map_or(0, Vec::len),
            "CRL imported"
        );
        self.tree = Some(tree);
        Ok(())
    }

    /// Release the decoded tree. Calling this on an empty object is a no-op.
    pub fn deinit(&mut self) {
        self.tree = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.tree.is_some()
    }

    /// The decoded tree, if any.
    pub fn cert_list(&self) -> Option<&CertList> {
        self.tree.as_ref()
    }

    pub(crate) fn tree(&self) -> Result<&CertList, PkiError> {
        self.tree.as_ref().ok_or(PkiError::NotInitialized)
    }

    /// Serialize the CRL.
    pub fn export(&self, format: EncodingFormat) -> Result<Vec<u8>, PkiError> {
        let der = self.tree()?.to_der();
        let out = match format {
            EncodingFormat::Der => der,
            EncodingFormat::Pem => crlkit_utils::pem::encode(PEM_CRL_LABEL, &der).into_bytes(),
        };
        debug!(len = out.len(), ?format, "CRL exported");
        Ok(out)
    }

    /// Serialize the CRL into `out`.
    pub fn export_into(&self, format: EncodingFormat, out: &mut [u8]) -> Result<Fill, PkiError> {
        let encoded = self.export(format)?;
        Ok(Fill::copy(&encoded, out))
    }

    /// Replace this object's tree with an independent copy of `src`'s.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), PkiError> {
        let der = src.export(EncodingFormat::Der)?;
        self.import(&der, EncodingFormat::Der)
    }

    // -----------------------------------------------------------------------
    // Issuer
    // -----------------------------------------------------------------------

    /// The issuer rendered as `C=US,O=Example,CN=Root`.
    pub fn issuer_dn(&self) -> Result<String, PkiError> {
        format_name(&self.tree()?.tbs.issuer)
    }

    pub fn issuer_dn_into(&self, out: &mut [u8]) -> Result<Fill, PkiError> {
        let dn = self.issuer_dn()?;
        Ok(Fill::copy(dn.as_bytes(), out))
    }

    /// The `index`-th issuer attribute of type `oid`, as text or (with
    /// `raw`) as `#hex` of its DER value.
    pub fn issuer_dn_by_oid(&self, oid: &Oid, index: usize, raw: bool) -> Result<String, PkiError> {
        dn_by_oid(&self.tree()?.tbs.issuer, oid, index, raw)
    }

    pub fn issuer_dn_by_oid_into(
        &self,
        oid: &Oid,
        index: usize,
        raw: bool,
        out: &mut [u8],
    ) -> Result<Fill, PkiError> {
        let value = self.issuer_dn_by_oid(oid, index, raw)?;
        Ok(Fill::copy(value.as_bytes(), out))
    }

    /// Dotted OID of the `index`-th issuer attribute.
    pub fn dn_oid(&self, index: usize) -> Result<String, PkiError> {
        dn_oid(&self.tree()?.tbs.issuer, index)
    }

    pub fn dn_oid_into(&self, index: usize, out: &mut [u8]) -> Result<Fill, PkiError> {
        let oid = self.dn_oid(index)?;
        Ok(Fill::copy(oid.as_bytes(), out))
    }

    /// DER encoding of the issuer Name exactly as received.
    pub fn raw_issuer_dn(&self) -> Result<&[u8], PkiError> {
        Ok(self.tree()?.tbs.issuer.raw())
    }

    // -----------------------------------------------------------------------
    // Signature
    // -----------------------------------------------------------------------

    /// The outer `signatureAlgorithm`.
    pub fn signature_algorithm(&self) -> Result<SignAlgorithm, PkiError> {
        Ok(oid_to_sign_algorithm(&self.tree()?.signature_algorithm.oid))
    }

    pub fn signature_algorithm_oid(&self) -> Result<String, PkiError> {
        Ok(self.tree()?.signature_algorithm.oid.to_dot_string())
    }

    fn signature_bytes(&self) -> Result<&[u8], PkiError> {
        let signature = &self.tree()?.signature;
        if signature.unused_bits != 0 {
            return Err(PkiError::CertificateError(format!(
                "signature has {} unused bits",
                signature.unused_bits
            )));
        }
        Ok(&signature.data)
    }

    /// The signature value octets.
    pub fn signature(&self) -> Result<Vec<u8>, PkiError> {
        self.signature_bytes().map(<[u8]>::to_vec)
    }

    pub fn signature_into(&self, out: &mut [u8]) -> Result<Fill, PkiError> {
        Ok(Fill::copy(self.signature_bytes()?, out))
    }

    // -----------------------------------------------------------------------
    // Version and validity
    // -----------------------------------------------------------------------

    /// CRL version: 1 for v1, 2 for v2.
    ///
    /// A CRL that omits the version field reports a decode error rather
    /// than assuming v1.
    pub fn version(&self) -> Result<u32, PkiError> {
        let raw = self
            .tree()?
            .tbs
            .version
            .as_deref()
            .ok_or_else(|| PkiError::Asn1Error("CRL version field is absent".into()))?;
        Ok(version_number(raw)? + 1)
    }

    /// thisUpdate (UNIX timestamp).
    pub fn this_update(&self) -> Result<i64, PkiError> {
        Ok(self.tree()?.tbs.this_update.timestamp)
    }

    /// nextUpdate (UNIX timestamp).
    pub fn next_update(&self) -> Result<i64, PkiError> {
        self.tree()?
            .tbs
            .next_update
            .as_ref()
            .map(|t| t.timestamp)
            .ok_or(PkiError::DataNotAvailable)
    }

    // -----------------------------------------------------------------------
    // Revoked certificates
    // -----------------------------------------------------------------------

    /// Revoked entries in encoding order.
    pub fn revoked_entries(&self) -> Result<&[RevokedEntry], PkiError> {
        Ok(self.tree()?.tbs.revoked.as_deref().unwrap_or_default())
    }

    pub fn revoked_count(&self) -> Result<usize, PkiError> {
        self.revoked_entries().map(<[RevokedEntry]>::len)
    }

    fn revoked_at(&self, index: usize) -> Result<&RevokedEntry, PkiError> {
        self.revoked_entries()?
            .get(index)
            .ok_or(PkiError::DataNotAvailable)
    }

    /// Serial number and revocation date of the `index`-th entry.
    pub fn revoked_serial(&self, index: usize) -> Result<(Vec<u8>, i64), PkiError> {
        let entry = self.revoked_at(index)?;
        Ok((entry.serial.clone(), entry.revocation_date.timestamp))
    }

    pub fn revoked_serial_into(
        &self,
        index: usize,
        out: &mut [u8],
    ) -> Result<(Fill, i64), PkiError> {
        let entry = self.revoked_at(index)?;
        Ok((
            Fill::copy(&entry.serial, out),
            entry.revocation_date.timestamp,
        ))
    }

    /// The `index`-th entry with its reason code and invalidity date.
    pub fn revoked_entry(&self, index: usize) -> Result<RevokedCertificate, PkiError> {
        RevokedCertificate::from_entry(self.revoked_at(index)?)
    }

    /// Check if a certificate (by serial number) is revoked.
    /// Leading zero octets are ignored on both sides.
    pub fn is_revoked(&self, serial: &[u8]) -> Result<Option<RevokedCertificate>, PkiError> {
        let wanted = strip_leading_zeros(serial);
        self.revoked_entries()?
            .iter()
            .find(|entry| strip_leading_zeros(&entry.serial) == wanted)
            .map(RevokedCertificate::from_entry)
            .transpose()
    }
}
