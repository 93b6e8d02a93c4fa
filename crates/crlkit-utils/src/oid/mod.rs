//! OID (Object Identifier) management.

use crlkit_types::CryptoError;

/// A parsed OID represented as a sequence of arc values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: Vec<u64>,
}

impl Oid {
    /// Create an OID from a slice of arc values.
    pub fn new(arcs: &[u64]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Return the arc values.
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Encode this OID to DER bytes (just the value, no tag/length).
    pub fn to_der_value(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        if let [first, second, rest @ ..] = self.arcs.as_slice() {
            encode_arc(&mut buf, first * 40 + second);
            for &arc in rest {
                encode_arc(&mut buf, arc);
            }
        }
        buf
    }

    /// Parse an OID from DER value bytes.
    pub fn from_der_value(data: &[u8]) -> Result<Self, CryptoError> {
        if data.is_empty() {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        let mut arcs = Vec::new();
        let mut i = 0;
        while i < data.len() {
            let (arc, consumed) = decode_arc(&data[i..])?;
            if i == 0 {
                // The first subidentifier packs two arcs; arc 2 takes
                // every value from 80 upwards.
                let top = (arc / 40).min(2);
                arcs.push(top);
                arcs.push(arc - top * 40);
            } else {
                arcs.push(arc);
            }
            i += consumed;
        }

        Ok(Self { arcs })
    }

    /// Parse dotted notation such as `"2.5.29.20"`.
    pub fn from_dot_string(s: &str) -> Result<Self, CryptoError> {
        let arcs = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CryptoError::InvalidArg);
                }
                part.parse::<u64>().map_err(|_| CryptoError::InvalidArg)
            })
            .collect::<Result<Vec<_>, _>>()?;
        match arcs.as_slice() {
            [first, second, ..] if *first <= 2 && (*first == 2 || *second < 40) => {
                Ok(Self { arcs })
            }
            _ => Err(CryptoError::InvalidArg),
        }
    }

    /// Return the dotted-string representation (e.g., "1.2.840.113549.1.1.1").
    pub fn to_dot_string(&self) -> String {
        self.arcs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot_string())
    }
}

impl std::str::FromStr for Oid {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Oid::from_dot_string(s)
    }
}

fn encode_arc(buf: &mut Vec<u8>, mut value: u64) {
    if value < 0x80 {
        buf.push(value as u8);
        return;
    }
    let mut bytes = Vec::new();
    while value > 0 {
        bytes.push((value & 0x7F) as u8);
        value >>= 7;
    }
    bytes.reverse();
    let last = bytes.len() - 1;
    for (i, b) in bytes.iter().enumerate() {
        if i < last {
            buf.push(b | 0x80);
        } else {
            buf.push(*b);
        }
    }
}

fn decode_arc(data: &[u8]) -> Result<(u64, usize), CryptoError> {
    // 0x80 as a leading octet is a non-minimal encoding.
    if data.first() == Some(&0x80) {
        return Err(CryptoError::DecodeAsn1Fail);
    }
    let mut value: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if value >> 57 != 0 {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        value = (value << 7) | (byte & 0x7F) as u64;
        if (byte & 0x80) == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CryptoError::DecodeAsn1Fail)
}

/// Well-known OIDs.
pub mod known {
    use super::Oid;

    // RSA signatures
    pub fn md5_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 4])
    }
    pub fn sha1_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 5])
    }
    pub fn rsassa_pss() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 10])
    }
    pub fn sha256_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 11])
    }
    pub fn sha384_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 12])
    }
    pub fn sha512_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 13])
    }
    pub fn sha224_with_rsa_encryption() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 1, 14])
    }

    // DSA signatures
    pub fn dsa_with_sha1() -> Oid {
        Oid::new(&[1, 2, 840, 10040, 4, 3])
    }
    pub fn dsa_with_sha224() -> Oid {
        Oid::new(&[2, 16, 840, 1, 101, 3, 4, 3, 1])
    }
    pub fn dsa_with_sha256() -> Oid {
        Oid::new(&[2, 16, 840, 1, 101, 3, 4, 3, 2])
    }

    // ECDSA signatures
    pub fn ecdsa_with_sha1() -> Oid {
        Oid::new(&[1, 2, 840, 10045, 4, 1])
    }
    pub fn ecdsa_with_sha224() -> Oid {
        Oid::new(&[1, 2, 840, 10045, 4, 3, 1])
    }
    pub fn ecdsa_with_sha256() -> Oid {
        Oid::new(&[1, 2, 840, 10045, 4, 3, 2])
    }
    pub fn ecdsa_with_sha384() -> Oid {
        Oid::new(&[1, 2, 840, 10045, 4, 3, 3])
    }
    pub fn ecdsa_with_sha512() -> Oid {
        Oid::new(&[1, 2, 840, 10045, 4, 3, 4])
    }

    // EdDSA
    pub fn ed25519() -> Oid {
        Oid::new(&[1, 3, 101, 112])
    }
    pub fn ed448() -> Oid {
        Oid::new(&[1, 3, 101, 113])
    }

    // SM2/SM3
    pub fn sm2_with_sm3() -> Oid {
        Oid::new(&[1, 2, 156, 10197, 1, 501])
    }

    // CRL extension OIDs (RFC 5280 §5.2, §5.3)
    pub fn authority_key_identifier() -> Oid {
        Oid::new(&[2, 5, 29, 35])
    }
    pub fn crl_number() -> Oid {
        Oid::new(&[2, 5, 29, 20])
    }
    pub fn delta_crl_indicator() -> Oid {
        Oid::new(&[2, 5, 29, 27])
    }
    pub fn issuing_distribution_point() -> Oid {
        Oid::new(&[2, 5, 29, 28])
    }
    pub fn crl_reason() -> Oid {
        Oid::new(&[2, 5, 29, 21])
    }
    pub fn invalidity_date() -> Oid {
        Oid::new(&[2, 5, 29, 24])
    }
    pub fn certificate_issuer() -> Oid {
        Oid::new(&[2, 5, 29, 29])
    }

    // DN Attribute Type OIDs (X.520)
    pub fn common_name() -> Oid {
        Oid::new(&[2, 5, 4, 3])
    }
    pub fn country_name() -> Oid {
        Oid::new(&[2, 5, 4, 6])
    }
    pub fn organization_name() -> Oid {
        Oid::new(&[2, 5, 4, 10])
    }
    pub fn organizational_unit_name() -> Oid {
        Oid::new(&[2, 5, 4, 11])
    }

    /// Map a printable DN attribute OID to its short name.
    pub fn oid_to_dn_short_name(oid: &Oid) -> Option<&'static str> {
        match oid.arcs() {
            [2, 5, 4, 3] => Some("CN"),
            [2, 5, 4, 4] => Some("SN"),
            [2, 5, 4, 5] => Some("serialNumber"),
            [2, 5, 4, 6] => Some("C"),
            [2, 5, 4, 7] => Some("L"),
            [2, 5, 4, 8] => Some("ST"),
            [2, 5, 4, 9] => Some("street"),
            [2, 5, 4, 10] => Some("O"),
            [2, 5, 4, 11] => Some("OU"),
            [2, 5, 4, 12] => Some("title"),
            [2, 5, 4, 41] => Some("name"),
            [2, 5, 4, 42] => Some("GN"),
            [2, 5, 4, 43] => Some("initials"),
            [2, 5, 4, 44] => Some("generationQualifier"),
            [2, 5, 4, 46] => Some("dnQualifier"),
            [2, 5, 4, 65] => Some("pseudonym"),
            [0, 9, 2342, 19200300, 100, 1, 1] => Some("UID"),
            [0, 9, 2342, 19200300, 100, 1, 25] => Some("DC"),
            [1, 2, 840, 113549, 1, 9, 1] => Some("emailAddress"),
            _ => None,
        }
    }
}
