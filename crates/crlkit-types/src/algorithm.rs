/// Hash algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgId {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sm3,
}

/// Public-key algorithm families that appear in signature identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PkeyAlgId {
    Rsa,
    RsaPss,
    Dsa,
    Ecdsa,
    Ed25519,
    Ed448,
    Sm2,
}

/// Signature algorithm identifiers recognised in `signatureAlgorithm`.
///
/// Anything without an entry here is reported as `Unknown`; the dotted OID
/// is still available from the owning object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignAlgorithm {
    RsaMd5,
    RsaSha1,
    RsaSha224,
    RsaSha256,
    RsaSha384,
    RsaSha512,
    RsaPss,
    DsaSha1,
    DsaSha224,
    DsaSha256,
    EcdsaSha1,
    EcdsaSha224,
    EcdsaSha256,
    EcdsaSha384,
    EcdsaSha512,
    Ed25519,
    Ed448,
    Sm2Sm3,
    Unknown,
}

impl SignAlgorithm {
    /// The digest bound to this signature scheme, if it fixes one.
    pub fn hash(self) -> Option<HashAlgId> {
        match self {
            SignAlgorithm::RsaMd5 => Some(HashAlgId::Md5),
            SignAlgorithm::RsaSha1 | SignAlgorithm::DsaSha1 | SignAlgorithm::EcdsaSha1 => {
                Some(HashAlgId::Sha1)
            }
            SignAlgorithm::RsaSha224 | SignAlgorithm::DsaSha224 | SignAlgorithm::EcdsaSha224 => {
                Some(HashAlgId::Sha224)
            }
            SignAlgorithm::RsaSha256 | SignAlgorithm::DsaSha256 | SignAlgorithm::EcdsaSha256 => {
                Some(HashAlgId::Sha256)
            }
            SignAlgorithm::RsaSha384 | SignAlgorithm::EcdsaSha384 => Some(HashAlgId::Sha384),
            SignAlgorithm::RsaSha512 | SignAlgorithm::EcdsaSha512 => Some(HashAlgId::Sha512),
            SignAlgorithm::Sm2Sm3 => Some(HashAlgId::Sm3),
            // PSS carries its digest in parameters; EdDSA hashes internally.
            SignAlgorithm::RsaPss
            | SignAlgorithm::Ed25519
            | SignAlgorithm::Ed448
            | SignAlgorithm::Unknown => None,
        }
    }

    /// The key family that produces this signature.
    pub fn pkey(self) -> Option<PkeyAlgId> {
        match self {
            SignAlgorithm::RsaMd5
            | SignAlgorithm::RsaSha1
            | SignAlgorithm::RsaSha224
            | SignAlgorithm::RsaSha256
            | SignAlgorithm::RsaSha384
            | SignAlgorithm::RsaSha512 => Some(PkeyAlgId::Rsa),
            SignAlgorithm::RsaPss => Some(PkeyAlgId::RsaPss),
            SignAlgorithm::DsaSha1 | SignAlgorithm::DsaSha224 | SignAlgorithm::DsaSha256 => {
                Some(PkeyAlgId::Dsa)
            }
            SignAlgorithm::EcdsaSha1
            | SignAlgorithm::EcdsaSha224
            | SignAlgorithm::EcdsaSha256
            | SignAlgorithm::EcdsaSha384
            | SignAlgorithm::EcdsaSha512 => Some(PkeyAlgId::Ecdsa),
            SignAlgorithm::Ed25519 => Some(PkeyAlgId::Ed25519),
            SignAlgorithm::Ed448 => Some(PkeyAlgId::Ed448),
            SignAlgorithm::Sm2Sm3 => Some(PkeyAlgId::Sm2),
            SignAlgorithm::Unknown => None,
        }
    }
}

/// Serialization format of an encoded PKI object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingFormat {
    /// Raw DER bytes.
    #[default]
    Der,
    /// Base64 text armor with BEGIN/END lines.
    Pem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_algorithm_hash() {
        assert_eq!(SignAlgorithm::RsaSha256.hash(), Some(HashAlgId::Sha256));
        assert_eq!(SignAlgorithm::EcdsaSha384.hash(), Some(HashAlgId::Sha384));
        assert_eq!(SignAlgorithm::Ed25519.hash(), None);
        assert_eq!(SignAlgorithm::Unknown.hash(), None);
    }

    #[test]
    fn test_sign_algorithm_pkey() {
        assert_eq!(SignAlgorithm::RsaSha1.pkey(), Some(PkeyAlgId::Rsa));
        assert_eq!(SignAlgorithm::EcdsaSha256.pkey(), Some(PkeyAlgId::Ecdsa));
        assert_eq!(SignAlgorithm::Sm2Sm3.pkey(), Some(PkeyAlgId::Sm2));
        assert_eq!(SignAlgorithm::Unknown.pkey(), None);
    }
}
