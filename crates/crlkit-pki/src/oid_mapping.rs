//! Shared OID-to-algorithm mapping helpers for the PKI crate.

use crlkit_types::SignAlgorithm;
use crlkit_utils::oid::{known, Oid};

/// Map a `signatureAlgorithm` OID to its `SignAlgorithm`.
///
/// Unrecognized OIDs map to `SignAlgorithm::Unknown`; the dotted form stays
/// available to callers that need it.
pub(crate) fn oid_to_sign_algorithm(oid: &Oid) -> SignAlgorithm {
    if *oid == known::sha256_with_rsa_encryption() {
        SignAlgorithm::RsaSha256
    } else if *oid == known::sha384_with_rsa_encryption() {
        SignAlgorithm::RsaSha384
    } else if *oid == known::sha512_with_rsa_encryption() {
        SignAlgorithm::RsaSha512
    } else if *oid == known::sha224_with_rsa_encryption() {
        SignAlgorithm::RsaSha224
    } else if *oid == known::sha1_with_rsa_encryption() {
        SignAlgorithm::RsaSha1
    } else if *oid == known::md5_with_rsa_encryption() {
        SignAlgorithm::RsaMd5
    } else if *oid == known::rsassa_pss() {
        SignAlgorithm::RsaPss
    } else if *oid == known::dsa_with_sha1() {
        SignAlgorithm::DsaSha1
    } else if *oid == known::dsa_with_sha224() {
        SignAlgorithm::DsaSha224
    } else if *oid == known::dsa_with_sha256() {
        SignAlgorithm::DsaSha256
    } else if *oid == known::ecdsa_with_sha1() {
        SignAlgorithm::EcdsaSha1
    } else if *oid == known::ecdsa_with_sha224() {
        SignAlgorithm::EcdsaSha224
    } else if *oid == known::ecdsa_with_sha256() {
        SignAlgorithm::EcdsaSha256
    } else if *oid == known::ecdsa_with_sha384() {
        SignAlgorithm::EcdsaSha384
    } else if *oid == known::ecdsa_with_sha512() {
        SignAlgorithm::EcdsaSha512
    } else if *oid == known::ed25519() {
        SignAlgorithm::Ed25519
    } else if *oid == known::ed448() {
        SignAlgorithm::Ed448
    } else if *oid == known::sm2_with_sm3() {
        SignAlgorithm::Sm2Sm3
    } else {
        SignAlgorithm::Unknown
    }
}
