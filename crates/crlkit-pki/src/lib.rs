#![forbid(unsafe_code)]
#![doc = "X.509 certificate revocation list management for crlkit."]

#[cfg(feature = "x509")]
pub mod x509;

#[cfg(feature = "x509")]
mod oid_mapping;
