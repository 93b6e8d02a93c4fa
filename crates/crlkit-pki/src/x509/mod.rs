//! X.509 certificate revocation lists (RFC 5280 §5).
//!
//! [`CertificateRevocationList`] owns at most one decoded `CertificateList`
//! tree. Every accessor is a pure read over that tree; the buffer-filling
//! `*_into` variants report through [`Fill`](crlkit_types::Fill).

mod crl;
pub mod dn;
pub mod extensions;
mod list;
mod text;

pub use crl::{
    AlgorithmIdentifier, BitString, CertList, CertificateRevocationList, CrlTime, RevokedEntry,
    TbsCertList,
};
pub use dn::{AttributeTypeAndValue, Name};
pub use extensions::{
    AuthorityKeyGnSerial, AuthorityKeyIdentifier, CrlExtension, Extension, ExtensionKind,
    GeneralName, RevocationReason, RevokedCertificate,
};
pub use list::{list_export, list_import, list_import_all, ListImportFlags};

use crlkit_types::{CryptoError, PkiError};

/// PEM label of an X.509 CRL block.
pub const PEM_CRL_LABEL: &str = "X509 CRL";

/// Marker that opens every CRL block in a PEM stream.
pub const PEM_CRL_SEP: &str = "-----BEGIN X509 CRL";

/// Capacity used by [`list_import_all`] for its first pass.
pub const DEFAULT_LIST_CAPACITY: usize = 1024;

/// Wrap a DER decoding failure.
pub(crate) fn asn1_err(e: CryptoError) -> PkiError {
    PkiError::Asn1Error(e.to_string())
}

/// Wrap a PEM armor failure.
pub(crate) fn pem_err(e: CryptoError) -> PkiError {
    PkiError::PemDecode(e.to_string())
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}
