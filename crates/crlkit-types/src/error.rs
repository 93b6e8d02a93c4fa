/// Low-level encoding and decoding errors raised by the ASN.1, Base64 and
/// PEM layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("null or empty input")]
    NullInput,
    #[error("invalid argument")]
    InvalidArg,

    // Encoding/Decoding errors
    #[error("decode: asn1 buffer failed")]
    DecodeAsn1Fail,
    #[error("decode: truncated asn1 element")]
    DecodeTruncated,
    #[error("decode: unexpected tag 0x{found:02x}, expected 0x{expected:02x}")]
    DecodeUnexpectedTag { expected: u8, found: u8 },
    #[error("decode: indefinite length is not allowed in DER")]
    DecodeIndefiniteLength,
    #[error("decode: {0} trailing bytes after element")]
    DecodeTrailingData(usize),
    #[error("decode: nesting deeper than {0} levels")]
    DecodeDepthExceeded(usize),
    #[error("decode: invalid time value")]
    DecodeInvalidTime,
    #[error("decode: invalid base64 data")]
    DecodeBase64Fail,
    #[error("decode: no PEM block labelled {0}")]
    DecodePemNoBlock(String),
}

/// PKI object errors.
///
/// The variants map onto the error kinds callers are expected to branch on:
/// invalid argument, decode failure, short buffer, data not available,
/// unsupported shape, structural error and resource exhaustion.
#[derive(Debug, thiserror::Error)]
pub enum PkiError {
    #[error("object is not initialized")]
    NotInitialized,
    #[error("invalid CRL: {0}")]
    InvalidCrl(String),
    #[error("asn1 parse error: {0}")]
    Asn1Error(String),
    #[error("pem decode error: {0}")]
    PemDecode(String),
    #[error("short buffer: {needed} elements required")]
    ShortBuffer { needed: usize },
    #[error("requested data not available")]
    DataNotAvailable,
    #[error("unsupported certificate extension: {0}")]
    UnsupportedExtension(String),
    #[error("certificate format error: {0}")]
    CertificateError(String),
    #[error("memory allocation failed")]
    MemoryError,
}

impl PkiError {
    /// Whether this error reports malformed input (as opposed to a missing
    /// field, a short buffer, or a misuse of the API).
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            PkiError::InvalidCrl(_)
                | PkiError::Asn1Error(_)
                | PkiError::PemDecode(_)
        )
    }

    /// Whether this error only signals absence of an optional element.
    pub fn is_not_available(&self) -> bool {
        matches!(self, PkiError::DataNotAvailable)
    }
}

impl From<std::collections::TryReserveError> for PkiError {
    fn from(_: std::collections::TryReserveError) -> Self {
        PkiError::MemoryError
    }
}
