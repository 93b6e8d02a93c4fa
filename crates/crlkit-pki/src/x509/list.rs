//! Bulk import and export of CRL lists.
//!
//! A DER input holds a single CRL; a PEM input may hold any number of
//! `X509 CRL` blocks, possibly separated by unrelated text.

use crlkit_types::{EncodingFormat, PkiError};
use crlkit_utils::asn1::{tags, Decoder};
use crlkit_utils::pem;
use tracing::{debug, trace};

use super::{
    asn1_err, pem_err, CertificateRevocationList, DEFAULT_LIST_CAPACITY, PEM_CRL_LABEL,
    PEM_CRL_SEP,
};

/// Options for [`list_import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListImportFlags {
    fail_if_exceeded: bool,
}

impl ListImportFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `ShortBuffer` with the total count instead of truncating when
    /// the input holds more than `max_count` CRLs.
    pub fn fail_if_exceeded(mut self) -> Self {
        self.fail_if_exceeded = true;
        self
    }

    pub fn is_fail_if_exceeded(&self) -> bool {
        self.fail_if_exceeded
    }
}

/// Import up to `max_count` CRLs from `data`.
///
/// With default flags a PEM stream holding more blocks than `max_count` is
/// truncated. With [`ListImportFlags::fail_if_exceeded`] the remaining
/// blocks are counted (not decoded) and `ShortBuffer { needed }` reports
/// the total. Any decode failure discards everything imported so far.
pub fn list_import(
    data: &[u8],
    format: EncodingFormat,
    max_count: usize,
    flags: ListImportFlags,
) -> Result<Vec<CertificateRevocationList>, PkiError> {
    debug!(len = data.len(), ?format, max_count, ?flags, "importing CRL list");
    let crls = match format {
        EncodingFormat::Der => import_der(data, max_count)?,
        EncodingFormat::Pem => import_pem(data, max_count, flags)?,
    };
    debug!(count = crls.len(), "CRL list imported");
    Ok(crls)
}

/// Import every CRL in `data`, sizing the output from a first counting pass.
pub fn list_import_all(
    data: &[u8],
    format: EncodingFormat,
    flags: ListImportFlags,
) -> Result<Vec<CertificateRevocationList>, PkiError> {
    let probe = ListImportFlags::new().fail_if_exceeded();
    match list_import(data, format, DEFAULT_LIST_CAPACITY, probe) {
        Err(PkiError::ShortBuffer { needed }) => {
            debug!(needed, "CRL list exceeds default capacity, retrying");
            list_import(data, format, needed, flags)
        }
        other => other,
    }
}

/// Serialize `crls` back to back: concatenated DER objects or PEM blocks.
pub fn list_export(
    crls: &[CertificateRevocationList],
    format: EncodingFormat,
) -> Result<Vec<u8>, PkiError> {
    let mut out = Vec::new();
    for crl in crls {
        let encoded = crl.export(format)?;
        out.try_reserve(encoded.len())?;
        out.extend_from_slice(&encoded);
    }
    debug!(count = crls.len(), len = out.len(), ?format, "CRL list exported");
    Ok(out)
}

fn import_der(data: &[u8], max_count: usize) -> Result<Vec<CertificateRevocationList>, PkiError> {
    if max_count == 0 {
        return Err(PkiError::ShortBuffer { needed: 1 });
    }
    // Only the first element is a CRL; whatever follows it is ignored.
    let first = Decoder::new(data)
        .read_raw_tlv(tags::SEQUENCE)
        .map_err(asn1_err)?;
    let crl = CertificateRevocationList::from_der(first)?;
    let mut crls = Vec::new();
    crls.try_reserve_exact(1)?;
    crls.push(crl);
    Ok(crls)
}

fn import_pem(
    data: &[u8],
    max_count: usize,
    flags: ListImportFlags,
) -> Result<Vec<CertificateRevocationList>, PkiError> {
    let Some(mut pos) = pem::find(PEM_CRL_SEP, data, 0) else {
        return Err(PkiError::PemDecode("no X509 CRL block found".into()));
    };

    let mut crls = Vec::new();
    crls.try_reserve(max_count.min(DEFAULT_LIST_CAPACITY))?;
    let mut found = 0usize;

    loop {
        if found < max_count {
            let (der, consumed) =
                pem::decode_block(PEM_CRL_LABEL, &data[pos..]).map_err(pem_err)?;
            trace!(index = found, offset = pos, len = der.len(), "decoding PEM CRL block");
            let crl = CertificateRevocationList::from_der(&der)?;
            crls.try_reserve(1)?;
            crls.push(crl);
            pos += consumed;
        } else if flags.is_fail_if_exceeded() {
            trace!(index = found, offset = pos, "counting PEM CRL block past capacity");
            pos += 1;
        } else {
            break;
        }
        found += 1;

        match pem::find(PEM_CRL_SEP, data, pos) {
            Some(next) => pos = next,
            None => break,
        }
    }

    if found > max_count {
        return Err(PkiError::ShortBuffer { needed: found });
    }
    Ok(crls)
}
