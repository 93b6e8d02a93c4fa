#![no_main]
use crlkit_pki::x509::CertificateRevocationList;
use crlkit_types::EncodingFormat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(crl) = CertificateRevocationList::from_der(data) else {
        return;
    };
    // A successful decode must re-encode to the exact input.
    let der = crl.export(EncodingFormat::Der).expect("export of decoded CRL");
    assert_eq!(der, data);

    let _ = crl.issuer_dn();
    let _ = crl.signature();
    let _ = crl.authority_key_id();
    let _ = crl.number();
    let _ = crl.to_text();
    if let Ok(count) = crl.revoked_count() {
        for index in 0..count {
            let _ = crl.revoked_entry(index);
        }
    }
});
