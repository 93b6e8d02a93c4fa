//! Integration tests for crlkit.
//! Cross-crate roundtrip and interoperability tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use crlkit_pki::x509::{
        list_export, list_import, list_import_all, CertificateRevocationList, ListImportFlags,
        PEM_CRL_LABEL,
    };
    use crlkit_types::{EncodingFormat, PkiError};
    use crlkit_utils::asn1::{Decoder, MAX_DEPTH};
    use crlkit_utils::{base64, pem};

    const CRL_V2_DER: &[u8] = include_bytes!("../../vectors/crl/crl_v2.der");
    const CRL_V2_PEM: &str = include_str!("../../vectors/crl/crl_v2.pem");
    const EC_CRL_V1_DER: &[u8] = include_bytes!("../../vectors/crl/ec_crl_v1.der");
    const EC_CRL_V1_PEM: &str = include_str!("../../vectors/crl/ec_crl_v1.pem");

    // -------------------------------------------------------
    // 1. PEM vectors carry the same bytes as the DER vectors
    // -------------------------------------------------------
    #[test]
    fn test_pem_vectors_match_der() {
        assert_eq!(pem::decode(PEM_CRL_LABEL, CRL_V2_PEM.as_bytes()).unwrap(), CRL_V2_DER);
        assert_eq!(
            pem::decode(PEM_CRL_LABEL, EC_CRL_V1_PEM.as_bytes()).unwrap(),
            EC_CRL_V1_DER
        );
    }

    // -------------------------------------------------------
    // 2. Hand-armored base64 imports like the PEM vector
    // -------------------------------------------------------
    #[test]
    fn test_hand_armored_pem_imports() {
        let body = base64::encode(CRL_V2_DER);
        // one long line, CRLF endings
        let armored = format!("-----BEGIN X509 CRL-----\r\n{body}\r\n-----END X509 CRL-----\r\n");
        let crl = CertificateRevocationList::from_pem(&armored).unwrap();
        assert_eq!(crl.export(EncodingFormat::Der).unwrap(), CRL_V2_DER);
    }

    // -------------------------------------------------------
    // 3. The generic TLV walk accepts every exported CRL
    // -------------------------------------------------------
    #[test]
    fn test_exported_der_walks() {
        for der in [CRL_V2_DER, EC_CRL_V1_DER] {
            let crl = CertificateRevocationList::from_der(der).unwrap();
            let exported = crl.export(EncodingFormat::Der).unwrap();
            let mut dec = Decoder::new(&exported);
            assert!(dec.walk(MAX_DEPTH).unwrap() > 10);
            assert!(dec.is_empty());
        }
    }

    // -------------------------------------------------------
    // 4. List export -> list import across both formats
    // -------------------------------------------------------
    #[test]
    fn test_list_round_trip() {
        let crls = vec![
            CertificateRevocationList::from_der(CRL_V2_DER).unwrap(),
            CertificateRevocationList::from_der(EC_CRL_V1_DER).unwrap(),
        ];
        let pem_stream = list_export(&crls, EncodingFormat::Pem).unwrap();
        let back = list_import_all(&pem_stream, EncodingFormat::Pem, ListImportFlags::new())
            .unwrap();
        assert_eq!(back, crls);

        // a DER stream only yields its first object
        let der_stream = list_export(&crls, EncodingFormat::Der).unwrap();
        let first = list_import(&der_stream, EncodingFormat::Der, 8, ListImportFlags::new())
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0], crls[0]);
    }

    // -------------------------------------------------------
    // 5. Import-all beyond the default capacity
    // -------------------------------------------------------
    #[test]
    fn test_import_all_large_stream() {
        let count = crlkit_pki::x509::DEFAULT_LIST_CAPACITY + 3;
        let stream = EC_CRL_V1_PEM.repeat(count);
        let crls =
            list_import_all(stream.as_bytes(), EncodingFormat::Pem, ListImportFlags::new())
                .unwrap();
        assert_eq!(crls.len(), count);

        let flags = ListImportFlags::new().fail_if_exceeded();
        let err = list_import(stream.as_bytes(), EncodingFormat::Pem, 10, flags).unwrap_err();
        assert!(matches!(err, PkiError::ShortBuffer { needed } if needed == count));
    }

    // -------------------------------------------------------
    // 6. Shared read-only access from several threads
    // -------------------------------------------------------
    #[test]
    fn test_shared_across_threads() {
        let crl = Arc::new(CertificateRevocationList::from_der(CRL_V2_DER).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let crl = Arc::clone(&crl);
                thread::spawn(move || {
                    (
                        crl.issuer_dn().unwrap(),
                        crl.revoked_count().unwrap(),
                        crl.number().unwrap().0,
                    )
                })
            })
            .collect();
        for handle in handles {
            let (issuer, count, number) = handle.join().unwrap();
            assert_eq!(issuer, "C=US,O=Example Org,CN=Example CRL CA");
            assert_eq!(count, 2);
            assert_eq!(number, vec![0x01]);
        }
    }

    // -------------------------------------------------------
    // 7. Text rendering of both vectors
    // -------------------------------------------------------
    #[test]
    fn test_text_rendering() {
        let v2 = CertificateRevocationList::from_pem(CRL_V2_PEM).unwrap();
        let text = v2.to_text().unwrap();
        assert!(text.contains("Revoked Certificates:"));
        assert!(text.contains("Serial Number: 1001"));

        let v1 = CertificateRevocationList::from_pem(EC_CRL_V1_PEM).unwrap();
        assert!(v1.to_text().unwrap().contains("Beispiel EC CA"));
    }
}
