#![no_main]
use crlkit_pki::x509::{list_import, ListImportFlags};
use crlkit_types::EncodingFormat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = list_import(data, EncodingFormat::Pem, 4, ListImportFlags::new());
    if let Err(crlkit_types::PkiError::ShortBuffer { needed }) = list_import(
        data,
        EncodingFormat::Pem,
        4,
        ListImportFlags::new().fail_if_exceeded(),
    ) {
        assert!(needed > 4);
    }
});
