#![no_main]
use crlkit_utils::asn1::{Decoder, MAX_DEPTH};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(data);
    let _ = decoder.walk(MAX_DEPTH);
});
