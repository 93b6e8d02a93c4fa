//! PEM format parsing and generation.
//!
//! Operates on bytes so that a stream holding several concatenated blocks
//! (or binary junk between them) can be scanned without a UTF-8 pass.

use crlkit_types::CryptoError;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES_SUFFIX: &str = "-----";

/// Offset of the first occurrence of `marker` (typically the opening
/// `-----BEGIN <label>` text) at or after `from`.
pub fn find(marker: &str, input: &[u8], from: usize) -> Option<usize> {
    let haystack = input.get(from..)?;
    find_bytes(haystack, marker.as_bytes()).map(|pos| from + pos)
}

/// Decode the first block carrying exactly `label`.
pub fn decode(label: &str, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    decode_block(label, input).map(|(data, _)| data)
}

/// Decode the first block carrying exactly `label`, returning the payload
/// and the offset just past its END marker.
pub fn decode_block(label: &str, input: &[u8]) -> Result<(Vec<u8>, usize), CryptoError> {
    let begin = format!("{BEGIN_PREFIX}{label}{DASHES_SUFFIX}");
    let end = format!("{END_PREFIX}{label}{DASHES_SUFFIX}");

    let start = find_bytes(input, begin.as_bytes())
        .ok_or_else(|| CryptoError::DecodePemNoBlock(label.to_string()))?;
    let body_start = start + begin.len();
    let body_len =
        find_bytes(&input[body_start..], end.as_bytes()).ok_or(CryptoError::DecodeTruncated)?;
    let body = &input[body_start..body_start + body_len];

    let data = crate::base64::decode(body)?;
    if data.is_empty() {
        return Err(CryptoError::NullInput);
    }
    Ok((data, body_start + body_len + end.len()))
}

/// Encode binary data as a PEM string with the given label.
pub fn encode(label: &str, data: &[u8]) -> String {
    let base64 = crate::base64::encode(data);
    let mut output = String::with_capacity(base64.len() + base64.len() / 64 + 2 * label.len() + 40);
    output.push_str(BEGIN_PREFIX);
    output.push_str(label);
    output.push_str(DASHES_SUFFIX);
    output.push('\n');

    // Base64 output is ASCII, so every 64-byte boundary is a char boundary.
    let mut rest = base64.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(64));
        output.push_str(line);
        output.push('\n');
        rest = tail;
    }

    output.push_str(END_PREFIX);
    output.push_str(label);
    output.push_str(DASHES_SUFFIX);
    output.push('\n');
    output
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
