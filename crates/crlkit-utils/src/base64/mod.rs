//! Base64 encoding and decoding (RFC 4648 standard alphabet).

use crlkit_types::CryptoError;

const ENCODE_TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode bytes to a Base64 string.
pub fn encode(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;

        let triple = (b0 << 16) | (b1 << 8) | b2;

        output.push(ENCODE_TABLE[((triple >> 18) & 0x3F) as usize] as char);
        output.push(ENCODE_TABLE[((triple >> 12) & 0x3F) as usize] as char);

        if chunk.len() > 1 {
            output.push(ENCODE_TABLE[((triple >> 6) & 0x3F) as usize] as char);
        } else {
            output.push('=');
        }

        if chunk.len() > 2 {
            output.push(ENCODE_TABLE[(triple & 0x3F) as usize] as char);
        } else {
            output.push('=');
        }
    }

    output
}

/// Decode Base64 text to bytes. ASCII whitespace is skipped; padding is
/// only accepted in the final quantum.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let filtered: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if filtered.len() % 4 != 0 {
        return Err(CryptoError::DecodeBase64Fail);
    }

    let mut output = Vec::with_capacity((filtered.len() / 4) * 3);
    let quanta = filtered.len() / 4;

    for (i, chunk) in filtered.chunks_exact(4).enumerate() {
        let last = i + 1 == quanta;
        let pad = chunk.iter().rev().take_while(|&&c| c == b'=').count();
        if pad > 2 || (pad > 0 && !last) {
            return Err(CryptoError::DecodeBase64Fail);
        }

        let mut triple = 0u32;
        for &c in &chunk[..4 - pad] {
            triple = (triple << 6) | decode_char(c)?;
        }
        triple <<= 6 * pad as u32;

        let bytes = [(triple >> 16) as u8, (triple >> 8) as u8, triple as u8];
        output.extend_from_slice(&bytes[..3 - pad]);
    }

    Ok(output)
}

fn decode_char(c: u8) -> Result<u32, CryptoError> {
    match c {
        b'A'..=b'Z' => Ok((c - b'A') as u32),
        b'a'..=b'z' => Ok((c - b'a' + 26) as u32),
        b'0'..=b'9' => Ok((c - b'0' + 52) as u32),
        b'+' => Ok(62),
        b'/' => Ok(63),
        _ => Err(CryptoError::DecodeBase64Fail),
    }
}
