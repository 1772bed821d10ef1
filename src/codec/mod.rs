//! Base64 codec for frame payloads
//!
//! Turns the raw bytes of a fetched JPEG frame into the text form that a
//! display surface embeds as `data:image/jpeg;base64,...`. The encoder is
//! the hot path of every playback cycle; the decoder exists so the
//! transform can be verified end to end and is strict about its input.

use thiserror::Error;

/// RFC 4648 standard alphabet. URL-safe variants are deliberately not
/// accepted anywhere in this module.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: u8 = b'=';

/// Marker for bytes outside the alphabet in the reverse lookup table.
const INVALID: u8 = 0xFF;

/// Reverse lookup: ASCII byte to 6-bit index.
const REVERSE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Decoding failure. Encoding has no error path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input length is not a multiple of 4.
    #[error("encoded length {0} is not a multiple of 4")]
    BadLength(usize),
    /// A byte outside the alphabet and padding set.
    #[error("invalid symbol 0x{byte:02x} at position {position}")]
    InvalidSymbol { position: usize, byte: u8 },
    /// `=` somewhere the encoder could not have produced it.
    #[error("misplaced padding at position {0}")]
    MisplacedPadding(usize),
}

/// Encode a byte sequence into base64 text.
///
/// Total over all inputs, including the empty one. Output length is always
/// `4 * ceil(n / 3)`; no line wrapping, no whitespace.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    let mut groups = bytes.chunks_exact(3);
    for group in groups.by_ref() {
        // Pack three octets big-endian into 24 bits, split into four
        // 6-bit indices, most significant first.
        let chunk = (group[0] as u32) << 16 | (group[1] as u32) << 8 | group[2] as u32;
        out.push(ALPHABET[(chunk >> 18 & 0x3F) as usize] as char);
        out.push(ALPHABET[(chunk >> 12 & 0x3F) as usize] as char);
        out.push(ALPHABET[(chunk >> 6 & 0x3F) as usize] as char);
        out.push(ALPHABET[(chunk & 0x3F) as usize] as char);
    }

    match groups.remainder() {
        [a] => {
            let chunk = (*a as u32) << 16;
            out.push(ALPHABET[(chunk >> 18 & 0x3F) as usize] as char);
            out.push(ALPHABET[(chunk >> 12 & 0x3F) as usize] as char);
            out.push_str("==");
        }
        [a, b] => {
            let chunk = (*a as u32) << 16 | (*b as u32) << 8;
            out.push(ALPHABET[(chunk >> 18 & 0x3F) as usize] as char);
            out.push(ALPHABET[(chunk >> 12 & 0x3F) as usize] as char);
            out.push(ALPHABET[(chunk >> 6 & 0x3F) as usize] as char);
            out.push(PAD as char);
        }
        _ => {}
    }

    out
}

/// Decode base64 text back into bytes.
///
/// Exact inverse of [`encode`]: rejects lengths that are not a multiple of
/// 4, symbols outside the alphabet, and padding anywhere but the last one
/// or two positions of the final group. Malformed input is never silently
/// corrected.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let input = text.as_bytes();
    if input.len() % 4 != 0 {
        return Err(DecodeError::BadLength(input.len()));
    }

    let group_count = input.len() / 4;
    let mut out = Vec::with_capacity(group_count * 3);

    for (gi, group) in input.chunks_exact(4).enumerate() {
        let base = gi * 4;
        let is_last = gi + 1 == group_count;

        // Padding may only close the final group, as `xx==` or `xxx=`.
        let pads = match group {
            [_, _, _, _] if !is_last => 0,
            [_, _, PAD, PAD] => 2,
            [_, _, _, PAD] => 1,
            _ => 0,
        };
        if let Some(offset) = group.iter().position(|&b| b == PAD) {
            if offset < 4 - pads {
                return Err(DecodeError::MisplacedPadding(base + offset));
            }
        }

        let mut chunk = 0u32;
        for (offset, &byte) in group[..4 - pads].iter().enumerate() {
            let index = REVERSE[byte as usize];
            if index == INVALID {
                return Err(DecodeError::InvalidSymbol {
                    position: base + offset,
                    byte,
                });
            }
            chunk = chunk << 6 | index as u32;
        }
        chunk <<= 6 * pads as u32;

        out.push((chunk >> 16) as u8);
        if pads < 2 {
            out.push((chunk >> 8) as u8);
        }
        if pads < 1 {
            out.push(chunk as u8);
        }
    }

    Ok(out)
}
