//! Leaf value codecs: big-endian unsigned integers and IEEE floats.

use bytes::{BufMut, Bytes, BytesMut};

/// Decode big-endian unsigned integer content.
///
/// Empty content is 0. Content wider than 8 bytes keeps its low 64 bits.
pub fn decode_uint(raw: &[u8]) -> u64 {
    raw.iter()
        .fold(0u64, |value, &byte| (value << 8) | u64::from(byte))
}

/// Encode an unsigned integer in its shortest big-endian form (at least one byte).
pub fn encode_uint(value: u64) -> Bytes {
    let bytes = value.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    Bytes::copy_from_slice(&bytes[start..])
}

/// Storage width of a float element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPrecision {
    /// 4-byte IEEE-754 single.
    Single,
    /// 8-byte IEEE-754 double.
    Double,
}

impl FloatPrecision {
    /// Precision to write back for content of `len` bytes.
    ///
    /// Only 4-byte content stays single precision; everything else is
    /// written as a double.
    pub fn for_len(len: usize) -> Self {
        if len == 4 {
            Self::Single
        } else {
            Self::Double
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            Self::Single => 4,
            Self::Double => 8,
        }
    }
}

/// Decode big-endian float content.
///
/// Empty content is 0.0. Lengths other than 0, 4 and 8 are not valid
/// floats and decode to NaN.
pub fn decode_float(raw: &[u8]) -> f64 {
    match raw.len() {
        0 => 0.0,
        4 => f64::from(f32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]])),
        8 => f64::from_be_bytes([
            raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
        ]),
        _ => f64::NAN,
    }
}

/// Encode a float big-endian at the given precision.
pub fn encode_float(value: f64, precision: FloatPrecision) -> Bytes {
    let mut buf = BytesMut::with_capacity(precision.byte_len());
    match precision {
        FloatPrecision::Single => buf.put_f32(value as f32),
        FloatPrecision::Double => buf.put_f64(value),
    }
    buf.freeze()
}
