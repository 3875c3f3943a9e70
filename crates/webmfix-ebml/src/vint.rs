//! EBML variable-length integers.
//!
//! Element IDs and content sizes are both written as vints: the number of
//! leading zero bits in the first byte gives the total width, and the
//! remaining bits hold the value big-endian.
//!
//! ```text
//! 1xxxxxxx                    1 byte,  7 value bits
//! 01xxxxxx xxxxxxxx           2 bytes, 14 value bits
//! 001xxxxx xxxxxxxx xxxxxxxx  3 bytes, 21 value bits
//! ...
//! 00000001 xxxxxxxx ...       8 bytes, 56 value bits
//! ```
//!
//! IDs are kept with their marker bit stripped, exactly as decoded.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Result};

/// Maximum vint width in bytes.
pub const MAX_WIDTH: usize = 8;

/// Largest value an 8-byte vint can carry.
pub const MAX_VALUE: u64 = (1 << (7 * MAX_WIDTH)) - 1;

/// Decode the vint starting at `offset`.
///
/// Returns the value with its length marker removed and the number of
/// bytes consumed.
pub fn decode(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let first = *buf.get(offset).ok_or(Error::Truncated {
        offset,
        need: 1,
        have: 0,
    })?;
    if first == 0 {
        return Err(Error::InvalidVint { offset });
    }

    let width = first.leading_zeros() as usize + 1;
    let have = buf.len() - offset;
    if have < width {
        return Err(Error::Truncated {
            offset,
            need: width,
            have,
        });
    }

    let mut value = u64::from(first) & (0xFF >> width);
    for &byte in &buf[offset + 1..offset + width] {
        value = (value << 8) | u64::from(byte);
    }

    Ok((value, width))
}

/// Smallest width whose value ceiling (2^(7*width)) is above `value`.
pub fn min_width(value: u64) -> Result<usize> {
    (1..=MAX_WIDTH)
        .find(|&width| value < 1u64 << (7 * width))
        .ok_or(Error::VintOverflow(value))
}

/// Width used to write `value`, never narrower than `at_least`.
///
/// `at_least` is the width the field had when it was parsed (0 for new
/// fields), which keeps padded size fields byte-identical.
pub fn width_for(value: u64, at_least: usize) -> Result<usize> {
    Ok(min_width(value)?.max(at_least.min(MAX_WIDTH)))
}

/// The reserved "unknown size" value at `width`: every value bit set.
pub fn unknown_size(width: usize) -> u64 {
    (1u64 << (7 * width.clamp(1, MAX_WIDTH))) - 1
}

/// Whether a size field of `width` bytes holds the unknown-size marker.
pub fn is_unknown_size(value: u64, width: usize) -> bool {
    (1..=MAX_WIDTH).contains(&width) && value == unknown_size(width)
}

/// Width used to write a known element size.
///
/// Like [`width_for`], but steps past any width at which `value` would read
/// back as the unknown-size marker (a 127-byte element needs two bytes).
pub fn size_width_for(value: u64, at_least: usize) -> Result<usize> {
    let width = width_for(value, at_least)?;
    if !is_unknown_size(value, width) {
        Ok(width)
    } else if width < MAX_WIDTH {
        Ok(width + 1)
    } else {
        Err(Error::VintOverflow(value))
    }
}

/// Write `value` as a vint of exactly `width` bytes.
///
/// `width` must come from [`width_for`] or [`min_width`] for this value.
pub fn put(buf: &mut BytesMut, value: u64, width: usize) {
    debug_assert!((1..=MAX_WIDTH).contains(&width));
    debug_assert!(value < 1u64 << (7 * width));

    let encoded = (1u64 << (7 * width)) | value;
    buf.put_slice(&encoded.to_be_bytes()[MAX_WIDTH - width..]);
}

/// Encode `value` with the minimal width.
pub fn encode(value: u64) -> Result<Bytes> {
    let width = min_width(value)?;
    let mut buf = BytesMut::with_capacity(width);
    put(&mut buf, value, width);
    Ok(buf.freeze())
}
