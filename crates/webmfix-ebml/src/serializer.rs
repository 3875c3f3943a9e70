//! Element tree to bytes.
//!
//! Serialization is two passes over the same children: a draft pass that
//! only sums header and content widths, then a final pass into a buffer
//! allocated to exactly that size.

use bytes::{BufMut, Bytes, BytesMut};

use crate::element::Child;
use crate::{vint, Result};

enum Pass<'a> {
    /// Advance the cursor only.
    Draft,
    /// Write into the buffer.
    Final(&'a mut BytesMut),
}

/// Total encoded size of `children`, headers included.
pub fn encoded_len(children: &[Child]) -> Result<usize> {
    write_sections(children, &mut Pass::Draft)
}

/// Serialize `children` into a freshly allocated buffer.
pub fn serialize(children: &[Child]) -> Result<Bytes> {
    let size = encoded_len(children)?;
    let mut buf = BytesMut::with_capacity(size);
    let written = write_sections(children, &mut Pass::Final(&mut buf))?;
    debug_assert_eq!(written, size);
    debug_assert_eq!(buf.len(), size);
    Ok(buf.freeze())
}

fn write_sections(children: &[Child], pass: &mut Pass<'_>) -> Result<usize> {
    let mut offset = 0;

    for child in children {
        let content = child.element.raw();
        let content_len = content.len() as u64;
        let id_width = vint::width_for(child.id, child.id_width)?;
        // Unknown sizes stay open at their parsed width
        let (size, size_width) = if child.unknown_size {
            (vint::unknown_size(child.size_width), child.size_width)
        } else {
            (content_len, vint::size_width_for(content_len, child.size_width)?)
        };

        if let Pass::Final(buf) = pass {
            vint::put(buf, child.id, id_width);
            vint::put(buf, size, size_width);
            buf.put_slice(content);
        }

        offset += id_width + size_width + content.len();
    }

    Ok(offset)
}
