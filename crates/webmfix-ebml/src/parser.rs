//! Bytes to element tree.
//!
//! A container's content is read as a flat run of `id | size | content`
//! triples until it is exhausted. There is no checksum in the format, so
//! a malformed header ends the run and a size running past the buffer is
//! clamped to what is left; neither is reported as an error.
//!
//! A size field holding the unknown-size marker (all value bits set) is what
//! streaming writers emit for Segment and Cluster. Such an element runs
//! until the first element that cannot belong to it, or the buffer end.

use bytes::Bytes;

use crate::element::{Child, Element};
use crate::{registry, vint};

/// Parse the children of a container at nesting `depth`.
pub(crate) fn parse_children(raw: &Bytes, depth: usize) -> Vec<Child> {
    let mut children = Vec::new();
    let mut offset = 0;

    while offset < raw.len() {
        let (id, id_width) = match vint::decode(raw, offset) {
            Ok(field) => field,
            Err(e) => {
                tracing::debug!(error = %e, depth, "stopping at malformed element id");
                break;
            }
        };
        offset += id_width;

        let (size, size_width) = match vint::decode(raw, offset) {
            Ok(field) => field,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    id = %format_args!("{id:#x}"),
                    depth,
                    "stopping at malformed element size"
                );
                break;
            }
        };
        offset += size_width;

        let unknown_size = vint::is_unknown_size(size, size_width);
        let end = if unknown_size {
            unknown_size_end(raw, offset, id)
        } else {
            let declared = usize::try_from(size).unwrap_or(usize::MAX);
            let end = offset.saturating_add(declared).min(raw.len());
            if end - offset < declared {
                tracing::debug!(
                    id = %format_args!("{id:#x}"),
                    declared = size,
                    available = end - offset,
                    "element content clamped to buffer end"
                );
            }
            end
        };

        let section = registry::lookup(id);
        tracing::trace!(
            id = %format_args!("{id:#x}"),
            name = section.name,
            kind = %section.kind,
            size = end - offset,
            unknown_size,
            depth,
            "parsed element"
        );

        children.push(Child {
            id,
            id_width,
            size_width,
            unknown_size,
            element: Element::from_bytes_at(section.kind, raw.slice(offset..end), depth),
        });
        offset = end;
    }

    children
}

/// End of the content of an unknown-size `parent` starting at `start`.
///
/// Walks the headers of the content without descending into it and stops
/// at the first element that closes `parent`. A nested unknown size or a
/// malformed header extends the content to the buffer end.
fn unknown_size_end(raw: &[u8], start: usize, parent: u64) -> usize {
    let mut offset = start;

    while offset < raw.len() {
        let Ok((id, id_width)) = vint::decode(raw, offset) else {
            return raw.len();
        };
        if registry::ends_unknown_size(parent, id) {
            return offset;
        }
        let Ok((size, size_width)) = vint::decode(raw, offset + id_width) else {
            return raw.len();
        };
        if vint::is_unknown_size(size, size_width) {
            return raw.len();
        }
        let declared = usize::try_from(size).unwrap_or(usize::MAX);
        offset = (offset + id_width + size_width).saturating_add(declared);
    }

    raw.len()
}
