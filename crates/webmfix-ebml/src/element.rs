//! EBML element tree.
//!
//! Every element keeps its content bytes alongside the decoded value. The two
//! are kept in step by one-directional operations: `from_bytes`/`set_bytes`
//! derive the value from content, `set_value`/`rebuild` derive content from
//! the value.

use bytes::Bytes;

use crate::codec::{self, FloatPrecision};
use crate::registry::{self, ElementKind};
use crate::{parser, serializer, Error, Result};

/// Containers nested deeper than this are kept as opaque bytes.
pub const MAX_DEPTH: usize = 64;

/// A child entry inside a container.
#[derive(Debug, Clone)]
pub struct Child {
    /// Element ID, marker bit stripped.
    pub id: u64,
    /// Width of the ID field as parsed (0 for new children).
    pub(crate) id_width: usize,
    /// Width of the size field as parsed (0 for new children).
    pub(crate) size_width: usize,
    /// Size field held the unknown-size marker; it is written back as is.
    pub(crate) unknown_size: bool,
    pub element: Element,
}

impl Child {
    /// New child written with minimal header widths.
    pub fn new(id: u64, element: Element) -> Self {
        Self {
            id,
            id_width: 0,
            size_width: 0,
            unknown_size: false,
            element,
        }
    }

    /// Whether this child was parsed with an unknown size (streaming
    /// writers leave Segment and Cluster sizes open).
    pub fn is_unknown_size(&self) -> bool {
        self.unknown_size
    }

    /// Registered name for this child's ID.
    pub fn name(&self) -> &'static str {
        registry::lookup(self.id).name
    }
}

/// A parsed element.
#[derive(Debug, Clone)]
pub enum Element {
    Container(Container),
    UnsignedInt(UnsignedInt),
    Float(Float),
    /// Opaque content, written back verbatim.
    Unknown(Bytes),
}

impl Element {
    /// Build an element of `kind` from its content bytes.
    pub fn from_bytes(kind: ElementKind, raw: Bytes) -> Self {
        Self::from_bytes_at(kind, raw, 0)
    }

    pub(crate) fn from_bytes_at(kind: ElementKind, raw: Bytes, depth: usize) -> Self {
        match kind {
            ElementKind::Container if depth < MAX_DEPTH => {
                Self::Container(Container::parse_at(raw, depth + 1))
            }
            ElementKind::Container => {
                tracing::debug!(depth, "nesting limit reached, keeping container opaque");
                Self::Unknown(raw)
            }
            ElementKind::UnsignedInt => Self::UnsignedInt(UnsignedInt::from_bytes(raw)),
            ElementKind::Float => Self::Float(Float::from_bytes(raw)),
            ElementKind::Unknown => Self::Unknown(raw),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Container(_) => ElementKind::Container,
            Self::UnsignedInt(_) => ElementKind::UnsignedInt,
            Self::Float(_) => ElementKind::Float,
            Self::Unknown(_) => ElementKind::Unknown,
        }
    }

    /// Content bytes, excluding this element's own ID and size header.
    pub fn raw(&self) -> &Bytes {
        match self {
            Self::Container(c) => c.raw(),
            Self::UnsignedInt(u) => u.raw(),
            Self::Float(f) => f.raw(),
            Self::Unknown(raw) => raw,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Self::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Self::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<&UnsignedInt> {
        match self {
            Self::UnsignedInt(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_uint_mut(&mut self) -> Option<&mut UnsignedInt> {
        match self {
            Self::UnsignedInt(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_float_mut(&mut self) -> Option<&mut Float> {
        match self {
            Self::Float(f) => Some(f),
            _ => None,
        }
    }
}

/// Unsigned integer leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedInt {
    raw: Bytes,
    value: u64,
}

impl UnsignedInt {
    pub fn new(value: u64) -> Self {
        Self {
            raw: codec::encode_uint(value),
            value,
        }
    }

    pub fn from_bytes(raw: Bytes) -> Self {
        let value = codec::decode_uint(&raw);
        Self { raw, value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn set_value(&mut self, value: u64) {
        self.raw = codec::encode_uint(value);
        self.value = value;
    }

    pub fn set_bytes(&mut self, raw: Bytes) {
        *self = Self::from_bytes(raw);
    }
}

/// Float leaf. Keeps the precision of the content it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    raw: Bytes,
    value: f64,
}

impl Float {
    /// New double-precision float.
    pub fn new(value: f64) -> Self {
        Self {
            raw: codec::encode_float(value, FloatPrecision::Double),
            value,
        }
    }

    pub fn from_bytes(raw: Bytes) -> Self {
        let value = codec::decode_float(&raw);
        Self { raw, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn precision(&self) -> FloatPrecision {
        FloatPrecision::for_len(self.raw.len())
    }

    /// Store `value` at the current precision.
    ///
    /// Single-precision content rounds the value; the stored value is read
    /// back from the written bytes.
    pub fn set_value(&mut self, value: f64) {
        self.raw = codec::encode_float(value, self.precision());
        self.value = codec::decode_float(&self.raw);
    }

    pub fn set_bytes(&mut self, raw: Bytes) {
        *self = Self::from_bytes(raw);
    }
}

/// Element whose content is a sequence of children.
///
/// `raw` reflects `children` as of the last parse or [`Container::rebuild`].
/// Mutating a child through [`Container::get_mut`] leaves `raw` stale until
/// `rebuild` runs on this container and on every ancestor.
#[derive(Debug, Clone, Default)]
pub struct Container {
    raw: Bytes,
    children: Vec<Child>,
}

impl Container {
    /// Parse children out of `raw`. Never fails; malformed or truncated
    /// content yields a shorter child list.
    pub fn parse(raw: Bytes) -> Self {
        Self::parse_at(raw, 0)
    }

    pub(crate) fn parse_at(raw: Bytes, depth: usize) -> Self {
        let children = parser::parse_children(&raw, depth);
        Self { raw, children }
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First child with `id`.
    pub fn get(&self, id: u64) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.id == id)
            .map(|child| &child.element)
    }

    /// First child with `id`, mutably. See the type docs about `rebuild`.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .find(|child| child.id == id)
            .map(|child| &mut child.element)
    }

    pub fn container(&self, id: u64) -> Option<&Container> {
        self.get(id).and_then(Element::as_container)
    }

    pub fn container_mut(&mut self, id: u64) -> Option<&mut Container> {
        self.get_mut(id).and_then(Element::as_container_mut)
    }

    pub fn uint(&self, id: u64) -> Option<&UnsignedInt> {
        self.get(id).and_then(Element::as_uint)
    }

    pub fn uint_mut(&mut self, id: u64) -> Option<&mut UnsignedInt> {
        self.get_mut(id).and_then(Element::as_uint_mut)
    }

    pub fn float(&self, id: u64) -> Option<&Float> {
        self.get(id).and_then(Element::as_float)
    }

    pub fn float_mut(&mut self, id: u64) -> Option<&mut Float> {
        self.get_mut(id).and_then(Element::as_float_mut)
    }

    /// Append a child after all existing ones and rebuild this container.
    pub fn push(&mut self, id: u64, element: Element) -> Result<()> {
        self.children.push(Child::new(id, element));
        self.rebuild()
    }

    /// Replace the content and re-derive the children from it.
    pub fn set_bytes(&mut self, raw: Bytes) {
        *self = Self::parse(raw);
    }

    /// Re-derive the content bytes from the children's current content.
    ///
    /// Only direct children are written; their own content is taken as is.
    pub fn rebuild(&mut self) -> Result<()> {
        self.raw = serializer::serialize(&self.children)?;
        Ok(())
    }

    /// Rebuild the containers along `path` bottom-up, finishing with `self`.
    ///
    /// Each step follows the first child with the given ID, which must be a
    /// container.
    pub fn rebuild_path(&mut self, path: &[u64]) -> Result<()> {
        if let Some((&id, rest)) = path.split_first() {
            self.container_mut(id)
                .ok_or(Error::NotAContainer { id })?
                .rebuild_path(rest)?;
        }
        self.rebuild()
    }
}
