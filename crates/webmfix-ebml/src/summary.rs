//! Read-only view of an element tree for inspection output.

use crate::element::{Child, Container, Element};
use crate::registry::ElementKind;

/// Bytes of opaque content shown in a summary preview.
pub const PREVIEW_LEN: usize = 16;

/// One element in a summary tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ElementSummary {
    #[cfg_attr(feature = "serialize", serde(serialize_with = "serialize_id"))]
    pub id: u64,
    pub name: &'static str,
    pub kind: ElementKind,
    /// Content size in bytes.
    pub size: usize,
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<SummaryValue>,
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<ElementSummary>,
}

/// Decoded leaf value, or a hex preview for opaque content.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum SummaryValue {
    UnsignedInt(u64),
    Float(f64),
    Opaque { preview: String, truncated: bool },
}

impl std::fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsignedInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Opaque { preview, truncated } if *truncated => write!(f, "{}...", preview),
            Self::Opaque { preview, .. } => f.write_str(preview),
        }
    }
}

#[cfg(feature = "serialize")]
fn serialize_id<S: serde::Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:#x}", id))
}

impl ElementSummary {
    fn from_child(child: &Child) -> Self {
        let element = &child.element;
        let (value, children) = match element {
            Element::Container(c) => (None, c.summary()),
            Element::UnsignedInt(u) => (Some(SummaryValue::UnsignedInt(u.value())), Vec::new()),
            Element::Float(f) => (Some(SummaryValue::Float(f.value())), Vec::new()),
            Element::Unknown(raw) => {
                let shown = raw.len().min(PREVIEW_LEN);
                let value = SummaryValue::Opaque {
                    preview: hex::encode(&raw[..shown]),
                    truncated: raw.len() > shown,
                };
                (Some(value), Vec::new())
            }
        };

        Self {
            id: child.id,
            name: child.name(),
            kind: element.kind(),
            size: element.raw().len(),
            value,
            children,
        }
    }
}

impl Container {
    /// Summaries of this container's children, recursively.
    pub fn summary(&self) -> Vec<ElementSummary> {
        self.children().iter().map(ElementSummary::from_child).collect()
    }
}
