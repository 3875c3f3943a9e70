//! # webmfix-ebml
//!
//! EBML tree parsing and serialization, and repair of the segment duration
//! in WebM files written by browser recorders.
//!
//! Recorders stream the Info element out before they know how long the
//! recording will be, so the Duration element ends up missing or zero and
//! players cannot seek. This crate parses the container into an element
//! tree, writes the correct duration, and serializes the tree back. Every
//! element that was not on the repaired path is written back byte for byte.
//!
//! ## Modules
//!
//! - `vint` - EBML variable-length integers (IDs and sizes)
//! - `registry` - Known element IDs and how to decode them
//! - `codec` - Unsigned integer and float leaf values
//! - `element` - The element tree
//! - `parser` / `serializer` - Bytes to tree and back
//! - `duration` - The duration repair
//! - `summary` - Read-only element listing for inspection
//! - `file` - `WebmFile` and whole-buffer entry points
//!
//! ## Example
//!
//! ```no_run
//! use webmfix_ebml::WebmFile;
//!
//! let data = std::fs::read("recording.webm").unwrap();
//! let mut file = WebmFile::new(data);
//!
//! if file.fix_duration(5000.0).unwrap() {
//!     std::fs::write("recording.fixed.webm", file.to_blob().data()).unwrap();
//! }
//! ```

pub mod codec;
pub mod duration;
pub mod element;
pub mod error;
pub mod file;
mod parser;
pub mod registry;
pub mod serializer;
pub mod summary;
pub mod vint;

pub use duration::{FixOutcome, TIMECODE_SCALE_MS};
pub use element::{Child, Container, Element, Float, UnsignedInt};
pub use error::{Error, Result};
pub use file::{fix_webm_duration, Blob, WebmFile, DEFAULT_MIME_TYPE};
pub use registry::{ElementKind, Section};
pub use summary::{ElementSummary, SummaryValue};
