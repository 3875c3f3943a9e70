//! Whole-file entry points.

use bytes::Bytes;

use crate::duration::{self, FixOutcome};
use crate::element::Container;
use crate::registry::ids;
use crate::summary::ElementSummary;
use crate::Result;

/// MIME type used when none is given.
pub const DEFAULT_MIME_TYPE: &str = "video/webm";

/// Output buffer tagged with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    mime_type: String,
    data: Bytes,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// A WebM buffer parsed into an element tree.
///
/// Each instance owns its tree; build one per repair and export it once.
#[derive(Debug, Clone)]
pub struct WebmFile {
    root: Container,
}

impl WebmFile {
    /// Parse `source`. Never fails: input that is not WebM simply yields a
    /// tree the repair cannot find anything in.
    pub fn new(source: impl Into<Bytes>) -> Self {
        Self {
            root: Container::parse(source.into()),
        }
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    /// Repair the segment duration. Returns `false` when there was nothing
    /// to repair or the file lacks the elements to do it; the caller should
    /// then keep using the original input.
    pub fn fix_duration(&mut self, duration_ms: f64) -> Result<bool> {
        Ok(self.apply_duration_fix(duration_ms)?.is_fixed())
    }

    /// Like [`WebmFile::fix_duration`], but reports why nothing changed.
    pub fn apply_duration_fix(&mut self, duration_ms: f64) -> Result<FixOutcome> {
        duration::fix_duration(&mut self.root, duration_ms)
    }

    fn info(&self) -> Option<&Container> {
        self.root
            .container(ids::SEGMENT)
            .and_then(|segment| segment.container(ids::INFO))
    }

    /// Current Duration value under Segment/Info.
    pub fn duration(&self) -> Option<f64> {
        self.info()
            .and_then(|info| info.float(ids::DURATION))
            .map(|d| d.value())
    }

    /// Current TimecodeScale value under Segment/Info.
    pub fn timecode_scale(&self) -> Option<u64> {
        self.info()
            .and_then(|info| info.uint(ids::TIMECODE_SCALE))
            .map(|s| s.value())
    }

    pub fn summary(&self) -> Vec<ElementSummary> {
        self.root.summary()
    }

    /// Current bytes of the whole file.
    pub fn to_bytes(&self) -> Bytes {
        self.root.raw().clone()
    }

    /// Export with [`DEFAULT_MIME_TYPE`].
    pub fn to_blob(&self) -> Blob {
        self.to_blob_as(DEFAULT_MIME_TYPE)
    }

    pub fn to_blob_as(&self, mime_type: &str) -> Blob {
        Blob::new(self.to_bytes(), mime_type)
    }
}

/// Repair `input` and return the patched blob, or the untouched input when
/// the repair did not apply.
pub fn fix_webm_duration(
    input: impl Into<Bytes>,
    duration_ms: f64,
    mime_type: &str,
) -> Result<Blob> {
    let input = input.into();
    let mut file = WebmFile::new(input.clone());

    let outcome = file.apply_duration_fix(duration_ms)?;
    if outcome.is_fixed() {
        Ok(file.to_blob_as(mime_type))
    } else {
        tracing::debug!(%outcome, "keeping original input");
        Ok(Blob::new(input, mime_type))
    }
}
