//! Segment duration repair.
//!
//! Recorders that stream WebM write the Info element before the length of
//! the recording is known, leaving Duration missing or zero. The repair
//! walks `Segment -> Info`, writes the caller's duration, pins
//! TimecodeScale to one millisecond and re-serializes the path back up to
//! the root.
//!
//! A Duration that is already positive is never overwritten, so running
//! the repair twice is a no-op the second time.

use crate::element::{Container, Element, Float};
use crate::registry::ids;
use crate::Result;

/// TimecodeScale written by the repair: 1,000,000 ns, so Duration is in ms.
pub const TIMECODE_SCALE_MS: u64 = 1_000_000;

/// Result of a repair attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum FixOutcome {
    /// Duration written and the tree re-serialized.
    Fixed,
    /// Duration already positive; nothing changed.
    AlreadyValid,
    MissingSegment,
    MissingInfo,
    /// Info has no TimecodeScale to normalize.
    MissingTimecodeScale,
    /// Requested duration is not a positive finite number.
    InvalidDuration,
}

impl FixOutcome {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed)
    }

    /// Short human-readable reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::AlreadyValid => "duration already set",
            Self::MissingSegment => "no Segment element",
            Self::MissingInfo => "no Info element in Segment",
            Self::MissingTimecodeScale => "no TimecodeScale element in Info",
            Self::InvalidDuration => "requested duration is not a positive finite number",
        }
    }
}

impl std::fmt::Display for FixOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repair the duration under `root`, mutating it in place.
///
/// Anything other than [`FixOutcome::Fixed`] leaves the tree untouched.
/// Errors only come from re-serialization.
pub fn fix_duration(root: &mut Container, duration_ms: f64) -> Result<FixOutcome> {
    if !(duration_ms.is_finite() && duration_ms > 0.0) {
        tracing::warn!(
            duration_ms,
            "refusing to write a duration that is not positive and finite"
        );
        return Ok(FixOutcome::InvalidDuration);
    }

    let Some(segment) = root.container_mut(ids::SEGMENT) else {
        tracing::debug!("no Segment element, cannot fix duration");
        return Ok(FixOutcome::MissingSegment);
    };
    let Some(info) = segment.container_mut(ids::INFO) else {
        tracing::debug!("no Info element, cannot fix duration");
        return Ok(FixOutcome::MissingInfo);
    };
    if info.uint(ids::TIMECODE_SCALE).is_none() {
        tracing::debug!("no TimecodeScale element, cannot fix duration");
        return Ok(FixOutcome::MissingTimecodeScale);
    }

    match info.float_mut(ids::DURATION) {
        Some(duration) if duration.value() > 0.0 => {
            tracing::debug!(existing = duration.value(), "duration already set");
            return Ok(FixOutcome::AlreadyValid);
        }
        Some(duration) => {
            tracing::debug!(previous = duration.value(), "overwriting invalid duration");
            duration.set_value(duration_ms);
        }
        None => {
            tracing::debug!("no Duration element, appending one");
            info.push(ids::DURATION, Element::Float(Float::new(duration_ms)))?;
        }
    }

    if let Some(scale) = info.uint_mut(ids::TIMECODE_SCALE) {
        scale.set_value(TIMECODE_SCALE_MS);
    }

    root.rebuild_path(&[ids::SEGMENT, ids::INFO])?;
    tracing::info!(duration_ms, size = root.raw().len(), "duration fixed");

    Ok(FixOutcome::Fixed)
}
