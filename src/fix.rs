//! Duration repair for files on disk.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use webmfix_ebml::{FixOutcome, WebmFile};

use crate::config::Config;

/// What a repair did to one file.
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: FixOutcome,
    pub duration_ms: f64,
    pub mime_type: String,
    /// Bytes written to `output`, if anything was written.
    pub written: Option<usize>,
}

impl FixReport {
    pub fn is_fixed(&self) -> bool {
        self.outcome.is_fixed()
    }
}

impl std::fmt::Display for FixReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fixed() {
            write!(
                f,
                "fixed: {} (duration {} ms, {})",
                self.output.display(),
                self.duration_ms,
                self.mime_type
            )
        } else if self.written.is_some() {
            write!(
                f,
                "unchanged: {} ({}, original copied)",
                self.output.display(),
                self.outcome
            )
        } else {
            write!(f, "unchanged: {} ({})", self.input.display(), self.outcome)
        }
    }
}

/// Output path used when none is given: the configured suffix goes before
/// the extension.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(name)
}

/// Repair the duration of `input` and write the result.
///
/// When the file cannot be repaired the original bytes are copied to the
/// output path if `fix.fallback_copy` is set, otherwise nothing is written.
pub fn fix_file(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    duration_ms: f64,
    mime_type: Option<&str>,
) -> Result<FixReport> {
    if !(duration_ms.is_finite() && duration_ms > 0.0) {
        anyhow::bail!(
            "Duration must be a positive number of milliseconds, got {}",
            duration_ms
        );
    }
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, &config.output.suffix));
    let mime_type = mime_type.unwrap_or(&config.output.mime_type).to_string();

    tracing::info!("Fixing duration of {:?}", input);
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read input file: {:?}", input))?;
    tracing::debug!(size = data.len(), "read input");

    let mut file = WebmFile::new(data);
    let outcome = file
        .apply_duration_fix(duration_ms)
        .with_context(|| format!("Failed to re-serialize {:?}", input))?;

    let written = if outcome.is_fixed() || config.fix.fallback_copy {
        // Unfixed trees still hold the original bytes
        let blob = file.to_blob_as(&mime_type);
        std::fs::write(&output, blob.data())
            .with_context(|| format!("Failed to write output file: {:?}", output))?;
        Some(blob.len())
    } else {
        None
    };

    if !outcome.is_fixed() {
        tracing::warn!("Duration of {:?} not fixed: {}", input, outcome);
    }

    Ok(FixReport {
        input: input.to_path_buf(),
        output,
        outcome,
        duration_ms,
        mime_type,
        written,
    })
}
