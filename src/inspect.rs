//! Element tree listing.

use anyhow::{Context, Result};
use std::fmt::{self, Write};
use std::path::Path;
use webmfix_ebml::{ElementSummary, WebmFile};

/// Parse a file for inspection.
pub fn load(path: &Path) -> Result<WebmFile> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {:?}", path);
    }
    let data = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(WebmFile::new(data))
}

/// Render a summary tree as indented text, one element per line.
pub fn render_tree(summary: &[ElementSummary]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    render_level(&mut out, summary, 0)?;
    Ok(out)
}

fn render_level(out: &mut String, elements: &[ElementSummary], depth: usize) -> fmt::Result {
    for element in elements {
        write!(
            out,
            "{:indent$}{} ({:#x}) {}, {} bytes",
            "",
            element.name,
            element.id,
            element.kind,
            element.size,
            indent = depth * 2
        )?;
        if let Some(ref value) = element.value {
            write!(out, " = {}", value)?;
        }
        out.push('\n');
        render_level(out, &element.children, depth + 1)?;
    }
    Ok(())
}

/// Duration line printed under the tree.
pub fn duration_line(file: &WebmFile) -> String {
    match (file.duration(), file.timecode_scale()) {
        (Some(duration), Some(scale)) => {
            format!("Duration: {} (TimecodeScale {} ns)", duration, scale)
        }
        (None, Some(scale)) => format!("Duration: missing (TimecodeScale {} ns)", scale),
        (Some(duration), None) => format!("Duration: {} (no TimecodeScale)", duration),
        (None, None) => "Duration: missing".to_string(),
    }
}
