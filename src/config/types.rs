use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub fix: FixConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    /// MIME type attached to the exported recording
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Inserted before the extension when no output path is given
    /// (`rec.webm` -> `rec.fixed.webm`)
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_mime_type() -> String {
    webmfix_ebml::DEFAULT_MIME_TYPE.to_string()
}

fn default_suffix() -> String {
    ".fixed".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mime_type: default_mime_type(),
            suffix: default_suffix(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FixConfig {
    /// Write the untouched input to the output path when nothing was fixed
    #[serde(default = "default_fallback_copy")]
    pub fallback_copy: bool,
}

fn default_fallback_copy() -> bool {
    true
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            fallback_copy: default_fallback_copy(),
        }
    }
}
