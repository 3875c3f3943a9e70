mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./webmfix.toml",
        "~/.config/webmfix/config.toml",
        "/etc/webmfix/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let mime_type = config.output.mime_type.trim();
    if mime_type.is_empty() || !mime_type.contains('/') {
        anyhow::bail!(
            "Output MIME type '{}' is not of the form type/subtype",
            config.output.mime_type
        );
    }

    let suffix = &config.output.suffix;
    if suffix.is_empty() {
        anyhow::bail!("Output suffix cannot be empty");
    }
    if suffix.contains('/') || suffix.contains('\\') {
        anyhow::bail!("Output suffix '{}' cannot contain a path separator", suffix);
    }

    Ok(())
}
