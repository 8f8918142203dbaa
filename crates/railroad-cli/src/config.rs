//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{fs, path::Path};

use directories::ProjectDirs;
use log::{debug, info};

use railroad::config::AppConfig;

use crate::error::{CliError, ConfigError};

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (railroad/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - The text section names an unknown glyph or a bad override
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("railroad/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "railroad", "railroad") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    // Glyph overrides are only checked when resolved.
    config
        .text_style()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        (dir, path)
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_dir, path) = write_config("[layout]\narc_radius = 12.0\n");
        let config = load_config(Some(&path)).expect("valid config");
        assert_eq!(config.layout().arc_radius(), 12.0);
        assert_eq!(config.layout().vertical_separation(), 8.0);
        assert_eq!(config.style().diagram_class(), "railroad-diagram");
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some("does/not/exist.toml"));
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::MissingFile(_)))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let (_dir, path) = write_config("[layout\narc_radius = ");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_bad_glyph_override_is_rejected() {
        let (_dir, path) = write_config("[text.overrides]\nline = \"==\"\n");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::Config(ConfigError::Validation(_)))
        ));

        let (_dir, path) = write_config("[text.overrides]\nno_such_glyph = \"x\"\n");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::Config(ConfigError::Validation(_)))
        ));
    }

    #[test]
    fn test_text_section() {
        let (_dir, path) = write_config("[text]\nglyphs = \"ascii\"\nescape_html = true\n");
        let config = load_config(Some(&path)).expect("valid config");
        assert!(config.text().escape_html());
    }
}
