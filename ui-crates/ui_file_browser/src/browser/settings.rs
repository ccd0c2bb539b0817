use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::error::SettingsError;
use super::types::{SortBy, SortOrder};

// ============================================================================
// BROWSER SETTINGS - browser.toml
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// How long a press must be held before it enters select mode
    pub long_press_threshold_ms: u64,
    /// How long `Success` stays up before the upload tracker returns to `Idle`
    pub upload_reset_delay_ms: u64,
    pub default_sort_by: SortBy,
    pub default_sort_order: SortOrder,
    pub show_hidden_files: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            long_press_threshold_ms: 500,
            upload_reset_delay_ms: 2000,
            default_sort_by: SortBy::Name,
            default_sort_order: SortOrder::Ascending,
            show_hidden_files: false,
        }
    }
}

impl BrowserSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read settings from disk. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn long_press_threshold(&self) -> Duration {
        Duration::from_millis(self.long_press_threshold_ms)
    }

    pub fn upload_reset_delay(&self) -> Duration {
        Duration::from_millis(self.upload_reset_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = BrowserSettings::from_toml_str(
            r#"
            long_press_threshold_ms = 300
            default_sort_by = "size"
            "#,
        )
        .unwrap();

        assert_eq!(settings.long_press_threshold(), Duration::from_millis(300));
        assert_eq!(settings.default_sort_by, SortBy::Size);
        assert_eq!(settings.upload_reset_delay_ms, 2000);
        assert!(!settings.show_hidden_files);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let result = BrowserSettings::from_toml_str(r#"default_sort_by = "colour""#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = BrowserSettings::load(&dir.path().join("browser.toml")).unwrap();
        assert_eq!(settings, BrowserSettings::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.toml");
        fs::write(&path, "show_hidden_files = true\ndefault_sort_order = \"descending\"\n").unwrap();

        let settings = BrowserSettings::load(&path).unwrap();

        assert!(settings.show_hidden_files);
        assert_eq!(settings.default_sort_order, SortOrder::Descending);
    }
}
