use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calculator::{FluidSizingCalculator, DEFAULT_ROOT_FONT_SIZE_PIXEL};
use crate::errors::{FluidError, Result};
use crate::shorthand::ScreenTable;

/// Fluid sizing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidSizingConfig {
    /// Breakpoint name -> screen length, plus `DEFAULT_FROM` / `DEFAULT_TO`
    pub screens: IndexMap<String, Option<String>>,

    /// Pixels per `rem`
    #[serde(alias = "rootFontSizePixel")]
    pub root_font_size_pixel: f64,

    /// Named shorthands per theme key, e.g. `margin.card: "md 32px, xl 64px"`
    pub values: IndexMap<String, IndexMap<String, NamedValue>>,
}

impl Default for FluidSizingConfig {
    fn default() -> Self {
        Self {
            screens: IndexMap::new(),
            root_font_size_pixel: DEFAULT_ROOT_FONT_SIZE_PIXEL,
            values: IndexMap::new(),
        }
    }
}

/// A configured shorthand, either whole or split into its two segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedValue {
    Shorthand(String),
    Segments(Vec<String>),
}

impl NamedValue {
    /// The value as a single comma-separated shorthand
    pub fn to_shorthand(&self) -> String {
        match self {
            NamedValue::Shorthand(value) => value.clone(),
            NamedValue::Segments(segments) => segments.join(","),
        }
    }
}

impl FluidSizingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FluidError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FluidError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(FluidError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Reject settings the calculator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.root_font_size_pixel.is_finite() || self.root_font_size_pixel <= 0.0 {
            return Err(FluidError::ConfigError {
                message: format!(
                    "root_font_size_pixel must be a positive number, got {}",
                    self.root_font_size_pixel
                ),
            });
        }
        Ok(())
    }

    pub fn screen_table(&self) -> ScreenTable {
        ScreenTable::from_entries(
            self.screens
                .iter()
                .map(|(name, raw)| (name.as_str(), raw.clone())),
        )
    }

    pub fn calculator(&self) -> FluidSizingCalculator {
        FluidSizingCalculator::new(self.root_font_size_pixel)
    }

    /// Look up a named shorthand for a theme key
    pub fn named_value(&self, theme_key: &str, name: &str) -> Option<String> {
        self.values
            .get(theme_key)
            .and_then(|values| values.get(name))
            .map(NamedValue::to_shorthand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = FluidSizingConfig::default();
        assert!(config.screens.is_empty());
        assert_eq!(config.root_font_size_pixel, 16.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_config_loading() {
        let yaml_content = r##"
screens:
  md: 768px
  xl: 1280px
  DEFAULT_FROM: 768px
  DEFAULT_TO: 1280px
root_font_size_pixel: 10
values:
  margin:
    array: ["md 32px", "xl 64px"]
    string: "md 32px, xl 64px"
"##;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = FluidSizingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.root_font_size_pixel, 10.0);

        let screens = config.screen_table();
        assert_eq!(screens.get("md"), Some("768px"));
        assert_eq!(screens.default_from(), Some("768px"));
        assert_eq!(screens.default_to(), Some("1280px"));
        assert!(!screens.contains("DEFAULT_FROM"));

        assert_eq!(config.named_value("margin", "array").as_deref(), Some("md 32px,xl 64px"));
        assert_eq!(config.named_value("margin", "string").as_deref(), Some("md 32px, xl 64px"));
        assert_eq!(config.named_value("padding", "array"), None);
    }

    #[test]
    fn test_json_config_loading() {
        let json_content = r##"{
  "screens": { "md": "768px", "lg": null },
  "rootFontSizePixel": 18
}"##;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json_content.as_bytes()).unwrap();

        let config = FluidSizingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.root_font_size_pixel, 18.0);
        assert_eq!(config.screens.get("lg"), Some(&None));
        assert!(!config.screen_table().contains("lg"));
    }

    #[test]
    fn test_invalid_root_font_size() {
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(b"root_font_size_pixel: 0\n").unwrap();

        let err = FluidSizingConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("root_font_size_pixel"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let err = FluidSizingConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }

    #[test]
    fn test_malformed_config_files() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(b"screens: [unclosed\n").unwrap();
        let err = FluidSizingConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, FluidError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML parsing error"));

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"rootFontSizePixel": "big"}"#).unwrap();
        let err = FluidSizingConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, FluidError::Json(_)));
    }
}
