pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use mdpad_core::{MarkdownOptions, TabStyle, UrlPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names searched, in order, by [`Config::find_config_file`].
const CONFIG_FILENAMES: [&str; 6] = [
  "mdpad.toml",
  "mdpad.json",
  ".mdpad.toml",
  ".mdpad.json",
  ".config/mdpad.toml",
  ".config/mdpad.json",
];

/// Configuration for the mdpad command-line front end.
///
/// Every field is optional so that several files can be layered: a value
/// left out of a later file does not reset one set by an earlier file. The
/// effective renderer options come from [`Config::markdown_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Settings of the markdown renderer.
  pub markdown: MarkdownConfig,
}

/// The `[markdown]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
  /// Render `~~text~~` as strikethrough.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub strikethrough: Option<bool>,

  /// How to handle hard tabs in fenced code blocks.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tab_style: Option<TabStyle>,

  /// URL schemes accepted in links and images. Replaces the built-in list.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub allowed_schemes: Option<Vec<String>>,
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  #[allow(
    clippy::option_if_let_else,
    reason = "Clearer with explicit match on extension"
  )]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content)
              .map_err(ConfigError::from)
              .map_err(|e| {
                ConfigError::Config(format!(
                  "Failed to parse JSON config from {}: {}",
                  path.display(),
                  e
                ))
              })
          },
          "toml" => {
            toml::from_str(&content)
              .map_err(ConfigError::from)
              .map_err(|e| {
                ConfigError::Config(format!(
                  "Failed to parse TOML config from {}: {}",
                  path.display(),
                  e
                ))
              })
          },
          _ => {
            Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )))
          },
        }
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from the given files (or a discovered one), then
  /// apply `--config KEY=VALUE` overrides.
  ///
  /// Explicit files are merged in order, later files taking precedence. With
  /// no explicit files, the first file found by [`Self::find_config_file`] is
  /// used; with none found, the defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load config from {}: {}",
          first.display(),
          e
        ))
      })?;

      for config_path in rest {
        let additional_config = Self::from_file(config_path).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
          ))
        })?;
        merged_config.merge(additional_config);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load discovered config from {}: {}",
          discovered_config.display(),
          e
        ))
      })?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Keys name a field of a table, for example `markdown.tab_style`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```rust
  /// use mdpad::config::Config;
  ///
  /// let mut config = Config::default();
  /// config
  ///   .apply_overrides(&[
  ///     "markdown.strikethrough=no".to_string(),
  ///     "markdown.allowed_schemes=https, tel".to_string(),
  ///   ])
  ///   .unwrap();
  ///
  /// assert_eq!(config.markdown.strikethrough, Some(false));
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override to the field named by `key`.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "markdown.strikethrough" => {
        self.markdown.strikethrough = Some(parse_bool("strikethrough", value)?);
      },
      "markdown.tab_style" => {
        let style = value.parse::<TabStyle>().map_err(|e| {
          ConfigError::Config(format!(
            "Invalid value for 'tab_style': '{value}' - {e}"
          ))
        })?;
        self.markdown.tab_style = Some(style);
      },
      "markdown.allowed_schemes" => {
        self.markdown.allowed_schemes = Some(
          value
            .split(',')
            .map(str::trim)
            .filter(|scheme| !scheme.is_empty())
            .map(str::to_string)
            .collect(),
        );
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'. See documentation for \
           supported keys."
        )));
      },
    }

    log::debug!("Applied config override: {key}={value}");
    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - Scalar fields: other's [`Some`] value replaces this config's value
  /// - `allowed_schemes`: other's schemes are appended to this config's list,
  ///   skipping duplicates
  pub fn merge(&mut self, other: Self) {
    let MarkdownConfig {
      strikethrough,
      tab_style,
      allowed_schemes,
    } = other.markdown;

    if strikethrough.is_some() {
      self.markdown.strikethrough = strikethrough;
    }
    if tab_style.is_some() {
      self.markdown.tab_style = tab_style;
    }
    if let Some(schemes) = allowed_schemes {
      let merged = self.markdown.allowed_schemes.get_or_insert_with(Vec::new);
      for scheme in schemes {
        if !merged.contains(&scheme) {
          merged.push(scheme);
        }
      }
    }
  }

  /// Resolve the effective renderer options, filling unset fields with the
  /// renderer's defaults.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    let mut options = MarkdownOptions::default();
    if let Some(strikethrough) = self.markdown.strikethrough {
      options.strikethrough = strikethrough;
    }
    if let Some(tab_style) = self.markdown.tab_style {
      options.tab_style = tab_style;
    }
    if let Some(ref schemes) = self.markdown.allowed_schemes {
      options.url_policy = UrlPolicy::new(schemes);
    }
    options
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let current_dir = std::env::current_dir().ok()?;
        if let Some(found) = Self::find_config_file_in(&current_dir) {
          return Some(found);
        }

        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
          let xdg_config_dir = PathBuf::from(xdg_config_home);
          for filename in &["mdpad.toml", "mdpad.json"] {
            let config_path = xdg_config_dir.join(filename);
            if config_path.exists() {
              return Some(config_path);
            }
          }
        }

        if let Ok(home) = std::env::var("HOME") {
          let home_config_dir =
            PathBuf::from(home).join(".config").join("mdpad");
          for filename in &["config.toml", "config.json"] {
            let config_path = home_config_dir.join(filename);
            if config_path.exists() {
              return Some(config_path);
            }
          }
        }

        None
      })
      .clone()
  }

  /// The first of the well-known config file names present in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content)?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{field}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::useless_vec,
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_default_config_yields_default_options() {
    assert_eq!(Config::default().markdown_options(), MarkdownOptions::default());
  }

  #[test]
  fn test_templates_match_defaults() {
    let from_toml: Config =
      toml::from_str(templates::DEFAULT_TOML_TEMPLATE).unwrap();
    let from_json: Config =
      serde_json::from_str(templates::DEFAULT_JSON_TEMPLATE).unwrap();

    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml.markdown_options(), MarkdownOptions::default());
  }

  #[test]
  fn test_config_merge_scalar_fields() {
    let mut base = Config::default();
    base.markdown.strikethrough = Some(false);
    base.markdown.tab_style = Some(TabStyle::Warn);

    let mut override_config = Config::default();
    override_config.markdown.tab_style = Some(TabStyle::Normalize);

    base.merge(override_config);

    // Unset in the override, so the base value survives
    assert_eq!(base.markdown.strikethrough, Some(false));
    assert_eq!(base.markdown.tab_style, Some(TabStyle::Normalize));
  }

  #[test]
  fn test_config_merge_schemes_append() {
    let mut base = Config::default();
    base.markdown.allowed_schemes = Some(vec!["https".to_string()]);

    let mut override_config = Config::default();
    override_config.markdown.allowed_schemes =
      Some(vec!["https".to_string(), "tel".to_string()]);

    base.merge(override_config);

    assert_eq!(
      base.markdown.allowed_schemes,
      Some(vec!["https".to_string(), "tel".to_string()])
    );
  }

  #[test]
  fn test_apply_overrides_boolean() {
    let mut config = Config::default();

    config
      .apply_overrides(&vec!["markdown.strikethrough=no".to_string()])
      .unwrap();
    assert_eq!(config.markdown.strikethrough, Some(false));

    config
      .apply_overrides(&vec!["markdown.strikethrough = YES".to_string()])
      .unwrap();
    assert_eq!(config.markdown.strikethrough, Some(true));
  }

  #[test]
  fn test_apply_overrides_tab_style() {
    let mut config = Config::default();

    config
      .apply_overrides(&vec!["markdown.tab_style=normalize".to_string()])
      .unwrap();

    assert_eq!(config.markdown_options().tab_style, TabStyle::Normalize);
  }

  #[test]
  fn test_apply_overrides_schemes_replace_defaults() {
    let mut config = Config::default();

    config
      .apply_overrides(&vec!["markdown.allowed_schemes=https, tel,".to_string()])
      .unwrap();

    let policy = config.markdown_options().url_policy;
    assert_eq!(policy.allowed_schemes(), ["https", "tel"]);
    assert_eq!(policy.sanitize("http://example.com"), "");
    assert_eq!(policy.sanitize("tel:123"), "tel:123");
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();

    let result = config.apply_overrides(&vec!["no_equals_sign".to_string()]);

    assert!(result.is_err());
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();

    let result = config.apply_overrides(&vec!["strikethrough=true".to_string()]);

    assert!(result.is_err());
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key")
    );
  }

  #[test]
  fn test_apply_overrides_invalid_boolean() {
    let mut config = Config::default();

    let result =
      config.apply_overrides(&vec!["markdown.strikethrough=maybe".to_string()]);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid boolean"));
  }

  #[test]
  fn test_apply_overrides_invalid_tab_style() {
    let mut config = Config::default();

    let result =
      config.apply_overrides(&vec!["markdown.tab_style=spaces".to_string()]);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid value"));
  }

  #[test]
  fn test_serialization_skips_unset_fields() {
    let mut config = Config::default();
    config.markdown.tab_style = Some(TabStyle::Warn);

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"markdown":{"tab_style":"warn"}}"#);
  }
}
