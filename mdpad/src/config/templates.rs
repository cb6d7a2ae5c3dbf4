use crate::error::ConfigError;

/// Default configuration template in TOML, commented so that a fresh file
/// explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# mdpad configuration file

[markdown]
# Render ~~text~~ as strikethrough
strikethrough = true

# How to treat hard tabs inside fenced code blocks:
# "none" (leave them), "warn" (leave them and log a warning) or
# "normalize" (replace each tab with two spaces)
tab_style = "none"

# URL schemes accepted in links and images. Relative and protocol-relative
# URLs are always accepted; javascript:, data:, vbscript:, file: and about:
# are always rejected, even if listed here.
allowed_schemes = ["http", "https", "mailto", "ftp", "ftps"]
"#;

/// Default configuration template in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "markdown": {
    "strikethrough": true,
    "tab_style": "none",
    "allowed_schemes": ["http", "https", "mailto", "ftp", "ftps"]
  }
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => {
      Err(ConfigError::Template(format!(
        "Unsupported config format: {format}"
      )))
    },
  }
}
