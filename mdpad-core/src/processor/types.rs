//! Type definitions for the Markdown processor.
//!
//! Contains the configuration options (`MarkdownOptions`), the processor
//! struct (`MarkdownProcessor`) and a builder for the options.
//!
//! # Examples
//!
//! ```
//! use mdpad_core::{MarkdownOptions, MarkdownProcessor, TabStyle};
//!
//! let options = MarkdownOptions {
//!   strikethrough: false,
//!   tab_style: TabStyle::Normalize,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::sanitize::UrlPolicy;

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
  /// Render `~~text~~` as `<del>` (and style it in the highlighter).
  pub strikethrough: bool,

  /// How to handle hard tabs in fenced code blocks.
  pub tab_style: TabStyle,

  /// Protocol whitelist for link and image targets.
  pub url_policy: UrlPolicy,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      strikethrough: true,
      tab_style:     TabStyle::None,
      url_policy:    UrlPolicy::default(),
    }
  }
}

/// Configuration for handling hard tabs in code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStyle {
  /// Leave hard tabs unchanged
  #[default]
  None,
  /// Issue a warning when hard tabs are detected
  Warn,
  /// Automatically convert hard tabs to spaces (using 2 spaces per tab)
  Normalize,
}

/// Error returned when parsing an unknown [`TabStyle`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab style '{0}', expected one of: none, warn, normalize")]
pub struct ParseTabStyleError(String);

impl FromStr for TabStyle {
  type Err = ParseTabStyleError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "none" => Ok(Self::None),
      "warn" => Ok(Self::Warn),
      "normalize" => Ok(Self::Normalize),
      _ => Err(ParseTabStyleError(s.to_string())),
    }
  }
}

impl fmt::Display for TabStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::None => "none",
      Self::Warn => "warn",
      Self::Normalize => "normalize",
    };
    f.write_str(name)
  }
}

/// Main Markdown processor.
///
/// Immutable after construction. Every call builds its own extraction
/// context, so one processor can serve any number of interleaved or
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable strikethrough.
  #[must_use]
  pub const fn strikethrough(mut self, enabled: bool) -> Self {
    self.options.strikethrough = enabled;
    self
  }

  /// Set how to handle hard tabs in code blocks.
  #[must_use]
  pub const fn tab_style(mut self, style: TabStyle) -> Self {
    self.options.tab_style = style;
    self
  }

  /// Replace the URL policy.
  #[must_use]
  pub fn url_policy(mut self, policy: UrlPolicy) -> Self {
    self.options.url_policy = policy;
    self
  }

  /// Allow additional URL schemes on top of the current policy.
  #[must_use]
  pub fn allow_schemes<I, S>(mut self, schemes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.options.url_policy = self.options.url_policy.with_allowed_schemes(schemes);
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}
