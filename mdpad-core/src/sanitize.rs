//! URL sanitization for link and image targets.
//!
//! The judgement is made on a normalized copy of the URL: percent-decoded,
//! lowercased, and stripped of whitespace and control characters. The
//! caller gets back the original trimmed string when it is accepted, so
//! already-encoded URLs keep their encoding.
//!
//! # Examples
//!
//! ```
//! use mdpad_core::sanitize;
//!
//! assert_eq!(sanitize("  https://example.com "), "https://example.com");
//! assert_eq!(sanitize("JaVaScRiPt:alert(1)"), "");
//! assert_eq!(sanitize("javascript%3Aalert(1)"), "");
//! assert_eq!(sanitize("../notes.md"), "../notes.md");
//! ```

use std::sync::LazyLock;

use log::warn;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::compile_regex;

/// Schemes that are rejected no matter what the allow list says.
pub const DENIED_SCHEMES: &[&str] =
  &["javascript:", "data:", "vbscript:", "file:", "about:"];

/// Schemes accepted by [`UrlPolicy::default`].
pub const DEFAULT_ALLOWED_SCHEMES: &[&str] =
  &["http", "https", "mailto", "ftp", "ftps"];

static SCHEME_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("SCHEME_RE", r"^([a-z][a-z0-9+.\-]*):"));

static DEFAULT_POLICY: LazyLock<UrlPolicy> = LazyLock::new(UrlPolicy::default);

/// Why a URL was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsafeUrl {
  #[error("malformed percent-encoding")]
  MalformedEncoding,
  #[error("scheme '{0}:' is never allowed")]
  DeniedScheme(String),
  #[error("scheme '{0}:' is not in the allow list")]
  UnknownScheme(String),
}

/// Protocol whitelist applied to link and image targets.
///
/// Only the allow list is configurable. [`DENIED_SCHEMES`] is checked first
/// and cannot be overridden by listing one of its schemes as allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlPolicy {
  /// Allowed schemes, without the trailing colon.
  allowed_schemes: Vec<String>,
}

impl Default for UrlPolicy {
  fn default() -> Self {
    Self::new(DEFAULT_ALLOWED_SCHEMES.iter().copied())
  }
}

impl UrlPolicy {
  /// Create a policy that allows exactly the given schemes.
  ///
  /// Schemes are matched case-insensitively; a trailing `:` is ignored.
  pub fn new<I, S>(schemes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      allowed_schemes: schemes
        .into_iter()
        .map(|s| normalize_scheme(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect(),
    }
  }

  /// Extend the allow list with additional schemes.
  #[must_use]
  pub fn with_allowed_schemes<I, S>(mut self, schemes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for scheme in schemes {
      let scheme = normalize_scheme(scheme.as_ref());
      if !scheme.is_empty() && !self.allows(&scheme) {
        self.allowed_schemes.push(scheme);
      }
    }
    self
  }

  /// The currently allowed schemes.
  #[must_use]
  pub fn allowed_schemes(&self) -> &[String] {
    &self.allowed_schemes
  }

  fn allows(&self, scheme: &str) -> bool {
    self
      .allowed_schemes
      .iter()
      .any(|allowed| normalize_scheme(allowed) == scheme)
  }

  /// Judge `url`, returning the trimmed original on success.
  ///
  /// An empty (or whitespace-only) URL is accepted and returned as an empty
  /// string.
  ///
  /// # Errors
  ///
  /// Returns [`UnsafeUrl`] describing why the URL was refused.
  pub fn check(&self, url: &str) -> Result<String, UnsafeUrl> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
      return Ok(String::new());
    }

    let normalized: String = decode_percent(trimmed)?
      .chars()
      .filter(|c| !c.is_whitespace() && !c.is_control())
      .flat_map(char::to_lowercase)
      .collect();

    // Deny list goes first so an encoded dangerous scheme never reaches the
    // allow-list lookup
    if let Some(denied) = DENIED_SCHEMES
      .iter()
      .find(|scheme| normalized.starts_with(**scheme))
    {
      return Err(UnsafeUrl::DeniedScheme(
        denied.trim_end_matches(':').to_string(),
      ));
    }

    if let Some(caps) = SCHEME_RE.captures(&normalized) {
      let scheme = &caps[1];
      if !self.allows(scheme) {
        return Err(UnsafeUrl::UnknownScheme(scheme.to_string()));
      }
    }

    Ok(trimmed.to_string())
  }

  /// Sanitize `url`, returning an empty string when it is unsafe.
  ///
  /// Rejections are logged at warn level with the offending value.
  #[must_use]
  pub fn sanitize(&self, url: &str) -> String {
    match self.check(url) {
      Ok(safe) => safe,
      Err(reason) => {
        warn!("Rejected unsafe URL '{url}': {reason}");
        String::new()
      },
    }
  }
}

/// Sanitize `url` against the default protocol whitelist.
///
/// Returns the trimmed URL when it is relative, protocol-relative, or uses
/// one of [`DEFAULT_ALLOWED_SCHEMES`]; returns an empty string otherwise.
#[must_use]
pub fn sanitize(url: &str) -> String {
  DEFAULT_POLICY.sanitize(url)
}

fn normalize_scheme(scheme: &str) -> String {
  scheme.trim().trim_end_matches(':').to_ascii_lowercase()
}

/// Percent-decode `input`, refusing stray `%` signs and non-UTF-8 results.
fn decode_percent(input: &str) -> Result<String, UnsafeUrl> {
  let well_formed = input.split('%').skip(1).all(|chunk| {
    chunk
      .as_bytes()
      .get(..2)
      .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
  });
  if !well_formed {
    return Err(UnsafeUrl::MalformedEncoding);
  }

  percent_decode_str(input)
    .decode_utf8()
    .map(std::borrow::Cow::into_owned)
    .map_err(|_| UnsafeUrl::MalformedEncoding)
}
