use std::sync::LazyLock;

use log::error;
use regex::Regex;

/// Escape the five HTML metacharacters (`&`, `<`, `>`, `"`, `'`).
///
/// Runs before any markup is generated, so everything the pipelines emit
/// afterwards can be trusted while user text never is.
#[must_use]
pub fn escape_html(text: &str) -> String {
  html_escape::encode_quoted_attribute(text).into_owned()
}

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-");

  // Collapse runs produced by consecutive punctuation
  let mut slug = String::with_capacity(lowered.len());
  for c in lowered.chars() {
    if c == '-' && slug.ends_with('-') {
      continue;
    }
    slug.push(c);
  }
  slug.trim_matches('-').to_string()
}

/// Reduce a line of inline markdown to the text a reader would see.
///
/// Images collapse to their alt text, links to their label, and emphasis,
/// strikethrough and code delimiters are dropped.
#[must_use]
pub fn strip_inline_markup(text: &str) -> String {
  static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex("IMAGE_RE", r"!\[([^\]]*)\]\([^)]*\)"));
  static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex("LINK_RE", r"\[([^\]]+)\]\([^)]*\)"));

  let without_images = IMAGE_RE.replace_all(text, "${1}");
  let without_links = LINK_RE.replace_all(&without_images, "${1}");

  without_links
    .replace("~~", "")
    .chars()
    .filter(|c| !matches!(c, '*' | '_' | '`'))
    .collect::<String>()
    .trim()
    .to_string()
}

/// Compile a static pattern, logging and degrading to a never-matching regex
/// if compilation fails.
pub(crate) fn compile_regex(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex()
  })
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(
      clippy::expect_used,
      reason = "This pattern is guaranteed to be valid"
    )]
    Regex::new(r"^\b$").expect("regex pattern ^\\b$ should always compile")
  })
}
