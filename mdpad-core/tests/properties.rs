//! Property-based tests for the converter, highlighter and sanitizer.
//!
//! Inputs are drawn from printable ASCII plus line endings, which covers every
//! markdown delimiter and HTML metacharacter the pipelines care about.
#![allow(clippy::unwrap_used, reason = "Fine in tests")]
use std::sync::LazyLock;

use mdpad_core::{convert_to_html, highlight, sanitize};
use proptest::prelude::*;
use regex::Regex;

/// Every tag the converter generates, with attribute values that cannot
/// contain raw metacharacters.
static GENERATED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"</?(?:p|h[1-6]|ul|ol|li|blockquote|pre|code|em|strong|del|a|img|hr)(?: [a-z]+="[^"<>]*")*>"#,
  )
  .unwrap()
});

static ANY_TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

fn markdown_text() -> impl Strategy<Value = String> {
  "[ -~\r\n]{0,200}"
}

proptest! {
  #[test]
  fn converter_never_emits_raw_user_markup(input in markdown_text()) {
    let html = convert_to_html(&input);
    let text = GENERATED_TAG_RE.replace_all(&html, "");
    for c in ['<', '>', '"', '\''] {
      prop_assert!(!text.contains(c), "raw {:?} in {:?}", c, html);
    }
  }

  #[test]
  fn converter_restores_every_placeholder(input in markdown_text()) {
    let html = convert_to_html(&input);
    prop_assert!(!html.contains('\u{E000}'), "placeholder U+E000 left in output");
    prop_assert!(!html.contains('\u{E001}'), "placeholder U+E001 left in output");
  }

  #[test]
  fn code_fence_round_trip(body in "[^`\u{E000}\u{E001}]{0,120}") {
    let html = convert_to_html(&format!("```\n{body}\n```"));
    let expected = format!(
      "<pre><code>{}</code></pre>",
      html_escape::encode_quoted_attribute(body.trim())
    );
    prop_assert!(html.contains(&expected), "{:?} not in {:?}", expected, html);
  }

  #[test]
  fn highlighter_preserves_every_character(input in markdown_text()) {
    let markup = highlight(&input);
    let stripped = ANY_TAG_RE.replace_all(&markup, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    prop_assert_eq!(&*decoded, input.as_str());
  }

  #[test]
  fn allowed_schemes_pass_unchanged(
    scheme in prop::sample::select(vec!["http", "https", "mailto", "ftp", "ftps"]),
    rest in "[a-z0-9./]{1,30}",
    pad in "[ \t]{0,3}"
  ) {
    let url = format!("{scheme}://{rest}");
    prop_assert_eq!(sanitize(&format!("{pad}{url}{pad}")), url);
  }

  #[test]
  fn denied_schemes_rejected_in_any_disguise(
    scheme in prop::sample::select(vec!["javascript", "data", "vbscript", "file", "about"]),
    upper in prop::collection::vec(any::<bool>(), 10),
    noise in prop::sample::select(vec!["", " ", "\t", "\n", "\u{0}", "\u{1f}", "%09", "%00"]),
    payload in "[a-z0-9()]{0,20}"
  ) {
    let disguised: String = scheme
      .chars()
      .zip(upper.iter().cycle())
      .map(|(c, up)| {
        let c = if *up { c.to_ascii_uppercase() } else { c };
        format!("{c}{noise}")
      })
      .collect();
    let url = format!("{disguised}:{payload}");
    prop_assert_eq!(sanitize(&url), "", "accepted {:?}", url);
  }
}

#[test]
fn test_encoded_bypass_rejected() {
  assert_eq!(sanitize("javascript%3Aalert(1)"), "");
  assert_eq!(sanitize("%4a%41%56%41script:alert(1)"), "");
}
