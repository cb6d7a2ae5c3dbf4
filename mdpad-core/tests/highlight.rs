#![allow(clippy::unwrap_used, clippy::panic, reason = "Fine in tests")]
use std::sync::LazyLock;

use mdpad_core::{MarkdownOptionsBuilder, MarkdownProcessor, highlight};
use regex::Regex;

static TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove the overlay spans and decode entities, recovering the editor text.
fn plain_text(markup: &str) -> String {
  let stripped = TAG_RE.replace_all(markup, "");
  html_escape::decode_html_entities(&stripped).into_owned()
}

const DOCUMENT: &str = r#"# Shopping list

Buy **milk** & *eggs* before 5 < 6 o'clock.

> "Quoted" wisdom
> continues

- apples
* pears
1. first
---

```sh
echo "<done>"
```

~~cancelled~~ [store](https://example.com) ![map](map.png) `inline`"#;

#[test]
fn test_document_characters_preserved() {
  let markup = highlight(DOCUMENT);
  assert_eq!(plain_text(&markup), DOCUMENT);
}

#[test]
fn test_document_spans() {
  let markup = highlight(DOCUMENT);

  for expected in [
    r#"<span class="syntax-header"># Shopping list</span>"#,
    r#"<span class="syntax-bold">**milk**</span>"#,
    r#"<span class="syntax-italic">*eggs*</span>"#,
    r#"<span class="syntax-blockquote">&gt;</span> &quot;Quoted&quot; wisdom"#,
    r#"<span class="syntax-list">-</span> apples"#,
    r#"<span class="syntax-list">*</span> pears"#,
    r#"<span class="syntax-list">1.</span> first"#,
    r#"<span class="syntax-hr">---</span>"#,
    r#"<span class="syntax-strike">~~cancelled~~</span>"#,
    r#"<span class="syntax-link">[store](https://example.com)</span>"#,
    r#"<span class="syntax-image">![map](map.png)</span>"#,
    r#"<span class="syntax-code">`inline`</span>"#,
  ] {
    assert!(markup.contains(expected), "missing {expected} in:\n{markup}");
  }

  assert!(markup.contains(
    "<span class=\"syntax-code-block\">```sh\necho &quot;&lt;done&gt;&quot;\n```</span>"
  ));
  assert!(!markup.contains('\u{E000}'));
}

#[test]
fn test_bold_italic_not_split() {
  assert_eq!(
    highlight("___both___"),
    r#"<span class="syntax-bold-italic">___both___</span>"#
  );
}

#[test]
fn test_processor_highlight_respects_options() {
  let processor =
    MarkdownProcessor::new(MarkdownOptionsBuilder::new().strikethrough(false).build());
  assert_eq!(processor.highlight("~~x~~"), "~~x~~");
  assert_eq!(
    MarkdownProcessor::default().highlight("~~x~~"),
    r#"<span class="syntax-strike">~~x~~</span>"#
  );
}

#[test]
fn test_crlf_preserved() {
  let source = "# A\r\n- b\r\n";
  assert_eq!(plain_text(&highlight(source)), source);

  let source = "```\r\nx\r\n```\r\n---\r\n";
  let markup = highlight(source);
  assert_eq!(plain_text(&markup), source);
  assert!(markup.starts_with("<span class=\"syntax-code-block\">```\r\nx\r\n```</span>"));
  assert!(markup.contains("<span class=\"syntax-hr\">---</span>\r\n"));
}

#[test]
fn test_rules_and_markers_are_strict() {
  assert_eq!(highlight("--- "), "--- ");
  assert_eq!(highlight("\u{0661}. x"), "\u{0661}. x");
}
