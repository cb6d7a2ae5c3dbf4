//! Syntax highlighting markup for the editor overlay.
//!
//! Unlike the converter, the highlighter never consumes markdown syntax: the
//! output contains every character of the input (HTML-escaped) with
//! recognized constructs wrapped in `<span class="syntax-*">`. Rendered
//! behind the editable text, it lines up character for character.
//!
//! Emphasis runs are extracted first so the line-anchored passes (headers,
//! list markers, blockquote markers) never match characters inside them.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
  placeholder::ExtractionContext,
  processor::{
    MarkdownOptions,
    inline::{
      BOLD_ITALIC_STAR_RE,
      BOLD_ITALIC_UNDERSCORE_RE,
      BOLD_STAR_RE,
      BOLD_UNDERSCORE_RE,
      IMAGE_RE,
      INLINE_CODE_RE,
      ITALIC_STAR_RE,
      ITALIC_UNDERSCORE_RE,
      LINK_RE,
      STRIKETHROUGH_RE,
    },
  },
  utils::{compile_regex, escape_html},
};

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("CODE_BLOCK_RE", r"(?msR)^```.*?\n```[ \t]*$")
});

static HEADER_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("HEADER_LINE_RE", r"(?m)^#{1,6}[ \t].*$"));

static HR_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("HR_LINE_RE", r"(?mR)^-{3,}$"));

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("LIST_MARKER_RE", r"(?m)^([ \t]*)([*-]|[0-9]+\.)([ \t])")
});

static BLOCKQUOTE_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("BLOCKQUOTE_MARKER_RE", r"(?m)^&gt;"));

/// Highlight `markdown` with the default options.
#[must_use]
pub fn highlight(markdown: &str) -> String {
  highlight_markup(markdown, &MarkdownOptions::default())
}

fn span(class: &str, content: &str) -> String {
  format!(r#"<span class="syntax-{class}">{content}</span>"#)
}

/// Wrap every match of `regex` in a styled span and stash it.
fn stash_spans(
  text: &str,
  regex: &Regex,
  class: &str,
  ctx: &mut ExtractionContext,
) -> String {
  regex
    .replace_all(text, |caps: &Captures| ctx.stash_inline(span(class, &caps[0])))
    .into_owned()
}

pub(crate) fn highlight_markup(
  markdown: &str,
  options: &MarkdownOptions,
) -> String {
  if markdown.is_empty() {
    return String::new();
  }

  let mut ctx = ExtractionContext::new(markdown);
  let mut text = escape_html(markdown);

  let emphasis: [(&Regex, &str); 6] = [
    (&BOLD_ITALIC_STAR_RE, "bold-italic"),
    (&BOLD_ITALIC_UNDERSCORE_RE, "bold-italic"),
    (&BOLD_STAR_RE, "bold"),
    (&BOLD_UNDERSCORE_RE, "bold"),
    (&ITALIC_STAR_RE, "italic"),
    (&ITALIC_UNDERSCORE_RE, "italic"),
  ];
  for (regex, class) in emphasis {
    text = stash_spans(&text, regex, class, &mut ctx);
  }
  if options.strikethrough {
    text = stash_spans(&text, &STRIKETHROUGH_RE, "strike", &mut ctx);
  }

  text = stash_spans(&text, &CODE_BLOCK_RE, "code-block", &mut ctx);
  text = stash_spans(&text, &INLINE_CODE_RE, "code", &mut ctx);

  text = HEADER_LINE_RE
    .replace_all(&text, |caps: &Captures| span("header", &caps[0]))
    .into_owned();
  text = HR_LINE_RE
    .replace_all(&text, |caps: &Captures| span("hr", &caps[0]))
    .into_owned();

  // Images before links, otherwise the link pattern claims `[alt](src)`
  text = stash_spans(&text, &IMAGE_RE, "image", &mut ctx);
  text = stash_spans(&text, &LINK_RE, "link", &mut ctx);

  text = LIST_MARKER_RE
    .replace_all(&text, |caps: &Captures| {
      format!("{}{}{}", &caps[1], span("list", &caps[2]), &caps[3])
    })
    .into_owned();
  text = BLOCKQUOTE_MARKER_RE
    .replace_all(&text, |caps: &Captures| span("blockquote", &caps[0]))
    .into_owned();

  ctx.restore(text)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_header_keeps_hashes() {
    assert_eq!(
      highlight("# Title"),
      r##"<span class="syntax-header"># Title</span>"##
    );
    assert_eq!(highlight("#tag"), "#tag");
  }

  #[test]
  fn test_emphasis_classes() {
    assert_eq!(
      highlight("***a*** **b** *c*"),
      concat!(
        r#"<span class="syntax-bold-italic">***a***</span> "#,
        r#"<span class="syntax-bold">**b**</span> "#,
        r#"<span class="syntax-italic">*c*</span>"#
      )
    );
    assert_eq!(
      highlight("__b__ _i_"),
      concat!(
        r#"<span class="syntax-bold">__b__</span> "#,
        r#"<span class="syntax-italic">_i_</span>"#
      )
    );
  }

  #[test]
  fn test_list_marker_outside_emphasis() {
    assert_eq!(
      highlight("* item *x*"),
      concat!(
        r#"<span class="syntax-list">*</span> item "#,
        r#"<span class="syntax-italic">*x*</span>"#
      )
    );
    assert_eq!(
      highlight("12. twelve"),
      r#"<span class="syntax-list">12.</span> twelve"#
    );
  }

  #[test]
  fn test_blockquote_marker_is_escaped() {
    assert_eq!(
      highlight("> quote"),
      r#"<span class="syntax-blockquote">&gt;</span> quote"#
    );
  }

  #[test]
  fn test_image_and_link() {
    assert_eq!(
      highlight("![a](b.png) [c](d)"),
      concat!(
        r#"<span class="syntax-image">![a](b.png)</span> "#,
        r#"<span class="syntax-link">[c](d)</span>"#
      )
    );
  }

  #[test]
  fn test_code_is_wrapped_whole() {
    assert_eq!(
      highlight("`# x`"),
      r##"<span class="syntax-code">`# x`</span>"##
    );
    assert_eq!(
      highlight("```\n# not header\n```"),
      "<span class=\"syntax-code-block\">```\n# not header\n```</span>"
    );
  }

  #[test]
  fn test_strikethrough_toggle() {
    assert_eq!(
      highlight("~~gone~~"),
      r#"<span class="syntax-strike">~~gone~~</span>"#
    );
    let options = MarkdownOptions {
      strikethrough: false,
      ..Default::default()
    };
    assert_eq!(highlight_markup("~~gone~~", &options), "~~gone~~");
  }

  #[test]
  fn test_empty_input() {
    assert_eq!(highlight(""), "");
  }
}
