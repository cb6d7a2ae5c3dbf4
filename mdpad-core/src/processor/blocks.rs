//! Block-level passes of the conversion pipeline.
//!
//! All functions here operate on already-escaped text: a user-typed `>` is
//! `&gt;` by the time the blockquote scanner sees it.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{placeholder::ExtractionContext, utils::compile_regex};

/// Fenced code block: a ```` ``` ```` line with an optional info string, the
/// body, and a closing ```` ``` ```` line. Runs in CRLF mode, so a body
/// written with `\r\n` line endings is captured unchanged.
pub(crate) static FENCED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(
    "FENCED_CODE_RE",
    r"(?msR)^```[ \t]*([^\n`]*)\n(.*?)^```[ \t]*$",
  )
});

pub(crate) static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("HEADER_RE", r"(?m)^(#{1,6})[ \t]+(.*\S)[ \t]*$")
});

static HR_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("HR_RE", r"(?m)^-{3,}$"));

static ORDERED_ITEM_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("ORDERED_ITEM_RE", r"^[0-9]+\. (.*)$"));

static BLANK_LINES_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("BLANK_LINES_RE", r"\n[ \t]*\n"));

/// A tag start (`<div`, `</p`), either generated or the escaped form of one
/// the user typed. A `<` followed by anything but a letter is text.
static HTML_BLOCK_START_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("HTML_BLOCK_START_RE", r"^(?:<|&lt;)/?[A-Za-z]")
});

/// `# Title` through `###### Title`; the space after the hashes is required.
pub(crate) fn render_headers(text: &str) -> String {
  HEADER_RE
    .replace_all(text, |caps: &Captures| {
      let level = caps[1].len();
      format!("<h{level}>{}</h{level}>", caps[2].trim())
    })
    .into_owned()
}

pub(crate) fn render_horizontal_rules(text: &str) -> String {
  HR_RE.replace_all(text, "<hr>").into_owned()
}

/// Group consecutive `> ` lines into a single `<blockquote>`.
pub(crate) fn render_blockquotes(text: &str) -> String {
  let mut output: Vec<String> = Vec::new();
  let mut quoted: Vec<&str> = Vec::new();

  for line in text.split('\n') {
    if let Some(content) = line.strip_prefix("&gt; ") {
      quoted.push(content);
      continue;
    }
    if !quoted.is_empty() {
      output.push(format!("<blockquote>{}</blockquote>", quoted.join("\n")));
      quoted.clear();
    }
    output.push(line.to_string());
  }

  if !quoted.is_empty() {
    output.push(format!("<blockquote>{}</blockquote>", quoted.join("\n")));
  }

  output.join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
  Unordered,
  Ordered,
}

impl ListKind {
  const fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }
}

fn classify_list_item(line: &str) -> Option<(ListKind, &str)> {
  if let Some(item) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- "))
  {
    return Some((ListKind::Unordered, item));
  }
  ORDERED_ITEM_RE
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|item| (ListKind::Ordered, item.as_str()))
}

/// Group consecutive list lines into `<ul>`/`<ol>` blocks.
///
/// Switching between ordered and unordered markers, or any non-list line,
/// closes the open list. Lists do not nest, and lines inside a rendered
/// `<blockquote>` are never list items.
pub(crate) fn render_lists(text: &str) -> String {
  let mut output: Vec<String> = Vec::new();
  let mut open: Option<ListKind> = None;
  let mut in_quote = false;

  for line in text.split('\n') {
    let quoted = in_quote || line.starts_with("<blockquote>");
    if quoted {
      in_quote = !line.ends_with("</blockquote>");
    }
    let item = if quoted { None } else { classify_list_item(line) };

    if let Some(kind) = open {
      if item.is_none_or(|(next, _)| next != kind) {
        output.push(format!("</{}>", kind.tag()));
        open = None;
      }
    }

    match item {
      Some((kind, content)) => {
        if open.is_none() {
          output.push(format!("<{}>", kind.tag()));
          open = Some(kind);
        }
        output.push(format!("<li>{content}</li>"));
      },
      None => output.push(line.to_string()),
    }
  }

  if let Some(kind) = open {
    output.push(format!("</{}>", kind.tag()));
  }

  output.join("\n")
}

/// Split on blank lines and wrap plain single-line blocks in `<p>`.
///
/// Blocks that start with a tag, blocks that are exactly one extracted
/// block placeholder, and multi-line blocks are left as they are.
pub(crate) fn wrap_paragraphs(text: &str, ctx: &ExtractionContext) -> String {
  BLANK_LINES_RE
    .split(text)
    .map(str::trim)
    .filter(|block| !block.is_empty())
    .map(|block| {
      if HTML_BLOCK_START_RE.is_match(block)
        || ctx.is_block_token(block)
        || block.contains('\n')
      {
        block.to_string()
      } else {
        format!("<p>{block}</p>")
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}
