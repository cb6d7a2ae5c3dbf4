//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor`: the
//! ordered conversion pipeline, header extraction and the entry point into
//! the highlighter.
use std::collections::HashMap;

use log::{debug, trace, warn};
use regex::Captures;

use super::{
  blocks,
  inline,
  types::{MarkdownOptions, MarkdownProcessor, TabStyle},
};
use crate::{
  highlight,
  placeholder::ExtractionContext,
  types::{Header, MarkdownResult},
  utils,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Convert Markdown to HTML.
  ///
  /// The passes run in a fixed order; each builds on the guarantees of the
  /// ones before it (escaping first, code extraction before any markdown is
  /// interpreted, restoration last). Never fails: malformed markdown comes
  /// out as escaped text.
  #[must_use]
  pub fn convert_to_html(&self, markdown: &str) -> String {
    if markdown.is_empty() {
      return String::new();
    }

    let policy = &self.options.url_policy;
    let mut ctx = ExtractionContext::new(markdown);

    let mut html = utils::escape_html(markdown);
    html = self.extract_code_blocks(&html, &mut ctx);
    // Code bodies keep their line endings; everything else is LF from here on
    html = html.replace("\r\n", "\n");
    html = inline::extract_inline_code(&html, &mut ctx);
    html = blocks::render_headers(&html);
    html = blocks::render_horizontal_rules(&html);
    html = blocks::render_blockquotes(&html);
    html = blocks::render_lists(&html);
    html = inline::render_images(&html, policy, &mut ctx);
    html = inline::render_links(&html, policy, &mut ctx);
    html = inline::render_emphasis(&html);
    if self.options.strikethrough {
      html = inline::render_strikethrough(&html);
    }
    html = blocks::wrap_paragraphs(&html, &ctx);

    trace!(
      "Converted {} bytes of markdown with {} placeholders",
      markdown.len(),
      ctx.len()
    );
    ctx.restore(html)
  }

  /// Render Markdown to HTML, extracting headers and title.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let html = self.convert_to_html(markdown);
    let (headers, title) = self.extract_headers(markdown);

    MarkdownResult {
      html,
      headers,
      title,
    }
  }

  /// Produce the syntax-highlighted overlay markup for the editor.
  #[must_use]
  pub fn highlight(&self, markdown: &str) -> String {
    highlight::highlight_markup(markdown, &self.options)
  }

  /// Extract headers and title from the markdown content.
  ///
  /// Headers inside fenced code blocks are ignored. IDs are slugs of the
  /// header text, suffixed with `-1`, `-2`, ... when a slug repeats.
  #[must_use]
  pub fn extract_headers(
    &self,
    content: &str,
  ) -> (Vec<Header>, Option<String>) {
    let source = content.replace("\r\n", "\n");
    let without_code = blocks::FENCED_CODE_RE.replace_all(&source, "");

    let mut headers = Vec::new();
    let mut seen_ids: HashMap<String, usize> = HashMap::new();
    let mut found_title = None;

    for caps in blocks::HEADER_RE.captures_iter(&without_code) {
      #[allow(
        clippy::cast_possible_truncation,
        reason = "The pattern admits at most six hashes"
      )]
      let level = caps[1].len() as u8;
      let text = utils::strip_inline_markup(&caps[2]);

      let slug = utils::slugify(&text);
      let count = seen_ids.entry(slug.clone()).or_insert(0);
      let id = if *count == 0 {
        slug
      } else {
        format!("{slug}-{count}")
      };
      *count += 1;

      if level == 1 && found_title.is_none() {
        found_title = Some(text.clone());
      }
      headers.push(Header { text, level, id });
    }

    debug!("Extracted {} headers", headers.len());
    (headers, found_title)
  }

  /// Pull fenced code blocks out into block placeholders holding their
  /// rendered `<pre><code>`.
  fn extract_code_blocks(
    &self,
    text: &str,
    ctx: &mut ExtractionContext,
  ) -> String {
    blocks::FENCED_CODE_RE
      .replace_all(text, |caps: &Captures| {
        let code = self.apply_tab_style(caps[2].trim());
        let html = code_language(&caps[1]).map_or_else(
          || format!("<pre><code>{code}</code></pre>"),
          |language| {
            format!(
              r#"<pre><code class="language-{language}">{code}</code></pre>"#
            )
          },
        );
        let token = ctx.stash_block(html);
        format!("\n\n{token}\n\n")
      })
      .into_owned()
  }

  fn apply_tab_style(&self, code: &str) -> String {
    if !code.contains('\t') {
      return code.to_string();
    }

    match self.options.tab_style {
      TabStyle::None => code.to_string(),
      TabStyle::Warn => {
        warn!("Hard tabs detected in code block");
        code.to_string()
      },
      TabStyle::Normalize => code.replace('\t', "  "),
    }
  }
}

/// The language word of a fence info string, if it is a plausible one.
fn code_language(info: &str) -> Option<&str> {
  info.split_whitespace().next().filter(|word| {
    word
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
  })
}
