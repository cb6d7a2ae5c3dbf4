//! Inline passes of the conversion pipeline: code spans, images, links,
//! emphasis and strikethrough.
//!
//! Emphasis is greedy-non-nesting per marker class: the run between two
//! markers may not contain the marker character, may not cross a line, and
//! may not start or end with whitespace.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
  placeholder::ExtractionContext,
  sanitize::UrlPolicy,
  utils::compile_regex,
};

pub(crate) static INLINE_CODE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("INLINE_CODE_RE", r"`([^`\n]+)`"));

// Alt text and URLs may not contain a placeholder (`\x{E000}`): an extracted
// code span must never be restored into an attribute value.
pub(crate) static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("IMAGE_RE", r"!\[([^\]\n\x{E000}]*)\]\(([^)\n\x{E000}]*)\)")
});

pub(crate) static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("LINK_RE", r"\[([^\]\n]+)\]\(([^)\n\x{E000}]*)\)")
});

pub(crate) static BOLD_ITALIC_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(
    "BOLD_ITALIC_STAR_RE",
    r"\*\*\*([^*\s](?:[^*\n]*[^*\s])?)\*\*\*",
  )
});

pub(crate) static BOLD_ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
  LazyLock::new(|| {
    compile_regex(
      "BOLD_ITALIC_UNDERSCORE_RE",
      r"___([^_\s](?:[^_\n]*[^_\s])?)___",
    )
  });

pub(crate) static BOLD_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("BOLD_STAR_RE", r"\*\*([^*\s](?:[^*\n]*[^*\s])?)\*\*")
});

pub(crate) static BOLD_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("BOLD_UNDERSCORE_RE", r"__([^_\s](?:[^_\n]*[^_\s])?)__")
});

pub(crate) static ITALIC_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("ITALIC_STAR_RE", r"\*([^*\s](?:[^*\n]*[^*\s])?)\*")
});

pub(crate) static ITALIC_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("ITALIC_UNDERSCORE_RE", r"_([^_\s](?:[^_\n]*[^_\s])?)_")
});

pub(crate) static STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("STRIKETHROUGH_RE", r"~~([^~\s](?:[^~\n]*[^~\s])?)~~")
});

/// Replace `` `code` `` spans with placeholders for `<code>` elements.
pub(crate) fn extract_inline_code(
  text: &str,
  ctx: &mut ExtractionContext,
) -> String {
  INLINE_CODE_RE
    .replace_all(text, |caps: &Captures| {
      ctx.stash_inline(format!("<code>{}</code>", &caps[1]))
    })
    .into_owned()
}

/// `![alt](url)` becomes an `<img>` when the URL is safe and the literal
/// fallback `[Image: alt]` otherwise.
pub(crate) fn render_images(
  text: &str,
  policy: &UrlPolicy,
  ctx: &mut ExtractionContext,
) -> String {
  IMAGE_RE
    .replace_all(text, |caps: &Captures| {
      let alt = &caps[1];
      let src = policy.sanitize(&caps[2]);
      if src.is_empty() {
        format!("[Image: {alt}]")
      } else {
        ctx.stash_inline(format!(r#"<img src="{src}" alt="{alt}">"#))
      }
    })
    .into_owned()
}

/// `[text](url)` becomes an `<a>` when the URL is safe and the literal
/// fallback `[text]` otherwise.
///
/// The opening tag is stashed so the emphasis passes never see the href,
/// while the label stays in the text and still gets inline formatting.
pub(crate) fn render_links(
  text: &str,
  policy: &UrlPolicy,
  ctx: &mut ExtractionContext,
) -> String {
  LINK_RE
    .replace_all(text, |caps: &Captures| {
      let label = &caps[1];
      let href = policy.sanitize(&caps[2]);
      if href.is_empty() {
        format!("[{label}]")
      } else {
        let open = ctx.stash_inline(format!(r#"<a href="{href}">"#));
        format!("{open}{label}</a>")
      }
    })
    .into_owned()
}

/// Triple, then double, then single markers; `*` before `_` in each class.
pub(crate) fn render_emphasis(text: &str) -> String {
  let passes: [(&Regex, &str); 6] = [
    (&BOLD_ITALIC_STAR_RE, "<strong><em>${1}</em></strong>"),
    (&BOLD_ITALIC_UNDERSCORE_RE, "<strong><em>${1}</em></strong>"),
    (&BOLD_STAR_RE, "<strong>${1}</strong>"),
    (&BOLD_UNDERSCORE_RE, "<strong>${1}</strong>"),
    (&ITALIC_STAR_RE, "<em>${1}</em>"),
    (&ITALIC_UNDERSCORE_RE, "<em>${1}</em>"),
  ];

  passes
    .iter()
    .fold(text.to_string(), |acc, (regex, replacement)| {
      regex.replace_all(&acc, *replacement).into_owned()
    })
}

pub(crate) fn render_strikethrough(text: &str) -> String {
  STRIKETHROUGH_RE
    .replace_all(text, "<del>${1}</del>")
    .into_owned()
}
