//! Call-scoped placeholder bookkeeping.
//!
//! Content that later passes must not touch (rendered code, generated tag
//! attributes, styled spans) is swapped out for an opaque token and swapped
//! back in at the very end of the pass. Each token is a random 128-bit value
//! framed by private-use code points, so it carries no information about the
//! document and cannot be matched by any markdown pattern.
use std::collections::HashSet;

use log::{trace, warn};

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

/// How a placeholder sits in the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// Stands alone as a block and must not be wrapped in a paragraph.
  Block,
  /// Part of a line of running text.
  Inline,
}

#[derive(Debug)]
struct Entry {
  token:   String,
  content: String,
  kind:    TokenKind,
}

/// Token to content mapping for a single `convert`/`highlight` invocation.
///
/// A context is never shared between calls; [`ExtractionContext::restore`]
/// consumes it.
#[derive(Debug)]
pub struct ExtractionContext {
  entries: Vec<Entry>,
  issued:  HashSet<String>,
  /// Copy of the source, kept only when it contains the token framing
  /// character and a collision is therefore conceivable.
  guard:   Option<String>,
}

impl ExtractionContext {
  /// Create a fresh context for one pass over `source`.
  #[must_use]
  pub fn new(source: &str) -> Self {
    Self {
      entries: Vec::new(),
      issued:  HashSet::new(),
      guard:   source.contains(TOKEN_OPEN).then(|| source.to_string()),
    }
  }

  /// Store `content` and return the token that stands in for it.
  pub fn stash(&mut self, content: impl Into<String>, kind: TokenKind) -> String {
    let token = self.fresh_token();
    self.entries.push(Entry {
      token: token.clone(),
      content: content.into(),
      kind,
    });
    token
  }

  /// Shorthand for [`Self::stash`] with [`TokenKind::Inline`].
  pub fn stash_inline(&mut self, content: impl Into<String>) -> String {
    self.stash(content, TokenKind::Inline)
  }

  /// Shorthand for [`Self::stash`] with [`TokenKind::Block`].
  pub fn stash_block(&mut self, content: impl Into<String>) -> String {
    self.stash(content, TokenKind::Block)
  }

  /// Whether `text` (ignoring surrounding whitespace) is exactly one block
  /// token issued by this context.
  #[must_use]
  pub fn is_block_token(&self, text: &str) -> bool {
    let text = text.trim();
    self
      .entries
      .iter()
      .any(|entry| entry.kind == TokenKind::Block && entry.token == text)
  }

  /// Number of placeholders issued so far.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether nothing has been stashed.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Substitute every token in `text` with its stored content.
  ///
  /// Tokens are restored newest first, so content that itself contains an
  /// older token (a styled span wrapping another) is expanded fully. Each
  /// token is replaced exactly once.
  #[must_use]
  pub fn restore(self, mut text: String) -> String {
    trace!("Restoring {} placeholders", self.entries.len());

    for entry in self.entries.into_iter().rev() {
      if text.contains(&entry.token) {
        text = text.replacen(&entry.token, &entry.content, 1);
      } else {
        warn!(
          "Placeholder for extracted {:?} content was lost before \
           restoration; {} bytes dropped",
          entry.kind,
          entry.content.len()
        );
      }
    }

    text
  }

  fn fresh_token(&mut self) -> String {
    loop {
      let token = format!(
        "{TOKEN_OPEN}{:032x}{TOKEN_CLOSE}",
        rand::random::<u128>()
      );
      let collides = self.issued.contains(&token)
        || self
          .guard
          .as_deref()
          .is_some_and(|source| source.contains(&token));
      if !collides {
        self.issued.insert(token.clone());
        return token;
      }
    }
  }
}
