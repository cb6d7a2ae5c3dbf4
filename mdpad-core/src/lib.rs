//! # mdpad-core - the rendering core of the mdpad markdown editor
//!
//! Three pure transformations over the editor buffer:
//!
//! - [`convert_to_html`]: markdown to preview HTML
//! - [`highlight`]: markdown to overlay markup for the editing surface
//! - [`sanitize`]: protocol whitelisting for link and image URLs
//!
//! ## Quick Start
//!
//! ```rust
//! use mdpad_core::{convert_to_html, highlight, sanitize};
//!
//! let html = convert_to_html("# Hello\n\nThis is **bold** text.");
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//!
//! let overlay = highlight("# Hello");
//! assert_eq!(overlay, r#"<span class="syntax-header"># Hello</span>"#);
//!
//! assert_eq!(sanitize("javascript:alert(1)"), "");
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use mdpad_core::{MarkdownOptionsBuilder, MarkdownProcessor, TabStyle};
//!
//! let options = MarkdownOptionsBuilder::new()
//!   .tab_style(TabStyle::Normalize)
//!   .allow_schemes(["tel"])
//!   .build();
//!
//! let processor = MarkdownProcessor::new(options);
//! let result = processor.render("# Notes\n\n[call me](tel:5550100)");
//! assert_eq!(result.title.as_deref(), Some("Notes"));
//! ```
//!
//! Every call works on its own extraction context; nothing is shared between
//! calls, so a single processor may be used from any number of threads.

pub mod highlight;
pub mod placeholder;
pub mod processor;
pub mod sanitize;
mod types;
pub mod utils;

pub use crate::{
  highlight::highlight,
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    ParseTabStyleError,
    TabStyle,
  },
  sanitize::{UnsafeUrl, UrlPolicy, sanitize},
  types::{Header, MarkdownResult},
};

/// Convert markdown to HTML with the default options.
#[must_use]
pub fn convert_to_html(markdown: &str) -> String {
  MarkdownProcessor::default().convert_to_html(markdown)
}

/// Convert markdown to HTML and collect its headers and title, with the
/// default options.
#[must_use]
pub fn render(markdown: &str) -> MarkdownResult {
  MarkdownProcessor::default().render(markdown)
}
