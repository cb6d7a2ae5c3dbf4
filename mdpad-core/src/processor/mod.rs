//! Markdown processing module.
//!
//! # Architecture
//!
//! - [`core`]: `MarkdownProcessor` and the ordered conversion pipeline
//! - [`types`]: configuration and processor type definitions
//! - `blocks`: line-oriented passes (headers, rules, blockquotes, lists,
//!   paragraphs)
//! - `inline`: span-level passes (code, images, links, emphasis,
//!   strikethrough)
pub(crate) mod blocks;
pub mod core;
pub(crate) mod inline;
pub mod types;

pub use types::{
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  ParseTabStyleError,
  TabStyle,
};

#[cfg(test)]
mod tests {
  use super::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownProcessor, TabStyle};

  #[test]
  fn test_hardtab_handling_none() {
    let options = MarkdownOptions {
      tab_style: TabStyle::None,
      ..Default::default()
    };
    let processor = MarkdownProcessor::new(options);

    let markdown = "```rust\nfn main() {\n\tprintln!(\"Hello, world!\");\n}\n```";

    let html = processor.convert_to_html(markdown);
    assert!(html.contains("\tprintln"));
  }

  #[test]
  fn test_hardtab_handling_warn() {
    let options = MarkdownOptions {
      tab_style: TabStyle::Warn,
      ..Default::default()
    };
    let processor = MarkdownProcessor::new(options);

    let markdown = "```rust\nfn main() {\n\tprintln!(\"Hello, world!\");\n}\n```";

    let html = processor.convert_to_html(markdown);
    // Should preserve hard tabs but issue warning
    assert!(html.contains("\tprintln"));
  }

  #[test]
  fn test_hardtab_handling_normalize() {
    let options = MarkdownOptions {
      tab_style: TabStyle::Normalize,
      ..Default::default()
    };
    let processor = MarkdownProcessor::new(options);

    let markdown = "```rust\nfn main() {\n\tprintln!(\"Hello\");\n    println!(\"World\");\n}\n```";

    let html = processor.convert_to_html(markdown);
    // Should convert only tabs, preserve spaces
    assert!(!html.contains("\tprintln"));
    assert!(html.contains("\n  println"));
    assert!(html.contains("    println"));
  }

  #[test]
  fn test_hardtabs_outside_code_untouched() {
    let options = MarkdownOptions {
      tab_style: TabStyle::Normalize,
      ..Default::default()
    };
    let processor = MarkdownProcessor::new(options);
    assert_eq!(processor.convert_to_html("a\tb"), "<p>a\tb</p>");
  }

  #[test]
  fn test_tab_style_parsing() {
    assert_eq!("Normalize".parse(), Ok(TabStyle::Normalize));
    assert_eq!(" warn ".parse(), Ok(TabStyle::Warn));
    assert!("spaces".parse::<TabStyle>().is_err());
    assert_eq!(TabStyle::Warn.to_string(), "warn");
  }

  #[test]
  fn test_builder() {
    let options = MarkdownOptionsBuilder::new()
      .strikethrough(false)
      .tab_style(TabStyle::Warn)
      .allow_schemes(["tel"])
      .build();

    assert!(!options.strikethrough);
    assert_eq!(options.tab_style, TabStyle::Warn);
    assert!(options.url_policy.allowed_schemes().contains(&"tel".to_string()));

    let processor = MarkdownProcessor::new(options);
    assert_eq!(
      processor.convert_to_html("[call](tel:123) ~~x~~"),
      r#"<p><a href="tel:123">call</a> ~~x~~</p>"#
    );
  }
}
