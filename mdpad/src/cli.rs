use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for mdpad
#[derive(Parser, Debug)]
#[command(author, version, about = "mdpad: render and highlight markdown")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the mdpad CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new mdpad configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "mdpad.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Convert markdown to preview HTML.
  Render {
    /// Markdown file to read. Reads stdin when absent or `-`.
    input: Option<PathBuf>,

    /// File to write the HTML to. Writes to stdout when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the detected document title.
    #[arg(long)]
    title: bool,

    /// Emit the full result (HTML, headers and title) as JSON.
    #[arg(long)]
    json: bool,
  },

  /// Produce the syntax-highlighting overlay markup for the editor.
  Highlight {
    /// Markdown file to read. Reads stdin when absent or `-`.
    input: Option<PathBuf>,

    /// File to write the markup to. Writes to stdout when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Check a single link or image URL against the protocol whitelist.
  Sanitize {
    /// The URL to check.
    url: String,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
