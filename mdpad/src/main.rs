use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, debug, info, warn};
use mdpad::{
  cli::{Cli, Commands},
  config::Config,
  utils::{read_input, write_output},
};
use mdpad_core::MarkdownProcessor;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Init runs before any configuration is loaded; it writes the file that
  // would otherwise be read
  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    if output.exists() && !force {
      bail!(
        "Configuration file already exists: {}. Use --force to overwrite.",
        output.display()
      );
    }

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
      && !parent.exists()
    {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }

    Config::generate_default_config(format, output).wrap_err_with(|| {
      format!(
        "Failed to generate configuration file: {}",
        output.display()
      )
    })?;

    info!(
      "Configuration file created successfully. Edit it to customize how \
       markdown is rendered."
    );
    return Ok(());
  }

  let config = Config::load(&cli.config_files, &cli.config_overrides)?;
  let processor = MarkdownProcessor::new(config.markdown_options());
  debug!("Using markdown options: {:?}", processor.options());

  run(&cli.command, &processor)
}

/// Dispatch the rendering subcommands.
fn run(command: &Commands, processor: &MarkdownProcessor) -> Result<()> {
  match command {
    Commands::Render {
      input,
      output,
      title,
      json,
    } => {
      let markdown = read_input(input.as_deref())?;
      let result = processor.render(&markdown);

      if *title {
        match &result.title {
          Some(title) => info!("Title: {title}"),
          None => warn!("No level-1 header found, document has no title"),
        }
      }
      debug!("Extracted {} headers", result.headers.len());

      let rendered = if *json {
        serde_json::to_string_pretty(&result)
          .wrap_err("Failed to serialize render result")?
      } else {
        result.html
      };
      write_output(output.as_deref(), &rendered)
    },

    Commands::Highlight { input, output } => {
      let markdown = read_input(input.as_deref())?;
      write_output(output.as_deref(), &processor.highlight(&markdown))
    },

    Commands::Sanitize { url } => {
      match processor.options().url_policy.check(url) {
        Ok(safe) => write_output(None, &safe),
        Err(reason) => bail!("Rejected URL '{url}': {reason}"),
      }
    },

    // Handled before configuration is loaded
    Commands::Init { .. } => Ok(()),
  }
}
