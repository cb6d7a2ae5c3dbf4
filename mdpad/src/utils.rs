use std::{
  fs,
  io::{self, Read, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result};
use log::{debug, info};

/// Read the markdown source from `input`, or from stdin when it is `None` or
/// `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read, or is not UTF-8.
pub fn read_input(input: Option<&Path>) -> Result<String> {
  match input {
    Some(path) if path != Path::new("-") => {
      let content = fs::read_to_string(path).wrap_err_with(|| {
        format!("Failed to read input file: {}", path.display())
      })?;
      debug!("Read {} bytes from {}", content.len(), path.display());
      Ok(content)
    },
    _ => {
      let mut content = String::new();
      io::stdin()
        .read_to_string(&mut content)
        .wrap_err("Failed to read markdown from stdin")?;
      debug!("Read {} bytes from stdin", content.len());
      Ok(content)
    },
  }
}

/// Write `content` to `output`, creating parent directories as needed, or to
/// stdout followed by a newline when `output` is `None`.
///
/// # Errors
///
/// Returns an error if the directory, file, or stdout cannot be written.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
  let Some(path) = output else {
    let mut stdout = io::stdout().lock();
    stdout
      .write_all(content.as_bytes())
      .and_then(|()| stdout.write_all(b"\n"))
      .and_then(|()| stdout.flush())
      .wrap_err("Failed to write to stdout")?;
    return Ok(());
  };

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write output file: {}", path.display()))?;
  info!("Wrote {}", path.display());
  Ok(())
}
