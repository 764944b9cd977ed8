//! Mirroring a static public directory verbatim into the bundle output.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use same_file::is_same_file;

/// Mirror `public_dir` into `dist_dir` and return the relative paths installed.
///
/// Files are hard-linked where the filesystem allows and copied otherwise.
/// Destinations that already point at the same file are reused so repeated
/// runs stay cheap. Hidden files are skipped.
pub fn mirror_public_dir(public_dir: &Path, dist_dir: &Path) -> Result<Vec<String>> {
  let mut relatives = Vec::new();
  collect_public_files(public_dir, Path::new(""), &mut relatives)
    .with_context(|| format!("failed to scan {}", public_dir.display()))?;

  let mut installed = Vec::new();
  for relative in relatives {
    let source = public_dir.join(&relative);
    let destination = dist_dir.join(&relative);
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    install_public_asset(&source, &destination).with_context(|| {
      format!(
        "failed to install {} as {}",
        source.display(),
        destination.display()
      )
    })?;
    installed.push(relative.to_string_lossy().replace('\\', "/"));
  }

  Ok(installed)
}

fn collect_public_files(
  root: &Path,
  relative: &Path,
  out: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
  let current_path = root.join(relative);
  for entry in fs::read_dir(&current_path)? {
    let entry = entry?;
    let file_name = entry.file_name();
    if file_name.to_string_lossy().starts_with('.') {
      continue;
    }

    let child_relative = relative.join(&file_name);
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
      collect_public_files(root, &child_relative, out)?;
    } else if file_type.is_file() {
      out.push(child_relative);
    }
  }

  Ok(())
}

fn install_public_asset(source: &Path, destination: &Path) -> std::io::Result<()> {
  if destination.exists() {
    if is_same_file(source, destination)? {
      return Ok(());
    }
    fs::remove_file(destination)?;
  }

  match fs::hard_link(source, destination) {
    Ok(_) => Ok(()),
    Err(err) => {
      if err.kind() == ErrorKind::AlreadyExists {
        Ok(())
      } else {
        fs::copy(source, destination).map(|_| ())
      }
    }
  }
}
