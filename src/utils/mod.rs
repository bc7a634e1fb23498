pub mod remote_file;

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use sha2::{Digest, Sha256};
use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Hex encoded SHA-256 digest.
pub fn sha256_digest(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

/// Check that an archive path stays below the directory it is joined to.
///
/// Only plain components are allowed: no root, no prefix, no '.' or '..'.
pub fn relative_path(path: &str) -> Result<PathBuf, Report> {
    let candidate = Path::new(path);
    let mut output = PathBuf::new();

    for component in candidate.components() {
        match component {
            Component::Normal(part) => output.push(part),
            _ => {
                return Err(eyre!("Archive path is not a plain relative path: {path:?}")
                    .suggestion("Archive paths may not be absolute or contain '.' or '..'."))
            }
        }
    }

    if output.as_os_str().is_empty() {
        return Err(eyre!("Archive path is empty."));
    }

    Ok(output)
}

/// Write content to a file by way of a temporary file in the same directory.
///
/// Parent directories are created as needed. An existing file is replaced.
pub fn write_file(path: &Path, content: &[u8]) -> Result<(), Report> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    create_dir_all(parent)
        .wrap_err_with(|| format!("Failed to create directory: {parent:?}"))?;

    let mut file = NamedTempFile::new_in(parent)
        .wrap_err_with(|| format!("Failed to create temporary file in: {parent:?}"))?;
    file.write_all(content)
        .wrap_err_with(|| format!("Failed to write file: {path:?}"))?;
    file.persist(path)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("Failed to write file: {path:?}"))?;

    Ok(())
}
