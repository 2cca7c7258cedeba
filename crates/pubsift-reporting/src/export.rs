use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A JSON document fully written to a temporary file next to its destination,
/// waiting to be renamed into place.
///
/// Dropping it without [`commit`](Self::commit) removes the temporary file and
/// leaves the destination untouched.
#[derive(Debug)]
pub struct StagedJson {
    path: PathBuf,
    tmp: NamedTempFile,
    bytes: usize,
}

impl StagedJson {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the staged file over its destination.
    pub fn commit(self) -> Result<PathBuf, ReportError> {
        let Self { path, tmp, bytes } = self;
        tmp.persist(&path).map_err(|e| ReportError::Persist {
            path: path.clone(),
            source: e.error,
        })?;
        tracing::debug!(path = %path.display(), bytes, "wrote JSON");
        Ok(path)
    }
}

/// Serialize `value` as pretty JSON (2-space indent, UTF-8) into a temporary
/// file in the directory of `path`, creating missing parent directories.
pub fn stage_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<StagedJson, ReportError> {
    let mut content =
        serde_json::to_string_pretty(value).map_err(|source| ReportError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    content.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    Ok(StagedJson {
        path: path.to_path_buf(),
        tmp,
        bytes: content.len(),
    })
}

/// Write `value` as pretty JSON to `path`.
///
/// The content is staged next to `path` and renamed over it, so readers never
/// see a partial file and a failure leaves any previous file untouched.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ReportError> {
    stage_json(path, value)?.commit()?;
    Ok(())
}
