use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {} unusable: {message}", path.display())]
    OutputDir { path: PathBuf, message: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A directory known to exist and accept new files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Creates the directory if missing and checks that a file can be
    /// created inside it.
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let unusable = |message: String| PersistError::OutputDir {
            path: path.clone(),
            message,
        };

        match fs::metadata(&path) {
            Ok(meta) if !meta.is_dir() => return Err(unusable("not a directory".into())),
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&path).map_err(|e| unusable(e.to_string()))?;
            }
            Err(err) => return Err(unusable(err.to_string())),
        }
        NamedTempFile::new_in(&path).map_err(|e| unusable(e.to_string()))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `contents` to `{dir}/{filename}` through a synced temp file
    /// renamed over the target, so readers never see a partial file.
    pub fn write_atomic(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.path.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.path)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
