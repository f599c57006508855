//! Writes the generated site to disk: clearing the output root, copying
//! static assets into it verbatim, and writing rendered documents to their
//! computed relative paths. Every write is a full-file overwrite; the output
//! tree is regenerated wholesale on each build.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Responsible for the output side of a build.
pub struct Writer<'a> {
    /// The generated-site root. Cleared (but not deleted) at the start of
    /// every build, created if absent.
    pub output_directory: &'a Path,

    /// The static-assets directory, copied into the output root verbatim.
    /// Optional: skipped when it doesn't exist.
    pub public_directory: &'a Path,
}

impl Writer<'_> {
    /// Deletes every entry inside the output directory without deleting the
    /// directory itself, or creates it if absent. We deliberately keep the
    /// root directory alive so anything holding it open (a dev server, a
    /// shell) survives rebuilds.
    pub fn clean(&self) -> Result<()> {
        if !self.output_directory.exists() {
            return fs::create_dir_all(self.output_directory)
                .map_err(|err| Error::Clean {
                    path: self.output_directory.to_owned(),
                    err,
                });
        }

        for entry in read_dir(self.output_directory)? {
            let entry = entry.map_err(|err| Error::Clean {
                path: self.output_directory.to_owned(),
                err,
            })?;
            let result = if entry.file_type().map_or(false, |t| t.is_dir()) {
                fs::remove_dir_all(entry.path())
            } else {
                fs::remove_file(entry.path())
            };
            result.map_err(|err| Error::Clean {
                path: entry.path(),
                err,
            })?;
        }
        Ok(())
    }

    /// Copies the public directory's entire contents into the output root,
    /// overwriting on conflict. A missing public directory is not an error.
    pub fn copy_static(&self) -> Result<()> {
        if !self.public_directory.exists() {
            return Ok(());
        }
        copy_dir(self.public_directory, self.output_directory)
    }

    /// Writes one rendered document to `relative_path` under the output
    /// root, creating parent directories as needed.
    pub fn write_document(
        &self,
        relative_path: &str,
        contents: &str,
    ) -> Result<()> {
        let path = self.output_directory.join(relative_path);
        let annotate = |err| Error::Write {
            path: path.clone(),
            err,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(annotate)?;
        }
        fs::write(&path, contents).map_err(annotate)
    }
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(dir).map_err(|err| Error::Clean {
        path: dir.to_owned(),
        err,
    })
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    let annotate = |path: &Path| {
        let path = path.to_owned();
        move |err| Error::Copy { path, err }
    };

    fs::create_dir_all(dst).map_err(annotate(dst))?;
    for entry in fs::read_dir(src).map_err(annotate(src))? {
        let entry = entry.map_err(annotate(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type().map_err(annotate(&from))?.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(annotate(&from))?;
        }
    }
    Ok(())
}

/// Represents the result of an output-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error preparing or writing the output tree.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while clearing the output directory.
    Clean { path: PathBuf, err: io::Error },

    /// Returned for I/O problems while copying static assets.
    Copy { path: PathBuf, err: io::Error },

    /// Returned for I/O problems while writing rendered documents.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory `{}`: {}", path.display(), err)
            }
            Error::Copy { path, err } => {
                write!(f, "Copying asset `{}`: {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Clean { path: _, err } => Some(err),
            Error::Copy { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}
