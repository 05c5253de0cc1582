//! Line-source capability.
//!
//! Every input and fixture is read through [`LineSource`], so the checks
//! never touch the filesystem directly. `FsLineSource` is the production
//! backend; an in-memory fake lives in [`crate::fakes`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{SourceError, SourceResult};

/// Produces the lines of a named resource with terminators stripped.
pub trait LineSource {
    /// Read every line of `id`. The resource is drained and released before
    /// returning.
    fn read_lines(&self, id: &str) -> SourceResult<Vec<String>>;
}

impl<T: LineSource + ?Sized> LineSource for &T {
    fn read_lines(&self, id: &str) -> SourceResult<Vec<String>> {
        (**self).read_lines(id)
    }
}

/// Filesystem-backed line source resolving identifiers against a root directory.
#[derive(Debug, Clone)]
pub struct FsLineSource {
    root: PathBuf,
}

impl FsLineSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl LineSource for FsLineSource {
    fn read_lines(&self, id: &str) -> SourceResult<Vec<String>> {
        let path = self.root.join(id);
        let file = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(id.to_string())
            } else {
                SourceError::Io {
                    id: id.to_string(),
                    source: e,
                }
            }
        })?;

        // `lines()` strips both "\n" and "\r\n".
        BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| SourceError::Io {
                id: id.to_string(),
                source: e,
            })
    }
}
