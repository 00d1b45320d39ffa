//! Ordered mapping of relative path -> text content.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The files to materialize in a scratch project.
///
/// Keys are paths relative to the project root; intermediate directories
/// are created on demand when the spec is written out. Keys are unique and
/// iterate in a deterministic (sorted) order. Inserting the same path twice
/// keeps the later content.
#[derive(Debug, Default, Clone)]
pub struct FileSpec {
    entries: BTreeMap<PathBuf, String>,
}

impl FileSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file to the spec.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.entries.insert(path.into(), content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }
}

impl<P: Into<PathBuf>, C: Into<String>> FromIterator<(P, C)> for FileSpec {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (path, content) in iter {
            spec.insert(path, content);
        }
        spec
    }
}

impl From<&[(&str, &str)]> for FileSpec {
    fn from(files: &[(&str, &str)]) -> Self {
        files.iter().copied().collect()
    }
}
