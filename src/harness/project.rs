//! Populate a scratch directory and run commands inside it.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::harness::error::HarnessError;
use crate::harness::run::{run_command, CommandResult};
use crate::harness::scratch::ScratchDir;
use crate::harness::spec::FileSpec;

/// A scratch directory populated with a [`FileSpec`].
///
/// The directory and everything under it is removed when the value is
/// dropped, on every exit path. [`with_scratch_project`] is the scoped form;
/// [`release`](ScratchProject::release) tears down early and consumes the
/// project, so no operation is reachable afterwards.
#[derive(Debug)]
pub struct ScratchProject {
    dir: ScratchDir,
}

impl ScratchProject {
    /// Create the scratch directory and write every spec entry into it.
    ///
    /// Each entry creates its own parent directories (idempotent), so
    /// entries sharing a parent cannot race. A failed write aborts
    /// population; the directory is still removed on drop.
    pub fn create(files: &FileSpec) -> Result<Self, HarnessError> {
        let project = Self {
            dir: ScratchDir::create()?,
        };
        for (rel, content) in files.iter() {
            let write = |source| HarnessError::FileWrite {
                path: rel.to_path_buf(),
                source,
            };
            let full = project.resolve(rel).map_err(write)?;
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).map_err(write)?;
            }
            fs::write(&full, content).map_err(write)?;
        }
        Ok(project)
    }

    /// Absolute path of the project root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Copy an existing file or directory tree into the project at
    /// `dest_relative`. Parents of the destination are created as needed.
    /// On failure a partial copy may remain, but it is always reported.
    pub fn import_tree(&self, source: &Path, dest_relative: &Path) -> Result<(), HarnessError> {
        let import = |source_err| HarnessError::Import {
            path: source.to_path_buf(),
            source: source_err,
        };
        if !source.exists() {
            return Err(import(io::Error::new(
                io::ErrorKind::NotFound,
                "source does not exist",
            )));
        }
        let dest = self.resolve(dest_relative).map_err(import)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(import)?;
        }
        copy_tree(source, &dest).map_err(import)
    }

    /// Every file currently under the root, as sorted relative paths.
    /// Pure read of the directory state; unreadable subdirectories are
    /// skipped.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut result = Vec::new();
        walk_rec(self.root(), self.root(), &mut result);
        result.sort();
        result
    }

    /// Run a command with the project root as working directory. Blocks
    /// until the child exits; a nonzero exit code is returned in the
    /// result, not raised.
    pub fn run<P, S>(&self, program: P, args: &[S]) -> Result<CommandResult, HarnessError>
    where
        P: AsRef<OsStr>,
        S: AsRef<OsStr>,
    {
        run_command(program, args, self.root())
    }

    /// Like [`run`](ScratchProject::run), but with a subdirectory of the
    /// project as working directory.
    pub fn run_in<P, S>(
        &self,
        program: P,
        args: &[S],
        cwd_relative: &Path,
    ) -> Result<CommandResult, HarnessError>
    where
        P: AsRef<OsStr>,
        S: AsRef<OsStr>,
    {
        let cwd = self.resolve(cwd_relative).map_err(|source| HarnessError::Launch {
            program: program.as_ref().to_string_lossy().into_owned(),
            source,
        })?;
        run_command(program, args, &cwd)
    }

    /// Remove the scratch directory now instead of at drop, surfacing any
    /// deletion failure.
    pub fn release(mut self) -> Result<(), HarnessError> {
        self.dir.release()
    }

    /// Resolve a relative path under the root, rejecting anything that
    /// would escape it.
    fn resolve(&self, rel: &Path) -> io::Result<PathBuf> {
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes || rel.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path escapes the project root",
            ));
        }
        Ok(self.root().join(rel))
    }
}

/// Build a scratch project from `files`, call `f` with it, and remove the
/// directory on every exit path: normal return, `?`, or panic.
pub fn with_scratch_project<T, E, F>(files: &FileSpec, f: F) -> Result<T, E>
where
    E: From<HarnessError>,
    F: FnOnce(&ScratchProject) -> Result<T, E>,
{
    let project = ScratchProject::create(files)?;
    // Removal happens in drop, where a cleanup failure is logged instead of
    // replacing whatever `f` returned.
    f(&project)
}

fn copy_tree(source: &Path, dest: &Path) -> io::Result<()> {
    if source.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        fs::copy(source, dest)?;
    }
    Ok(())
}

fn walk_rec(dir: &Path, root: &Path, result: &mut Vec<PathBuf>) {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(_) => return,
    };
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk_rec(&path, root, result);
        } else if path.is_file() {
            if let Ok(rel) = path.strip_prefix(root) {
                result.push(rel.to_path_buf());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_all_entries() {
        let spec: FileSpec = [
            ("build.gradle.kts", "plugins {}\n"),
            ("src/main/kotlin/Main.kt", "fun main() {}\n"),
        ]
        .into_iter()
        .collect();
        let project = ScratchProject::create(&spec).unwrap();
        assert_eq!(
            fs::read_to_string(project.root().join("build.gradle.kts")).unwrap(),
            "plugins {}\n"
        );
        assert_eq!(
            fs::read_to_string(project.root().join("src/main/kotlin/Main.kt")).unwrap(),
            "fun main() {}\n"
        );
    }

    #[test]
    fn create_rejects_escaping_path() {
        let spec: FileSpec = [("../escape.txt", "x")].into_iter().collect();
        let err = ScratchProject::create(&spec).unwrap_err();
        assert!(matches!(err, HarnessError::FileWrite { .. }));
    }

    #[test]
    fn list_files_is_sorted_and_relative() {
        let spec: FileSpec = [("b.txt", ""), ("sub/a.txt", "")].into_iter().collect();
        let project = ScratchProject::create(&spec).unwrap();
        assert_eq!(
            project.list_files(),
            vec![PathBuf::from("b.txt"), PathBuf::from("sub/a.txt")]
        );
    }

    #[test]
    fn project_is_debug_formattable() {
        let project = ScratchProject::create(&FileSpec::new()).unwrap();
        let rendered = format!("{project:?}");
        assert!(rendered.contains("ScratchProject"));
    }

    #[test]
    fn import_missing_source_reports_import_error() {
        let project = ScratchProject::create(&FileSpec::new()).unwrap();
        let err = project
            .import_tree(Path::new("/no/such/source"), Path::new("lib"))
            .unwrap_err();
        assert!(matches!(err, HarnessError::Import { .. }));
    }
}
