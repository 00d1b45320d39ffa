//! Shared test helpers.

/// Materialize a throwaway source tree to import from. The returned guard
/// owns the directory (`guard.path()` is its root) and removes it on drop.
pub fn fixture_tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let full = dir.path().join(rel);
        // joined onto an absolute root, so a parent always exists
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, content).unwrap();
    }
    dir
}
