//! Candidate file enumeration.
//!
//! Walks the target directory (one level deep, or fully with the recursive
//! option) and yields the regular files that are eligible for
//! organization. The tool's own output folders are pruned so a second run
//! over already-sorted output finds nothing to do.

use crate::config::FileFilter;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerates organizable files under a target directory.
///
/// Directories and symbolic links are never yielded. Directories listed in
/// the skip set are pruned, together with their subtrees, when they sit
/// directly under the target root; that is where this tool creates its
/// category and log folders.
pub struct Scanner {
    root: PathBuf,
    recursive: bool,
    skip_dirs: HashSet<String>,
}

impl Scanner {
    /// Creates a scanner over `root`.
    pub fn new(root: &Path, recursive: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            recursive,
            skip_dirs: HashSet::new(),
        }
    }

    /// Adds directory names to prune at the target root.
    pub fn skip_dirs<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.skip_dirs.extend(names);
        self
    }

    /// Returns a lazy iterator over the files to organize.
    ///
    /// Each candidate is checked against `filter` before being yielded,
    /// so exclusion rules (hidden files, configured patterns) apply here
    /// and not downstream.
    pub fn files<'f>(&self, filter: &'f FileFilter) -> impl Iterator<Item = PathBuf> + 'f {
        let skip = self.skip_dirs.clone();
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                let is_skipped_root_dir = entry.depth() == 1
                    && entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip.contains(name));
                !is_skipped_root_dir
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(move |path| filter.permits(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn default_filter() -> FileFilter {
        Config::default().compile().expect("default config compiles")
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_flat_scan_yields_only_top_level_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.jpg"), "b").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested/c.png"), "c").unwrap();

        let filter = default_filter();
        let found: Vec<_> = Scanner::new(root, false).files(&filter).collect();
        assert_eq!(names(&found), vec!["a.txt", "b.jpg"]);
    }

    #[test]
    fn test_recursive_scan_descends() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir_all(root.join("nested/deep")).unwrap();
        fs::write(root.join("nested/c.png"), "c").unwrap();
        fs::write(root.join("nested/deep/d.mp3"), "d").unwrap();

        let filter = default_filter();
        let found: Vec<_> = Scanner::new(root, true).files(&filter).collect();
        assert_eq!(names(&found), vec!["a.txt", "c.png", "d.mp3"]);
    }

    #[test]
    fn test_skip_dirs_are_pruned_at_root_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("images")).unwrap();
        fs::write(root.join("images/sorted.jpg"), "x").unwrap();
        fs::create_dir_all(root.join("projects/images")).unwrap();
        fs::write(root.join("projects/images/raw.jpg"), "y").unwrap();

        let filter = default_filter();
        let scanner =
            Scanner::new(root, true).skip_dirs(["images".to_string(), "logs".to_string()]);
        let found: Vec<_> = scanner.files(&filter).collect();

        // The root-level images/ folder is output and stays untouched; the
        // user's nested images/ folder is still fair game.
        assert_eq!(names(&found), vec!["raw.jpg"]);
    }

    #[test]
    fn test_directories_are_not_yielded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("only_dirs_here")).unwrap();

        let filter = default_filter();
        let found: Vec<_> = Scanner::new(root, true).files(&filter).collect();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_yielded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();

        let filter = default_filter();
        let found: Vec<_> = Scanner::new(root, false).files(&filter).collect();
        assert_eq!(names(&found), vec!["real.txt"]);
    }

    #[test]
    fn test_hidden_files_are_filtered() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("visible.txt"), "v").unwrap();
        fs::write(root.join(".hidden"), "h").unwrap();

        let filter = default_filter();
        let found: Vec<_> = Scanner::new(root, false).files(&filter).collect();
        assert_eq!(names(&found), vec!["visible.txt"]);
    }
}
