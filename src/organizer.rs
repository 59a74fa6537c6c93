/// File relocation into category directories.
///
/// This module moves individual files into `<target>/<category>/`,
/// creating the category directory on demand and resolving destination
/// name collisions with a numeric suffix. In dry-run mode the same
/// resolution is computed without mutating the filesystem.
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while organizing files.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target directory does not exist.
    TargetNotFound { path: PathBuf },
    /// The target path exists but is not a directory.
    NotADirectory { path: PathBuf },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to create or write the run log.
    LogSetupFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::LogSetupFailed { path, source } => {
                write!(f, "Failed to set up log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// The result of moving (or simulating the move of) one file.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Where the file was moved, or would be moved in dry-run mode.
    pub destination: PathBuf,
    /// Size of the source file in bytes, read before the move.
    pub size_bytes: u64,
    /// Whether the category directory was missing beforehand.
    pub created_dir: bool,
    /// True when the move was only simulated.
    pub simulated: bool,
}

/// Appends a numeric disambiguator between file stem and extension.
///
/// `photo.jpg` with counter 1 becomes `photo_1.jpg`; a file without an
/// extension gets the suffix at the end (`README` -> `README_1`).
fn numbered_name(file_name: &str, counter: u32) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, counter, ext),
        _ => format!("{}_{}", file_name, counter),
    }
}

/// Moves files into category subdirectories under a base path.
pub struct FileOrganizer<'a> {
    base_path: &'a Path,
    dry_run: bool,
}

impl<'a> FileOrganizer<'a> {
    /// Creates an organizer rooted at `base_path`.
    ///
    /// With `dry_run` set, every operation is computed but nothing on the
    /// filesystem changes.
    pub fn new(base_path: &'a Path, dry_run: bool) -> Self {
        Self { base_path, dry_run }
    }

    /// Moves `file_path` into the `category_dir_name` folder under the base
    /// path, creating that folder if needed.
    ///
    /// If the destination name is already taken, `_1`, `_2`, ... is
    /// appended before the extension until a free name is found. The
    /// existing file is never overwritten. The collision probe runs in
    /// dry-run mode too, so simulated destinations match a real run.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use tidyup::organizer::FileOrganizer;
    ///
    /// let organizer = FileOrganizer::new(Path::new("/data"), false);
    /// let outcome = organizer.move_to_category(Path::new("/data/photo.jpg"), "images")?;
    /// println!("moved to {}", outcome.destination.display());
    /// # Ok::<(), tidyup::organizer::OrganizeError>(())
    /// ```
    pub fn move_to_category(
        &self,
        file_path: &Path,
        category_dir_name: &str,
    ) -> OrganizeResult<MoveOutcome> {
        let category_path = self.base_path.join(category_dir_name);

        // Source size is read up front; after the rename the path is gone.
        let size_bytes = fs::metadata(file_path)
            .map_err(|e| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: e,
            })?
            .len();

        let created_dir = !category_path.exists();
        if created_dir && !self.dry_run {
            fs::create_dir_all(&category_path).map_err(|e| {
                OrganizeError::DirectoryCreationFailed {
                    path: category_path.clone(),
                    source: e,
                }
            })?;
        }

        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no usable name component",
                ),
            })?;

        let destination = Self::resolve_destination(&category_path, file_name);

        if !self.dry_run {
            fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: destination.clone(),
                source_error: e,
            })?;
        }

        Ok(MoveOutcome {
            destination,
            size_bytes,
            created_dir,
            simulated: self.dry_run,
        })
    }

    /// Picks the first free destination name inside the category directory.
    fn resolve_destination(category_path: &Path, file_name: &str) -> PathBuf {
        let mut destination = category_path.join(file_name);
        let mut counter = 1u32;
        while destination.exists() {
            destination = category_path.join(numbered_name(file_name, counter));
            counter += 1;
        }
        destination
    }
}
