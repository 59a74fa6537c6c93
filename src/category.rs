/// File categorization by extension.
///
/// Maps file extensions to the broad category folder a file belongs in.
/// The table is static, built once at startup, and passed explicitly to
/// call sites so classification stays a pure lookup.
///
/// # Examples
///
/// ```
/// use tidyup::category::{Category, CategoryMap};
///
/// let map = CategoryMap::new();
/// assert_eq!(map.categorize(Some("png")), Category::Images);
/// assert_eq!(map.categorize(Some(".PDF")), Category::Documents);
/// assert_eq!(map.categorize(None), Category::Others);
/// ```
use std::collections::HashMap;
use std::path::Path;

/// A category folder a file can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, ...)
    Images,
    /// Document files (PDF, DOCX, TXT, ...)
    Documents,
    /// Audio files (MP3, FLAC, WAV, ...)
    Audio,
    /// Video files (MP4, MKV, AVI, ...)
    Video,
    /// Archive files (ZIP, TAR, 7Z, ...)
    Archives,
    /// Source code and markup files (PY, JS, JSON, ...)
    Code,
    /// Anything unrecognized, including files without an extension.
    Others,
}

/// Extension table, lowercase, without leading dots.
const EXTENSION_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Images,
        &["jpg", "jpeg", "png", "gif", "bmp", "svg", "tiff", "webp"],
    ),
    (
        Category::Documents,
        &[
            "pdf", "doc", "docx", "txt", "rtf", "odt", "xls", "xlsx", "ppt", "pptx",
        ],
    ),
    (
        Category::Audio,
        &["mp3", "wav", "flac", "aac", "ogg", "wma"],
    ),
    (
        Category::Video,
        &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"],
    ),
    (
        Category::Archives,
        &["zip", "rar", "7z", "tar", "gz", "bz2"],
    ),
    (
        Category::Code,
        &[
            "py", "js", "html", "css", "java", "cpp", "c", "php", "rb", "go", "ts", "jsx", "json",
        ],
    ),
];

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Images,
        Category::Documents,
        Category::Audio,
        Category::Video,
        Category::Archives,
        Category::Code,
        Category::Others,
    ];

    /// Returns the folder name files of this category are moved into.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyup::category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Others.dir_name(), "others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Documents => "documents",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Archives => "archives",
            Category::Code => "code",
            Category::Others => "others",
        }
    }
}

/// Immutable extension-to-category lookup.
///
/// Built once at startup from the static table and handed to the run
/// pipeline; it never mutates after construction.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extensions: HashMap<&'static str, Category>,
}

impl CategoryMap {
    /// Builds the map from the standard extension table.
    pub fn new() -> Self {
        let mut extensions = HashMap::new();
        for (category, exts) in EXTENSION_TABLE {
            for ext in *exts {
                extensions.insert(*ext, *category);
            }
        }
        Self { extensions }
    }

    /// Maps an extension to its category.
    ///
    /// Total over all inputs: matching is case-insensitive, a single
    /// leading dot is accepted, and anything unrecognized (including a
    /// missing extension) maps to [`Category::Others`].
    pub fn categorize(&self, extension: Option<&str>) -> Category {
        let Some(raw) = extension else {
            return Category::Others;
        };
        let normalized = raw.strip_prefix('.').unwrap_or(raw).to_lowercase();
        self.extensions
            .get(normalized.as_str())
            .copied()
            .unwrap_or(Category::Others)
    }

    /// Determines the category for a path from its extension component.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use tidyup::category::{Category, CategoryMap};
    ///
    /// let map = CategoryMap::new();
    /// assert_eq!(map.category_for_path(Path::new("a/photo.JPG")), Category::Images);
    /// assert_eq!(map.category_for_path(Path::new("README")), Category::Others);
    /// ```
    pub fn category_for_path(&self, path: &Path) -> Category {
        self.categorize(path.extension().and_then(|ext| ext.to_str()))
    }

    /// Folder names this tool may create under the target directory.
    pub fn output_dir_names(&self) -> impl Iterator<Item = &'static str> {
        Category::ALL.iter().map(|category| category.dir_name())
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}
