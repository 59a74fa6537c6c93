//! Optional TOML configuration.
//!
//! Controls which files the scanner is allowed to touch. Rules come from
//! `.tidyuprc.toml` in the working directory, `~/.config/tidyup/config.toml`,
//! or a path given with `--config`; with no file present the defaults apply
//! (hidden files excluded, nothing else filtered).
//!
//! ```toml
//! [filters]
//! include_hidden = false
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["tmp"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//!
//! [scan]
//! extra_skip_dirs = []
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or compiling the configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The requested configuration file does not exist.
    NotFound(PathBuf),
    /// The file exists but is not valid TOML for this tool.
    Invalid(String),
    /// A glob pattern in the file does not compile.
    BadGlob(String),
    /// A regex pattern in the file does not compile.
    BadRegex { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadGlob(pattern) => write!(f, "Invalid glob pattern '{}'", pattern),
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filters: FilterRules,
    #[serde(default)]
    pub scan: ScanRules,
}

/// File filtering rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Organize hidden files (leading dot) too. Off by default.
    #[serde(default)]
    pub include_hidden: bool,

    /// Rules excluding files from organization.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist rules overriding every exclusion.
    #[serde(default)]
    pub include: IncludeRules,
}

/// Exclusion rules, matched per file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to leave alone (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the filename and full path
    /// (e.g. "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions to leave alone, matched case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the filename.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Whitelist rules; a match here wins over any exclusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Scanning policy knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRules {
    /// Directory names to skip at the target root, on top of the tool's
    /// own category and log folders.
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,
}

impl Config {
    /// Loads configuration, falling back through the lookup chain.
    ///
    /// With an explicit path, that file must exist and parse. Otherwise
    /// `./.tidyuprc.toml` is tried, then `~/.config/tidyup/config.toml`,
    /// then the built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".tidyuprc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tidyup")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compiles the filter rules into matcher structures.
    ///
    /// Patterns are validated and compiled once here so per-file matching
    /// is a set lookup or a precompiled-pattern test.
    pub fn compile(self) -> Result<FileFilter, ConfigError> {
        FileFilter::new(self.filters)
    }
}

/// Compiled filter rules, ready for per-file matching.
pub struct FileFilter {
    include_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl FileFilter {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let compile_globs = |patterns: &[String]| {
            patterns
                .iter()
                .map(|pattern| {
                    Pattern::new(pattern).map_err(|_| ConfigError::BadGlob(pattern.clone()))
                })
                .collect::<Result<Vec<_>, _>>()
        };

        let exclude_patterns = compile_globs(&rules.exclude.patterns)?;
        let include_patterns = compile_globs(&rules.include.patterns)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden: rules.include_hidden,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Decides whether a file may be organized.
    ///
    /// Include patterns win first; then hidden-file handling, exact
    /// filenames, extensions, globs, and regexes can each veto the file.
    /// Anything unmatched is permitted.
    pub fn permits(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        // Globs like "*.part" should work no matter how deep the file
        // sits, so patterns are tried against the bare name too.
        let matches_glob = |pattern: &Pattern| {
            pattern.matches_path(file_path) || pattern.matches(file_name.as_ref())
        };

        if self.include_patterns.iter().any(matches_glob) {
            return true;
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension()
            && self
                .exclude_extensions
                .contains(&ext.to_string_lossy().to_lowercase())
        {
            return false;
        }

        if self.exclude_patterns.iter().any(matches_glob) {
            return false;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(rules: FilterRules) -> FileFilter {
        Config {
            filters: rules,
            scan: ScanRules::default(),
        }
        .compile()
        .expect("rules should compile")
    }

    #[test]
    fn test_defaults_exclude_hidden_files_only() {
        let filter = Config::default().compile().unwrap();
        assert!(!filter.permits(Path::new(".DS_Store")));
        assert!(filter.permits(Path::new("photo.jpg")));
    }

    #[test]
    fn test_include_hidden_flag() {
        let filter = filter_for(FilterRules {
            include_hidden: true,
            ..Default::default()
        });
        assert!(filter.permits(Path::new(".DS_Store")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let filter = filter_for(FilterRules {
            exclude: ExcludeRules {
                filenames: vec!["Thumbs.db".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!filter.permits(Path::new("Thumbs.db")));
        assert!(filter.permits(Path::new("photo.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let filter = filter_for(FilterRules {
            exclude: ExcludeRules {
                extensions: vec!["tmp".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!filter.permits(Path::new("scratch.tmp")));
        assert!(!filter.permits(Path::new("scratch.TMP")));
        assert!(filter.permits(Path::new("scratch.txt")));
    }

    #[test]
    fn test_exclude_glob_patterns() {
        let filter = filter_for(FilterRules {
            exclude: ExcludeRules {
                patterns: vec!["*.part".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!filter.permits(Path::new("movie.mkv.part")));
        assert!(filter.permits(Path::new("movie.mkv")));
    }

    #[test]
    fn test_exclude_glob_matches_nested_paths() {
        let filter = filter_for(FilterRules {
            exclude: ExcludeRules {
                patterns: vec!["*.part".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!filter.permits(Path::new("/tmp/target/downloads/movie.mkv.part")));
        assert!(filter.permits(Path::new("/tmp/target/downloads/movie.mkv")));
    }

    #[test]
    fn test_exclude_regex_matches_filename() {
        let filter = filter_for(FilterRules {
            exclude: ExcludeRules {
                regex: vec![r"^draft_.*\.docx$".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!filter.permits(Path::new("draft_report.docx")));
        assert!(filter.permits(Path::new("report.docx")));
    }

    #[test]
    fn test_include_pattern_overrides_exclusion() {
        let filter = filter_for(FilterRules {
            include_hidden: false,
            include: IncludeRules {
                patterns: vec![".keepme".to_string()],
            },
            ..Default::default()
        });
        assert!(filter.permits(Path::new(".keepme")));
        assert!(!filter.permits(Path::new(".other")));
    }

    #[test]
    fn test_invalid_glob_is_rejected_at_compile() {
        let result = Config {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[oops".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            scan: ScanRules::default(),
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadGlob(_))));
    }

    #[test]
    fn test_invalid_regex_is_rejected_at_compile() {
        let result = Config {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec!["[oops(".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            scan: ScanRules::default(),
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadRegex { .. })));
    }

    #[test]
    fn test_load_from_explicit_missing_path_fails() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_full_document() {
        let doc = r#"
            [filters]
            include_hidden = true

            [filters.exclude]
            filenames = ["Thumbs.db"]
            patterns = ["*.part"]
            extensions = ["tmp"]
            regex = []

            [filters.include]
            patterns = ["*.keep"]

            [scan]
            extra_skip_dirs = ["work-in-progress"]
        "#;
        let config: Config = toml::from_str(doc).expect("document should parse");
        assert!(config.filters.include_hidden);
        assert_eq!(config.scan.extra_skip_dirs, vec!["work-in-progress"]);
        assert_eq!(config.filters.exclude.filenames, vec!["Thumbs.db"]);
    }
}
