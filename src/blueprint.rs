use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

/// Comment token written in front of a file's description when the manifest
/// does not pick one.
pub const DEFAULT_MARKER: &str = "//";

#[derive(Error, Debug, Diagnostic)]
pub enum BlueprintError {
    #[error("I/O error within blueprint domain")]
    #[diagnostic(code(ossa::blueprint::io))]
    Io(#[from] IoError),

    #[error("Unable to parse blueprint at '{path}': {source}")]
    #[diagnostic(code(ossa::blueprint::parse_toml), help("Review the manifest file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate entry for path '{path}' (declared as {first}, then as {second})")]
    #[diagnostic(
        code(ossa::blueprint::duplicate_path),
        help("A path may be declared at most once per blueprint")
    )]
    DuplicatePath {
        path: PathBuf,
        first: EntryKind,
        second: EntryKind,
    },

    #[error("Directory entry '{path}' carries a description")]
    #[diagnostic(
        code(ossa::blueprint::described_directory),
        help("Descriptions are stamped into files; drop it or declare the entry as a file")
    )]
    DescribedDirectory { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}
impl EntryKind {
    fn as_str(&self) -> &str {
        match self {
            Self::Dir => "dir",
            Self::File => "file",
        }
    }
}
impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single declared filesystem entry: where it goes, what it is, and the
/// one-line description stamped into it (files only).
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub description: Option<String>,
}

/// The ordered set of entries one generate run materializes.
#[derive(Debug, Deserialize)]
pub struct Blueprint {
    pub marker: Option<String>,
    #[serde(default, rename = "entry")]
    pub entries: Vec<Entry>,
}
impl Blueprint {
    /// Loads and validates a blueprint manifest.
    ///
    /// # Errors
    ///
    /// Returns a [`BlueprintError`] if the file cannot be read, is not valid
    /// TOML, declares the same path twice, or puts a description on a
    /// directory entry.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BlueprintError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let mut parsed: Blueprint =
            toml::from_str(&content).map_err(|error| BlueprintError::ParseToml {
                path: path.to_path_buf(),
                source: error,
            })?;

        for entry in &mut parsed.entries {
            entry.path = normalize_path(&entry.path);
        }

        parsed.validate()?;

        Ok(parsed)
    }

    pub fn comment_marker(&self) -> &str {
        self.marker.as_deref().unwrap_or(DEFAULT_MARKER)
    }

    fn validate(&self) -> Result<(), BlueprintError> {
        let mut seen: IndexMap<&Path, EntryKind> = IndexMap::new();

        for entry in &self.entries {
            if let Some(first) = seen.insert(entry.path.as_path(), entry.kind) {
                return Err(BlueprintError::DuplicatePath {
                    path: entry.path.clone(),
                    first,
                    second: entry.kind,
                });
            }

            if entry.kind == EntryKind::Dir && entry.description.is_some() {
                return Err(BlueprintError::DescribedDirectory {
                    path: entry.path.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Collapses `.` and `..` components so that `./lib` and `lib` name the same
/// entry during validation and materialization.
fn normalize_path(input: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in input.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // For normal components, push them
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}
