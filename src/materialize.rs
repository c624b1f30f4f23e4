use crate::{
    blueprint::{Blueprint, EntryKind},
    errors::{FileOperation, IoError},
};
use colored::Colorize;
use std::{fs, path::Path};

/// Knobs for a single generate run.
#[derive(Debug, Default)]
pub struct Options {
    /// Leave files that already exist untouched instead of truncating them.
    pub skip_existing: bool,
}

/// Counts reported back after a successful run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
    pub skipped: usize,
}

/// Creates the directory at `path` along with any missing ancestors.
///
/// Pre-existence is not an error; two calls against the same path both
/// succeed and leave a single directory behind.
///
/// # Errors
///
/// Returns an [`IoError`] when creation fails for any other reason, such as
/// missing permissions or a regular file already occupying a segment of the
/// path.
pub fn ensure_directory(path: &Path) -> Result<(), IoError> {
    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))
}

/// Creates (or truncates) the file at `path` and stamps it with a one-line
/// comment when a non-empty description is given, leaving it zero-byte
/// otherwise.
///
/// Truncation is deliberate: re-stamping an existing file wipes whatever was
/// written into it since the last run. Callers that want to protect edited
/// files use [`Options::skip_existing`] upstream.
///
/// # Errors
///
/// Returns an [`IoError`] if the file cannot be created or written.
pub fn stamp_file(path: &Path, marker: &str, description: Option<&str>) -> Result<(), IoError> {
    let contents = match description {
        Some(text) if !text.is_empty() => format!("{} {}\n", marker, text),
        _ => String::new(),
    };

    fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

    let msg = format!("{} {}", "create".green(), path.display());

    println!("{}", &msg);

    Ok(())
}

/// Walks the blueprint in authoring order and performs the filesystem
/// mutations it declares, all of them rooted at `destination`.
///
/// A file entry's parent directory is created on the way, so a blueprint
/// only needs explicit `dir` entries for directories that matter on their
/// own. The first failure aborts the walk; entries already materialized stay
/// on disk.
///
/// # Errors
///
/// Returns the [`IoError`] of the first entry that could not be created.
pub fn materialize(
    blueprint: &Blueprint,
    destination: &Path,
    options: &Options,
) -> Result<Summary, IoError> {
    let marker = blueprint.comment_marker();

    let mut summary = Summary::default();

    for entry in &blueprint.entries {
        let target = destination.join(&entry.path);

        match entry.kind {
            EntryKind::Dir => {
                ensure_directory(&target)?;

                summary.directories += 1;
            }
            EntryKind::File => {
                if let Some(parent) = target.parent() {
                    if !parent.as_os_str().is_empty() {
                        ensure_directory(parent)?;
                    }
                }

                if options.skip_existing && target.exists() {
                    log::debug!("'{}' already exists", target.display());

                    let msg = format!("{} {}", "skip".yellow(), target.display());

                    println!("{}", &msg);

                    summary.skipped += 1;

                    continue;
                }

                stamp_file(&target, marker, entry.description.as_deref())?;

                summary.files += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::Entry;
    use std::path::PathBuf;

    fn dir(path: &str) -> Entry {
        Entry {
            path: PathBuf::from(path),
            kind: EntryKind::Dir,
            description: None,
        }
    }

    fn file(path: &str, description: Option<&str>) -> Entry {
        Entry {
            path: PathBuf::from(path),
            kind: EntryKind::File,
            description: description.map(str::to_string),
        }
    }

    fn blueprint(entries: Vec<Entry>) -> Blueprint {
        Blueprint {
            marker: None,
            entries,
        }
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("lib");

        ensure_directory(&target).unwrap();
        ensure_directory(&target).unwrap();

        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_creates_all_ancestors() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("a/b/c");

        ensure_directory(&target).unwrap();

        assert!(root.path().join("a").is_dir());
        assert!(root.path().join("a/b").is_dir());
        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_fails_when_a_file_is_in_the_way() {
        let root = tempfile::tempdir().unwrap();
        let occupied = root.path().join("taken");
        std::fs::write(&occupied, b"not a directory").unwrap();

        let result = ensure_directory(&occupied.join("child"));

        assert!(result.is_err());
    }

    #[test]
    fn stamp_file_writes_a_single_comment_line() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("app.dart");

        stamp_file(&target, "//", Some("Entry setup")).unwrap();

        let contents = std::fs::read_to_string(&target).unwrap();
        assert_eq!(contents, "// Entry setup\n");
    }

    #[test]
    fn stamp_file_without_description_is_zero_byte() {
        let root = tempfile::tempdir().unwrap();
        let none = root.path().join("empty.dart");
        let blank = root.path().join("blank.dart");

        stamp_file(&none, "//", None).unwrap();
        stamp_file(&blank, "//", Some("")).unwrap();

        assert_eq!(std::fs::metadata(&none).unwrap().len(), 0);
        assert_eq!(std::fs::metadata(&blank).unwrap().len(), 0);
    }

    #[test]
    fn stamp_file_truncates_previous_content() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("app.dart");

        stamp_file(&target, "//", Some("first")).unwrap();
        stamp_file(&target, "//", Some("second")).unwrap();

        let contents = std::fs::read_to_string(&target).unwrap();
        assert_eq!(contents, "// second\n");
    }

    #[test]
    fn materialize_creates_every_declared_entry() {
        let root = tempfile::tempdir().unwrap();
        let tree = blueprint(vec![
            dir("lib"),
            file("lib/main.dart", None),
            dir("lib/app"),
            file("lib/app/app.dart", Some("Entry setup")),
        ]);

        let summary = materialize(&tree, root.path(), &Options::default()).unwrap();

        assert_eq!(
            summary,
            Summary {
                directories: 2,
                files: 2,
                skipped: 0
            }
        );
        assert!(root.path().join("lib").is_dir());
        assert!(root.path().join("lib/app").is_dir());
        assert_eq!(
            std::fs::metadata(root.path().join("lib/main.dart"))
                .unwrap()
                .len(),
            0
        );
        assert_eq!(
            std::fs::read_to_string(root.path().join("lib/app/app.dart")).unwrap(),
            "// Entry setup\n"
        );
    }

    #[test]
    fn materialize_creates_implicit_parents_for_files() {
        let root = tempfile::tempdir().unwrap();
        let tree = blueprint(vec![file("a/b/c/notes.txt", None)]);

        materialize(&tree, root.path(), &Options::default()).unwrap();

        assert!(root.path().join("a").is_dir());
        assert!(root.path().join("a/b").is_dir());
        assert!(root.path().join("a/b/c").is_dir());
        assert!(root.path().join("a/b/c/notes.txt").is_file());
    }

    #[test]
    fn materialize_honors_the_configured_marker() {
        let root = tempfile::tempdir().unwrap();
        let tree = Blueprint {
            marker: Some("#".to_string()),
            entries: vec![file("conf/settings.py", Some("Django settings"))],
        };

        materialize(&tree, root.path(), &Options::default()).unwrap();

        assert_eq!(
            std::fs::read_to_string(root.path().join("conf/settings.py")).unwrap(),
            "# Django settings\n"
        );
    }

    #[test]
    fn materialize_skips_existing_files_when_asked() {
        let root = tempfile::tempdir().unwrap();
        let tree = blueprint(vec![file("lib/main.dart", Some("regenerated"))]);

        materialize(&tree, root.path(), &Options::default()).unwrap();
        std::fs::write(root.path().join("lib/main.dart"), "fn main() {}\n").unwrap();

        let summary = materialize(
            &tree,
            root.path(),
            &Options {
                skip_existing: true,
            },
        )
        .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.files, 0);
        assert_eq!(
            std::fs::read_to_string(root.path().join("lib/main.dart")).unwrap(),
            "fn main() {}\n"
        );
    }

    #[test]
    fn materialize_aborts_on_an_occupied_root() {
        let root = tempfile::tempdir().unwrap();
        let occupied = root.path().join("project");
        std::fs::write(&occupied, b"a regular file").unwrap();

        let tree = blueprint(vec![dir("lib"), file("lib/main.dart", None)]);

        let result = materialize(&tree, &occupied, &Options::default());

        assert!(result.is_err());
        assert!(occupied.is_file());
    }
}
