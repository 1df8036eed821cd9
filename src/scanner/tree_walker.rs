use crate::error::{CodeDumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file, or a symlink that is not a directory link.
    File,
    /// FIFO, socket or device node.
    Special,
}

#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    /// Lossy form of the last path component, used only for name matching.
    pub file_name: String,
    pub kind: EntryKind,
}

impl FileCandidate {
    pub fn new(source_path: PathBuf, relative_path: PathBuf) -> Self {
        let file_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            source_path,
            relative_path,
            file_name,
            kind: EntryKind::File,
        }
    }

    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Header written to the dump, joined onto `.` like a walk of the current
    /// directory would produce (`./src/main.rs`). `None` when the relative
    /// path is not valid UTF-8 and therefore cannot be written faithfully.
    pub fn header_path(&self) -> Option<String> {
        Path::new(".")
            .join(&self.relative_path)
            .to_str()
            .map(str::to_string)
    }

    /// Lossy rendering of the header for console diagnostics.
    pub fn display_path(&self) -> String {
        Path::new(".").join(&self.relative_path).display().to_string()
    }
}

pub struct TreeWalker {
    root: PathBuf,
    sort_entries: bool,
}

impl TreeWalker {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            sort_entries: true,
        }
    }

    pub fn with_sorting(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    pub fn validate_root(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(CodeDumpError::InvalidRoot {
                path: format!("{} does not exist", self.root.display()),
            });
        }

        if !self.root.is_dir() {
            return Err(CodeDumpError::InvalidRoot {
                path: format!("{} is not a directory", self.root.display()),
            });
        }

        Ok(())
    }

    /// Lazily yields every file below the root. Directory-level failures are
    /// yielded as `CodeDumpError::Walk` and the walk carries on past them.
    pub fn candidates(&self) -> Candidates<'_> {
        let mut walker = WalkDir::new(&self.root).min_depth(1).follow_links(false);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        Candidates {
            inner: walker.into_iter(),
            root: &self.root,
        }
    }
}

pub struct Candidates<'a> {
    inner: walkdir::IntoIter,
    root: &'a Path,
}

impl Candidates<'_> {
    fn to_candidate(&self, entry: &DirEntry) -> Option<FileCandidate> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        let mut kind = EntryKind::File;
        if file_type.is_symlink() {
            // Directory links are listed but never descended into; dangling
            // links stay candidates and fail later as unreadable.
            if fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()) {
                tracing::debug!(path = %entry.path().display(), "not following directory symlink");
                return None;
            }
        } else if !file_type.is_file() {
            // Reading a FIFO could block forever
            kind = EntryKind::Special;
        }

        let relative_path = entry
            .path()
            .strip_prefix(self.root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();

        Some(FileCandidate::new(entry.path().to_path_buf(), relative_path).with_kind(kind))
    }
}

impl Iterator for Candidates<'_> {
    type Item = Result<FileCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.root.display().to_string());
                    let message = match err.io_error() {
                        Some(io_err) => io_err.to_string(),
                        None => err.to_string(),
                    };
                    return Some(Err(CodeDumpError::Walk { path, message }));
                }
            };

            if let Some(candidate) = self.to_candidate(&entry) {
                return Some(Ok(candidate));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect_relative(walker: &TreeWalker) -> Vec<String> {
        walker
            .candidates()
            .filter_map(|c| c.ok())
            .map(|c| c.display_path())
            .collect()
    }

    #[test]
    fn test_candidate_creation() {
        let candidate = FileCandidate::new(
            PathBuf::from("/tmp/project/src/lib.rs"),
            PathBuf::from("src/lib.rs"),
        );

        assert_eq!(candidate.file_name, "lib.rs");
        assert_eq!(candidate.kind, EntryKind::File);
        assert_eq!(
            candidate.display_path(),
            Path::new(".").join("src").join("lib.rs").display().to_string()
        );
        assert_eq!(candidate.header_path(), Some(candidate.display_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_relative_path_has_no_header() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"a\xff.txt");
        let candidate = FileCandidate::new(PathBuf::from("/tmp/project").join(name), PathBuf::from(name));

        assert!(candidate.header_path().is_none());
        assert!(candidate.display_path().contains('\u{fffd}'));
    }

    #[test]
    fn test_walks_nested_directories_in_sorted_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b_dir/inner")).unwrap();
        fs::write(root.join("z.txt"), "z").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b_dir/m.txt"), "m").unwrap();
        fs::write(root.join("b_dir/inner/deep.txt"), "deep").unwrap();

        let walker = TreeWalker::new(root);
        let paths = collect_relative(&walker);

        let expected: Vec<String> = [
            Path::new(".").join("a.txt"),
            Path::new(".").join("b_dir").join("inner").join("deep.txt"),
            Path::new(".").join("b_dir").join("m.txt"),
            Path::new(".").join("z.txt"),
        ]
        .iter()
        .map(|p| p.display().to_string())
        .collect();

        assert_eq!(paths, expected);
    }

    #[test]
    fn test_unsorted_walk_finds_same_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("one.txt"), "1").unwrap();
        fs::write(root.join("sub/two.txt"), "2").unwrap();

        let mut unsorted = collect_relative(&TreeWalker::new(root).with_sorting(false));
        let sorted = collect_relative(&TreeWalker::new(root));
        unsorted.sort();

        let mut expected = sorted.clone();
        expected.sort();
        assert_eq!(unsorted, expected);
    }

    #[test]
    fn test_directories_are_not_candidates() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("empty")).unwrap();

        let walker = TreeWalker::new(temp_dir.path());
        assert_eq!(walker.candidates().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("real")).unwrap();
        fs::write(root.join("real/file.txt"), "content").unwrap();
        symlink(root.join("real"), root.join("linked_dir")).unwrap();
        symlink(root.join("real/file.txt"), root.join("linked_file.txt")).unwrap();
        symlink(root.join("missing.txt"), root.join("dangling.txt")).unwrap();

        let names: Vec<String> = TreeWalker::new(root)
            .candidates()
            .filter_map(|c| c.ok())
            .map(|c| c.file_name)
            .collect();

        assert_eq!(names, vec!["dangling.txt", "linked_file.txt", "file.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_sockets_are_special_candidates() {
        use std::os::unix::net::UnixListener;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        let _listener = UnixListener::bind(root.join("b.sock")).unwrap();

        let kinds: Vec<(String, EntryKind)> = TreeWalker::new(root)
            .candidates()
            .filter_map(|c| c.ok())
            .map(|c| (c.file_name, c.kind))
            .collect();

        assert_eq!(
            kinds,
            vec![
                ("a.txt".to_string(), EntryKind::File),
                ("b.sock".to_string(), EntryKind::Special),
            ]
        );
    }

    #[test]
    fn test_missing_root_yields_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let walker = TreeWalker::new(temp_dir.path().join("gone"));

        let items: Vec<Result<FileCandidate>> = walker.candidates().collect();

        assert_eq!(items.len(), 1);
        match &items[0] {
            Err(CodeDumpError::Walk { path, message }) => {
                assert!(path.ends_with("gone"));
                assert!(!message.is_empty());
            }
            other => panic!("expected walk error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_validation() {
        let temp_dir = TempDir::new().unwrap();
        assert!(TreeWalker::new(temp_dir.path()).validate_root().is_ok());

        let missing = TreeWalker::new(temp_dir.path().join("missing"));
        assert!(matches!(
            missing.validate_root(),
            Err(CodeDumpError::InvalidRoot { .. })
        ));

        let file_path = temp_dir.path().join("file.txt");
        fs::write(&file_path, "x").unwrap();
        assert!(TreeWalker::new(&file_path).validate_root().is_err());
    }
}
