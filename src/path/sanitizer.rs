//! Path sanitizer
//!
//! Turns untrusted relative path strings into absolute paths under a fixed
//! root. The textual pass mirrors the classic substitution approach (strip
//! traversal tokens, whitelist characters); on top of that the joined path is
//! normalized lexically and prefix-checked against the root, so nested or
//! repeated traversal sequences cannot escape it.

use log::warn;
use std::path::{Component, Path, PathBuf};

use crate::error::{FsError, Result};

/// Sanitizes relative path strings against a configured root directory
///
/// The root is injected at construction and is immutable for the sanitizer's
/// lifetime. Sanitized results are never checked for existence; that is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct PathSanitizer {
    root: PathBuf,
}

impl PathSanitizer {
    /// Create a sanitizer confined to `root`
    ///
    /// Fails with `FsError::Configuration` if `root` is empty or relative.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();

        if root.as_os_str().is_empty() {
            return Err(FsError::Configuration("root path cannot be empty".into()));
        }
        if root.is_relative() {
            return Err(FsError::Configuration(format!(
                "root path '{}' must be absolute",
                root.display()
            )));
        }

        Ok(Self {
            root: normalize_lexically(root),
        })
    }

    /// The root all sanitized paths are joined under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sanitize a user-supplied relative path and join it under the root
    ///
    /// Surrounding whitespace is trimmed, backslashes and `/./` / `/../`
    /// segments are collapsed to a single slash, characters outside
    /// `[a-zA-Z0-9*\-_./]` are stripped and leading slashes removed before the
    /// remainder is joined onto the root. A result that still resolves outside
    /// the root after lexical normalization is rejected with
    /// `FsError::Traversal`.
    pub fn sanitize(&self, input: &str) -> Result<PathBuf> {
        let cleaned = input
            .trim()
            .replace('\\', "/")
            .replace("/./", "/")
            .replace("/../", "/");

        let filtered: String = cleaned
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '-' | '_' | '.' | '/'))
            .collect();

        let relative = filtered.trim_start_matches('/');
        let joined = normalize_lexically(&self.root.join(relative));

        if !joined.starts_with(&self.root) {
            warn!(
                "Rejected path input '{}': resolves to {} outside root {}",
                input,
                joined.display(),
                self.root.display()
            );
            return Err(FsError::Traversal(format!(
                "input '{}' resolves outside the root '{}'",
                input,
                self.root.display()
            )));
        }

        Ok(joined)
    }
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` at the root is dropped rather than escaping it; symlinks are not
/// resolved.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> PathSanitizer {
        PathSanitizer::new("/app").unwrap()
    }

    #[test]
    fn test_rejects_empty_root() {
        assert!(matches!(
            PathSanitizer::new(""),
            Err(FsError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_relative_root() {
        assert!(matches!(
            PathSanitizer::new("storage/app"),
            Err(FsError::Configuration(_))
        ));
    }

    #[test]
    fn test_joins_plain_relative_path() {
        let path = sanitizer().sanitize("storage/logs/app.log").unwrap();
        assert_eq!(path, PathBuf::from("/app/storage/logs/app.log"));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let path = sanitizer().sanitize("  notes.txt  ").unwrap();
        assert_eq!(path, PathBuf::from("/app/notes.txt"));
    }

    #[test]
    fn test_strips_leading_slashes() {
        let path = sanitizer().sanitize("///uploads/img.png").unwrap();
        assert_eq!(path, PathBuf::from("/app/uploads/img.png"));
    }

    #[test]
    fn test_converts_backslashes() {
        let path = sanitizer().sanitize("docs\\readme.md").unwrap();
        assert_eq!(path, PathBuf::from("/app/docs/readme.md"));
    }

    #[test]
    fn test_collapses_dot_segments() {
        let path = sanitizer().sanitize("a/./b/c.txt").unwrap();
        assert_eq!(path, PathBuf::from("/app/a/b/c.txt"));
    }

    #[test]
    fn test_strips_disallowed_characters() {
        let path = sanitizer().sanitize("in valid!@#.txt").unwrap();
        assert_eq!(path, PathBuf::from("/app/invalid.txt"));
    }

    #[test]
    fn test_keeps_wildcard_and_separators() {
        let path = sanitizer().sanitize("logs/*.log").unwrap();
        assert_eq!(path, PathBuf::from("/app/logs/*.log"));
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let result = sanitizer().sanitize("../../etc/passwd");
        assert!(matches!(result, Err(FsError::Traversal(_))));
    }

    #[test]
    fn test_contains_nested_traversal_tokens() {
        // "....//" does not contain a literal "/../" and must not escape
        let path = sanitizer().sanitize("....//secret").unwrap();
        assert!(path.starts_with("/app"));
    }

    #[test]
    fn test_empty_input_resolves_to_root() {
        let path = sanitizer().sanitize("").unwrap();
        assert_eq!(path, PathBuf::from("/app"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            normalize_lexically(Path::new("/a/./b")),
            PathBuf::from("/a/b")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }
}
