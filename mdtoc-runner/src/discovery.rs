//! Expanding command-line inputs into Markdown documents

use log::{debug, warn};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];
const GLOB_META: [char; 3] = ['*', '?', '['];

/// Path matching for watched glob patterns; `*` stays within one directory
const GLOB_MATCH: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Something to observe in watch mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WatchTarget {
    /// Every Markdown file below this directory
    Dir(PathBuf),
    /// A single document
    File(PathBuf),
    /// Files below `base` whose path relative to it matches `pattern`
    Glob { base: PathBuf, pattern: glob::Pattern },
}

impl WatchTarget {
    /// Directory or file handed to the file system watcher
    pub fn root(&self) -> &Path {
        match self {
            WatchTarget::Dir(dir) => dir,
            WatchTarget::File(file) => file,
            WatchTarget::Glob { base, .. } => base,
        }
    }

    /// Whether a change to `path` concerns this target
    pub fn covers(&self, path: &Path) -> bool {
        match self {
            WatchTarget::File(file) => path == file,
            WatchTarget::Dir(dir) => {
                is_markdown(path)
                    && path.strip_prefix(dir).is_ok_and(|rel| {
                        !rel.components().any(|c| match c {
                            Component::Normal(name) => is_hidden(name),
                            _ => false,
                        })
                    })
            }
            WatchTarget::Glob { base, pattern } => path
                .strip_prefix(base)
                .is_ok_and(|rel| pattern.matches_path_with(rel, GLOB_MATCH)),
        }
    }
}

/// Expand paths, directories and glob patterns into a list of documents.
///
/// Directories are walked recursively for Markdown files, skipping hidden
/// entries. Existing files are taken as-is. Anything else is treated as a
/// glob pattern. Order of first appearance is kept and duplicates dropped.
pub fn discover(inputs: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        let found = if path.is_dir() {
            walk_markdown(path)
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            expand_glob(input)
        };

        if found.is_empty() {
            warn!("No Markdown files matched '{}'", input);
        }

        for file in found {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    debug!("Discovered {} Markdown file(s)", files.len());
    files
}

/// Decide what to watch: directory inputs recursively, glob inputs through
/// their literal base directory, and every other discovered document
/// individually
pub fn watch_targets(inputs: &[String], files: &[PathBuf]) -> Vec<WatchTarget> {
    let mut targets = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            targets.push(WatchTarget::Dir(path.to_path_buf()));
        } else if !path.is_file() {
            match split_glob(input) {
                Some((base, pattern)) if base.is_dir() => {
                    targets.push(WatchTarget::Glob { base, pattern })
                }
                Some((base, _)) => {
                    warn!("Not watching '{}': {} is not a directory", input, base.display())
                }
                None => debug!("Not watching '{}': no such file or pattern", input),
            }
        }
    }

    let loose: Vec<WatchTarget> = files
        .iter()
        .filter(|file| !targets.iter().any(|target| target.covers(file)))
        .cloned()
        .map(WatchTarget::File)
        .collect();
    targets.extend(loose);
    targets
}

/// Split a glob pattern into its literal leading directory and the pattern
/// for the rest. Returns `None` when `input` has no wildcard or is invalid.
pub fn split_glob(input: &str) -> Option<(PathBuf, glob::Pattern)> {
    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();

    for component in Path::new(input).components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(GLOB_META) {
            base.push(component);
        } else {
            rest.push(text.into_owned());
        }
    }

    if rest.is_empty() {
        return None;
    }
    if base.as_os_str().is_empty() {
        base.push(".");
    }

    match glob::Pattern::new(&rest.join("/")) {
        Ok(pattern) => Some((base, pattern)),
        Err(err) => {
            warn!("Invalid glob pattern '{}': {}", input, err);
            None
        }
    }
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

pub fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

fn walk_markdown(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(err) => {
            warn!("Invalid glob pattern '{}': {}", pattern, err);
            return Vec::new();
        }
    };

    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Skipping unreadable glob match: {}", err);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "# doc\n").unwrap();
        path
    }

    fn s(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("README.md")));
        assert!(is_markdown(Path::new("notes.MARKDOWN")));
        assert!(!is_markdown(Path::new("main.rs")));
        assert!(!is_markdown(Path::new("md")));
    }

    #[test]
    fn test_directory_walk_skips_hidden_and_non_markdown() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.md");
        let nested = touch(dir.path(), "guide/b.md");
        touch(dir.path(), "guide/c.txt");
        touch(dir.path(), ".hidden/d.md");
        touch(dir.path(), ".e.md");

        let files = discover(&[s(dir.path())]);
        assert_eq!(files, vec![a, nested]);
    }

    #[test]
    fn test_explicit_file_taken_as_is() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "notes.txt");

        assert_eq!(discover(&[s(&file)]), vec![file]);
    }

    #[test]
    fn test_glob_pattern() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "docs/a.md");
        let b = touch(dir.path(), "docs/sub/b.md");
        touch(dir.path(), "other/c.md");

        let pattern = format!("{}/docs/**/*.md", s(dir.path()));
        let files = discover(&[pattern]);
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.md");
        let b = touch(dir.path(), "b.md");

        let files = discover(&[s(&b), s(dir.path()), s(&a)]);
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn test_no_matches() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.md", s(dir.path()));
        assert!(discover(&[pattern]).is_empty());
        assert!(discover(&["[invalid".to_string()]).is_empty());
    }

    #[test]
    fn test_watch_targets() {
        let dir = TempDir::new().unwrap();
        let inside = touch(dir.path(), "docs/a.md");
        let outside = touch(dir.path(), "README.md");
        let docs = dir.path().join("docs");

        let inputs = vec![s(&docs), s(&outside)];
        let targets = watch_targets(&inputs, &[inside, outside.clone()]);
        assert_eq!(targets, vec![WatchTarget::Dir(docs), WatchTarget::File(outside)]);
    }

    #[test]
    fn test_watch_targets_glob_uses_base_directory() {
        let dir = TempDir::new().unwrap();
        let matched = touch(dir.path(), "docs/a.md");
        let single = touch(dir.path(), "README.md");
        let docs = dir.path().join("docs");

        let inputs = vec![format!("{}/*.md", s(&docs)), s(&single)];
        let files = discover(&inputs);
        assert_eq!(files, vec![matched, single.clone()]);

        let targets = watch_targets(&inputs, &files);
        assert_eq!(
            targets,
            vec![
                WatchTarget::Glob {
                    base: docs,
                    pattern: glob::Pattern::new("*.md").unwrap(),
                },
                WatchTarget::File(single),
            ]
        );
    }

    #[test]
    fn test_split_glob() {
        let (base, pattern) = split_glob("docs/**/*.md").unwrap();
        assert_eq!(base, PathBuf::from("docs"));
        assert_eq!(pattern.as_str(), "**/*.md");

        let (base, pattern) = split_glob("*.markdown").unwrap();
        assert_eq!(base, PathBuf::from("."));
        assert_eq!(pattern.as_str(), "*.markdown");

        assert!(split_glob("docs/readme.md").is_none());
        assert!(split_glob("docs/[oops/*.md").is_none());
    }

    #[test]
    fn test_glob_target_covers_new_files() {
        let target = WatchTarget::Glob {
            base: PathBuf::from("/work/docs"),
            pattern: glob::Pattern::new("**/*.md").unwrap(),
        };
        assert!(target.covers(Path::new("/work/docs/new.md")));
        assert!(target.covers(Path::new("/work/docs/deep/later.md")));
        assert!(!target.covers(Path::new("/work/docs/new.txt")));
        assert!(!target.covers(Path::new("/work/other/new.md")));

        let flat = WatchTarget::Glob {
            base: PathBuf::from("/work/docs"),
            pattern: glob::Pattern::new("*.md").unwrap(),
        };
        assert!(flat.covers(Path::new("/work/docs/new.md")));
        assert!(!flat.covers(Path::new("/work/docs/deep/later.md")));
    }
}
