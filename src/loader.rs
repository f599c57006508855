//! Discovers content files and turns them into [`Page`]s. The loader walks
//! the content directory recursively, parses each Markdown file's front
//! matter ([`crate::frontmatter`]), renders its body
//! ([`crate::markdown`]), and classifies pages under the `posts/` subtree as
//! chronological. A failure in any single file aborts the whole load; the
//! build never produces partial output from a broken content tree.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter;
use crate::markdown;
use crate::page::{Kind, Page};

const MARKDOWN_EXTENSION: &str = "md";

/// The subtree of the content directory whose pages are chronological.
const POSTS_COMPONENT: &str = "posts";

/// Walks `content_directory` and returns a [`Page`] for every Markdown file
/// found, in a deterministic (file-name-sorted) discovery order. Pages whose
/// first path component is `posts` must carry a `date-published` field.
pub fn load_pages(content_directory: &Path) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for result in WalkDir::new(content_directory).sort_by_file_name() {
        let entry = result?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str())
            != Some(MARKDOWN_EXTENSION)
        {
            continue;
        }

        // strip_prefix can't fail: walkdir only yields descendants of the
        // root it was given.
        let relative = entry
            .path()
            .strip_prefix(content_directory)
            .unwrap()
            .with_extension("");
        let relative_path = normalize(&relative)
            .ok_or_else(|| Error::InvalidFileName(entry.path().to_owned()))?;

        if !seen.insert(relative_path.clone()) {
            return Err(Error::DuplicatePath(relative_path));
        }

        pages.push(load_page(entry.path(), relative_path)?);
    }

    Ok(pages)
}

/// Reads and parses a single content file.
fn load_page(path: &Path, relative_path: String) -> Result<Page> {
    let annotate = |err: frontmatter::Error| Error::Page {
        path: path.to_owned(),
        err,
    };

    let contents = std::fs::read_to_string(path)?;
    let (metadata, body) = frontmatter::parse(&contents).map_err(annotate)?;

    let kind = if is_post_path(&relative_path) {
        match metadata.published {
            Some(published) => Kind::Post { published },
            None => {
                return Err(annotate(frontmatter::Error::MissingField(
                    "date-published",
                )))
            }
        }
    } else {
        Kind::Static
    };

    Ok(Page {
        relative_path,
        title: metadata.title,
        kind,
        content: markdown::to_html(body),
    })
}

/// True when the page lives under the designated posts subtree.
fn is_post_path(relative_path: &str) -> bool {
    relative_path
        .strip_prefix(POSTS_COMPONENT)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Joins path components with `/` regardless of the platform separator.
/// Returns `None` for paths that aren't valid UTF-8.
fn normalize(relative: &Path) -> Option<String> {
    let mut components = Vec::new();
    for component in relative.components() {
        components.push(component.as_os_str().to_str()?);
    }
    Some(components.join("/"))
}

/// Represents the result of a content-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error discovering or parsing content files.
#[derive(Debug)]
pub enum Error {
    /// Returned when a content file's metadata is missing or malformed.
    Page {
        path: PathBuf,
        err: frontmatter::Error,
    },

    /// Returned when two content files resolve to the same relative path.
    DuplicatePath(String),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(PathBuf),

    /// Returned for I/O errors while walking the content tree.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Page { path, err } => {
                write!(f, "Loading page `{}`: {}", path.display(), err)
            }
            Error::DuplicatePath(path) => {
                write!(f, "Two content files resolve to `{}`", path)
            }
            Error::InvalidFileName(path) => {
                write!(f, "Invalid file name: {:?}", path)
            }
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Page { path: _, err } => Some(err),
            Error::DuplicatePath(_) => None,
            Error::InvalidFileName(_) => None,
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while walking the content tree.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_pages() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_file(
            &dir.path().join("posts/hello.md"),
            "---\ntitle: Hello\ndate-published: 2024-03-03\n---\n# Hi\n",
        );
        write_file(
            &dir.path().join("about.md"),
            "---\ntitle: About\n---\nAbout me.\n",
        );

        let pages = load_pages(dir.path())?;
        assert_eq!(pages.len(), 2);

        let about = &pages[0];
        assert_eq!(about.relative_path, "about");
        assert_eq!(about.kind, Kind::Static);
        assert_eq!(about.content, "<p>About me.</p>\n");

        let hello = &pages[1];
        assert_eq!(hello.relative_path, "posts/hello");
        assert_eq!(hello.title, "Hello");
        assert_eq!(
            hello.kind,
            Kind::Post {
                published: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
            }
        );
        assert_eq!(hello.content, "<h1>Hi</h1>\n");
        Ok(())
    }

    #[test]
    fn test_load_pages_recurses() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_file(
            &dir.path().join("posts/2024/march/deep.md"),
            "---\ntitle: Deep\ndate-published: 2024-03-10\n---\nbody\n",
        );

        let pages = load_pages(dir.path())?;
        assert_eq!(pages[0].relative_path, "posts/2024/march/deep");
        assert!(pages[0].is_post());
        Ok(())
    }

    #[test]
    fn test_post_without_date_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir.path().join("posts/undated.md"),
            "---\ntitle: Undated\n---\nbody\n",
        );

        match load_pages(dir.path()) {
            Err(Error::Page {
                path: _,
                err: frontmatter::Error::MissingField("date-published"),
            }) => {}
            other => panic!(
                "wanted MissingField(date-published), got {:?}",
                other.err()
            ),
        }
    }

    #[test]
    fn test_bad_file_aborts_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir.path().join("good.md"),
            "---\ntitle: Good\n---\nbody\n",
        );
        write_file(&dir.path().join("zz-bad.md"), "no front matter here\n");

        assert!(load_pages(dir.path()).is_err());
    }

    #[test]
    fn test_page_named_posts_is_static() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_file(
            &dir.path().join("posts.md"),
            "---\ntitle: Posts\n---\nbody\n",
        );

        let pages = load_pages(dir.path())?;
        assert_eq!(pages[0].kind, Kind::Static);
        Ok(())
    }

    #[test]
    fn test_non_markdown_files_ignored() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_file(&dir.path().join("notes.txt"), "not a page\n");

        assert!(load_pages(dir.path())?.is_empty());
        Ok(())
    }
}
