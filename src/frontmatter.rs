//! Splits a content file into its front-matter metadata and its Markdown
//! body. Each source file must be structured as follows:
//!
//! 1. Initial front-matter fence (`---`)
//! 2. YAML metadata with a required `title` and an optional `date-published`
//! 3. Terminal front-matter fence (`---`)
//! 4. Markdown body
//!
//! For example:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date-published: 2024-03-03
//! ---
//! # Hello
//!
//! World
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// The resolved metadata for a single content file.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// The title of the page.
    pub title: String,

    /// The publish date, present only for pages that declare one.
    pub published: Option<NaiveDate>,
}

/// The raw, unvalidated shape of the YAML block. Fields are optional here so
/// that absence can be reported as [`Error::MissingField`] rather than a
/// generic deserialization failure.
#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    title: Option<String>,

    #[serde(default, rename = "date-published")]
    date_published: Option<String>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a content file into its [`Metadata`] and body. The body is the
/// input minus the metadata block, with a single newline after the closing
/// fence trimmed.
pub fn parse(input: &str) -> Result<(Metadata, &str)> {
    let (yaml, body) = split_fences(input)?;
    let raw: RawMetadata = serde_yaml::from_str(yaml)?;

    let title = raw.title.ok_or(Error::MissingField("title"))?;
    let published = match raw.date_published {
        None => None,
        Some(raw_date) => Some(
            NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|err| {
                Error::InvalidDate {
                    raw: raw_date,
                    err,
                }
            })?,
        ),
    };

    Ok((Metadata { title, published }, body))
}

/// Locates the front-matter fences and returns the YAML block and the body.
fn split_fences(input: &str) -> Result<(&str, &str)> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::MissingStartFence);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::MissingEndFence),
        Some(offset) => {
            let yaml = &input[FENCE.len()..FENCE.len() + offset];
            let body = &input[FENCE.len() + offset + FENCE.len()..];
            Ok((yaml, body.strip_prefix('\n').unwrap_or(body)))
        }
    }
}

/// Represents the result of a metadata-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a content file's metadata block.
#[derive(Debug)]
pub enum Error {
    /// Returned when a content file is missing its starting front-matter
    /// fence (`---`).
    MissingStartFence,

    /// Returned when a content file is missing its terminal front-matter
    /// fence (the starting fence was found but the closing one was missing).
    MissingEndFence,

    /// Returned when there was an error parsing the metadata block as YAML.
    Yaml(serde_yaml::Error),

    /// Returned when a required metadata field is absent.
    MissingField(&'static str),

    /// Returned when a date field doesn't parse as a calendar date.
    InvalidDate {
        raw: String,
        err: chrono::ParseError,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingStartFence => {
                write!(f, "Content file must begin with `---`")
            }
            Error::MissingEndFence => write!(f, "Missing closing `---`"),
            Error::Yaml(err) => err.fmt(f),
            Error::MissingField(field) => {
                write!(f, "Missing required metadata field `{}`", field)
            }
            Error::InvalidDate { raw, err } => {
                write!(f, "Invalid date `{}`: {}", raw, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingStartFence => None,
            Error::MissingEndFence => None,
            Error::Yaml(err) => Some(err),
            Error::MissingField(_) => None,
            Error::InvalidDate { raw: _, err } => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}
