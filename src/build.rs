//! Exports the [`build_site`] function which sequences one full build:
//! loading pages from the content tree ([`crate::loader`]), ordering the
//! chronological subset ([`crate::page`]), rendering the index and every
//! page document ([`crate::templates`]), and writing the output tree
//! ([`crate::write`]). Rendering happens before the output directory is
//! touched, so a template failure leaves the previous output intact.

use std::fmt;

use log::info;

use crate::config::Config;
use crate::loader;
use crate::page::{self, Page};
use crate::templates::Engine;
use crate::write::Writer;

/// The output location of the site index, relative to the output root.
const INDEX_OUTPUT_PATH: &str = "index.html";

/// Runs one synchronous build for the given configuration. Any stage failure
/// aborts the build; there is no partial recovery or skip-and-continue.
pub fn build_site(config: &Config) -> Result<()> {
    let pages = loader::load_pages(&config.pages_directory)?;
    let mut posts: Vec<&Page> = pages.iter().filter(|p| p.is_post()).collect();
    page::sort_posts(&mut posts);
    info!(
        "Loaded {} pages ({} chronological)",
        pages.len(),
        posts.len()
    );

    let engine = Engine::load(&config.templates_directory);
    let index = engine.render_index(&posts, &config.hash)?;
    let mut documents = Vec::with_capacity(pages.len());
    for p in &pages {
        documents.push((p.output_path(), engine.render_page(p, &config.hash)?));
    }

    let writer = Writer {
        output_directory: &config.output_directory,
        public_directory: &config.public_directory,
    };
    writer.clean()?;
    writer.copy_static()?;
    writer.write_document(INDEX_OUTPUT_PATH, &index)?;
    for (output_path, contents) in &documents {
        writer.write_document(output_path, contents)?;
    }

    info!("Site written to `{}`", config.output_directory.display());
    Ok(())
}

/// Represents the result of a whole-site build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site: any stage's failure, unmodified.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors discovering or parsing content files.
    Load(loader::Error),

    /// Returned for errors loading or rendering templates.
    Template(crate::templates::Error),

    /// Returned for errors preparing or writing the output tree.
    Write(crate::write::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(err) => err.fmt(f),
            Error::Template(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(err) => Some(err),
            Error::Template(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<loader::Error> for Error {
    /// Converts a [`loader::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: loader::Error) -> Error {
        Error::Load(err)
    }
}

impl From<crate::templates::Error> for Error {
    /// Converts a [`crate::templates::Error`] into an [`Error`]. This allows
    /// us to use the `?` operator.
    fn from(err: crate::templates::Error) -> Error {
        Error::Template(err)
    }
}

impl From<crate::write::Error> for Error {
    /// Converts a [`crate::write::Error`] into an [`Error`]. This allows us
    /// to use the `?` operator.
    fn from(err: crate::write::Error) -> Error {
        Error::Write(err)
    }
}
