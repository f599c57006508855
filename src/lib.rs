//! The library code for the `stela` static site generator. The architecture
//! is a linear pipeline over a small in-memory data set:
//!
//! 1. Discovering and parsing pages from the content tree ([`crate::loader`],
//!    which uses [`crate::frontmatter`] and [`crate::markdown`])
//! 2. Ordering the chronological subset ([`crate::page`])
//! 3. Rendering the index and every page document through the template
//!    engine ([`crate::templates`])
//! 4. Writing the output tree: clearing the output root, copying static
//!    assets, writing documents ([`crate::write`])
//!
//! [`crate::build`] sequences the four steps for one build;
//! [`crate::watch`] is an outer driver that re-triggers it on filesystem
//! changes and owns no pipeline state of its own. Every build is a full
//! regeneration: pages live only for the duration of one pass, and the
//! output directory is cleared and repopulated wholesale.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod page;
pub mod templates;
pub mod watch;
pub mod write;
