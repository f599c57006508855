//! The build configuration: the directory layout under a working root plus
//! the build token threaded into every render. Constructed once up front and
//! passed to the orchestrator; there is no process-wide mutable state.

use std::path::{Path, PathBuf};

/// Describes one build: where to read templates, content, and static assets
/// from, where to write the generated site, and which token to stamp into
/// rendered documents.
pub struct Config {
    /// Contains `main.html` (index) and `post.html` (per-page).
    pub templates_directory: PathBuf,

    /// The Markdown content tree. Its `posts/` subtree is chronological.
    pub pages_directory: PathBuf,

    /// Static assets, copied into the output root verbatim. Optional.
    pub public_directory: PathBuf,

    /// The generated site. Cleared and repopulated each build.
    pub output_directory: PathBuf,

    /// The build token, typically a source-control revision identifier.
    pub hash: String,
}

impl Config {
    /// The build token used when none is supplied.
    pub const DEFAULT_HASH: &'static str = "na";

    /// The build token used under watch mode.
    pub const DEV_HASH: &'static str = "DevMode";

    /// Builds a [`Config`] from the conventional layout under `root`:
    /// `templates/`, `pages/`, `public/`, and `out/`.
    pub fn from_root(root: &Path, hash: &str) -> Config {
        Config {
            templates_directory: root.join("templates"),
            pages_directory: root.join("pages"),
            public_directory: root.join("public"),
            output_directory: root.join("out"),
            hash: hash.to_owned(),
        }
    }
}
