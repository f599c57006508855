//! Converts Markdown body text into an HTML fragment. The conversion is a
//! pure function of its input: no I/O, deterministic output. The resulting
//! fragment is trusted and embedded into documents without further escaping.

use pulldown_cmark::{html, Options, Parser};

/// Renders `markdown` to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut fragment = String::new();
    html::push_html(&mut fragment, Parser::new_ext(markdown, options));
    fragment
}
