//! Integrates the template engine. Templates are Jinja-style HTML files
//! loaded from the templates directory: `main.html` receives the sorted
//! chronological pages and renders the site index, `post.html` receives a
//! single page and renders its document. Auto-escaping applies to every
//! interpolated value except a page's pre-rendered `content`, which is
//! injected as an already-safe string.
//!
//! A `date` filter is registered for templates to format publish dates, e.g.
//! `{{ post.date_published | date }}` renders `March 3rd, 2024`.

use std::fmt;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use minijinja::value::Value;
use minijinja::{context, path_loader, Environment, ErrorKind};

use crate::page::Page;

const INDEX_TEMPLATE: &str = "main.html";
const PAGE_TEMPLATE: &str = "post.html";

/// A loaded template environment. Construct once per build with
/// [`Engine::load`]; template files are read lazily on first render.
pub struct Engine {
    env: Environment<'static>,
}

impl Engine {
    /// Creates an engine that loads templates from `templates_directory` and
    /// registers the `date` filter.
    pub fn load(templates_directory: &Path) -> Engine {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_directory.to_path_buf()));
        env.add_filter("date", format_date);
        Engine { env }
    }

    /// Renders the site index from `main.html`. `posts` must already be in
    /// listing order; `hash` is the build token.
    pub fn render_index(&self, posts: &[&Page], hash: &str) -> Result<String> {
        let posts: Vec<Value> = posts.iter().map(|p| page_value(p)).collect();
        self.template(INDEX_TEMPLATE)?
            .render(context! { posts => posts, hash => hash })
            .map_err(Error::Render)
    }

    /// Renders a single page's document from `post.html`.
    pub fn render_page(&self, page: &Page, hash: &str) -> Result<String> {
        self.template(PAGE_TEMPLATE)?
            .render(context! { post => page_value(page), hash => hash })
            .map_err(Error::Render)
    }

    fn template(&self, name: &str) -> Result<minijinja::Template<'_, '_>> {
        self.env.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => Error::NotFound(name.to_owned()),
            _ => Error::Render(err),
        })
    }
}

/// Converts a [`Page`] into the object templates see: `title`, `href`,
/// `file`, `date_published` (ISO date, absent for static pages), and
/// `content`. The content is marked safe so the engine never re-escapes the
/// already-rendered HTML fragment.
fn page_value(page: &Page) -> Value {
    context! {
        title => page.title,
        href => page.href(),
        file => page.output_path(),
        date_published => page.published().map(|d| d.to_string()),
        content => Value::from_safe_string(page.content.clone()),
    }
}

/// Formats an ISO date (`YYYY-MM-DD`) as e.g. `March 3rd, 2024`.
fn format_date(value: String) -> std::result::Result<String, minijinja::Error> {
    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date `{}`: {}", value, err),
        )
    })?;
    Ok(format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%Y"),
    ))
}

// Deliberately simplified: only days 1-3 get special suffixes, every other
// day (including 21-23 and 31) gets `th`.
fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Represents the result of a template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading or rendering a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when a required template file doesn't exist.
    NotFound(String),

    /// Returned when rendering fails (bad reference, filter error, syntax
    /// error in the template source).
    Render(minijinja::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(name) => {
                write!(f, "Template `{}` not found", name)
            }
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound(_) => None,
            Error::Render(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::Kind;
    use std::fs;

    fn page(title: &str, content: &str) -> Page {
        Page {
            relative_path: String::from("posts/hello"),
            title: String::from(title),
            kind: Kind::Post {
                published: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            },
            content: String::from(content),
        }
    }

    fn engine(templates: &[(&str, &str)]) -> (tempfile::TempDir, Engine) {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in templates {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        let engine = Engine::load(dir.path());
        (dir, engine)
    }

    #[test]
    fn test_render_page() -> Result<()> {
        let (_dir, engine) = engine(&[(
            "post.html",
            "<title>{{ post.title }}</title>{{ post.content }}[{{ hash }}]",
        )]);
        let rendered =
            engine.render_page(&page("Hello", "<h1>Hi</h1>\n"), "abc123")?;
        assert_eq!(rendered, "<title>Hello</title><h1>Hi</h1>\n[abc123]");
        Ok(())
    }

    #[test]
    fn test_titles_are_escaped_content_is_not() -> Result<()> {
        let (_dir, engine) = engine(&[(
            "post.html",
            "{{ post.title }}|{{ post.content }}",
        )]);
        let rendered =
            engine.render_page(&page("a<b", "<em>kept</em>"), "na")?;
        assert_eq!(rendered, "a&lt;b|<em>kept</em>");
        Ok(())
    }

    #[test]
    fn test_render_index() -> Result<()> {
        let (_dir, engine) = engine(&[(
            "main.html",
            "{% for post in posts %}<a href=\"{{ post.href }}\">\
             {{ post.title }}</a> {{ post.date_published | date }}\
             {% endfor %}",
        )]);
        let hello = page("Hello", "");
        let rendered = engine.render_index(&[&hello], "na")?;
        assert_eq!(
            rendered,
            "<a href=\"/posts/hello\">Hello</a> March 3rd, 2024"
        );
        Ok(())
    }

    #[test]
    fn test_missing_template() {
        let (_dir, engine) = engine(&[]);
        match engine.render_page(&page("T", ""), "na") {
            Err(Error::NotFound(name)) => assert_eq!(name, "post.html"),
            other => panic!("wanted NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_bad_reference_is_render_error() {
        let (_dir, engine) =
            engine(&[("post.html", "{{ post.title | nonexistent }}")]);
        match engine.render_page(&page("T", ""), "na") {
            Err(Error::Render(_)) => {}
            other => panic!("wanted Render, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_date_filter() {
        let cases = [
            ("2024-03-01", "March 1st, 2024"),
            ("2024-03-02", "March 2nd, 2024"),
            ("2024-03-03", "March 3rd, 2024"),
            ("2024-03-04", "March 4th, 2024"),
            ("2024-03-11", "March 11th, 2024"),
            ("2024-03-21", "March 21th, 2024"),
        ];
        for (input, wanted) in cases {
            assert_eq!(format_date(String::from(input)).unwrap(), wanted);
        }
    }

    #[test]
    fn test_date_filter_rejects_garbage() {
        assert!(format_date(String::from("yesterday")).is_err());
    }
}
