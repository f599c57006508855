//! Defines the [`Page`] type, the in-memory representation of one content
//! file, along with its derived output locations and the ordering applied to
//! chronological pages.

use chrono::NaiveDate;

/// Distinguishes dated, chronologically-listed pages ("posts") from static
/// pages. The publish date lives inside the variant so a post without a date
/// is unrepresentable once loading has succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// A page under the posts subtree, listed on the index in reverse
    /// chronological order.
    Post { published: NaiveDate },

    /// Any other page. Rendered, but not listed on the index.
    Static,
}

/// One content file's resolved representation. Constructed by the loader,
/// read-only thereafter, discarded at the end of the build.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The slash-separated path identifying the page within the content
    /// tree, without extension. Unique per build.
    pub relative_path: String,

    /// The page title, from the required `title` metadata field.
    pub title: String,

    /// Whether the page is chronological or static.
    pub kind: Kind,

    /// The rendered HTML fragment for the page body.
    pub content: String,
}

impl Page {
    /// The output file location relative to the output root.
    pub fn output_path(&self) -> String {
        format!("{}/index.html", self.relative_path)
    }

    /// The page's URL path on the generated site.
    pub fn href(&self) -> String {
        format!("/{}", self.relative_path)
    }

    /// The publish date, if the page is chronological.
    pub fn published(&self) -> Option<NaiveDate> {
        match &self.kind {
            Kind::Post { published } => Some(*published),
            Kind::Static => None,
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self.kind, Kind::Post { .. })
    }
}

/// Sorts chronological pages by `(published, relative_path)`, descending on
/// both: newest first, ties broken by the lexicographically greater path.
pub fn sort_posts(posts: &mut [&Page]) {
    posts.sort_by(|a, b| {
        (b.published(), &b.relative_path).cmp(&(a.published(), &a.relative_path))
    });
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(relative_path: &str, date: (i32, u32, u32)) -> Page {
        let (y, m, d) = date;
        Page {
            relative_path: String::from(relative_path),
            title: String::from(relative_path),
            kind: Kind::Post {
                published: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            },
            content: String::new(),
        }
    }

    #[test]
    fn test_output_path() {
        let page = post("posts/a/b", (2024, 1, 1));
        assert_eq!(page.output_path(), "posts/a/b/index.html");
    }

    #[test]
    fn test_href() {
        let page = post("posts/a/b", (2024, 1, 1));
        assert_eq!(page.href(), "/posts/a/b");
    }

    #[test]
    fn test_sort_newest_first() {
        let older = post("posts/older", (2023, 5, 1));
        let newer = post("posts/newer", (2024, 5, 1));
        let mut posts = vec![&older, &newer];
        sort_posts(&mut posts);
        assert_eq!(posts, vec![&newer, &older]);
    }

    #[test]
    fn test_sort_equal_dates_greater_path_first() {
        let alpha = post("posts/alpha", (2024, 5, 1));
        let beta = post("posts/beta", (2024, 5, 1));
        let mut posts = vec![&alpha, &beta];
        sort_posts(&mut posts);
        assert_eq!(posts, vec![&beta, &alpha]);
    }

    #[test]
    fn test_sort_is_stable_across_input_order() {
        let a = post("posts/a", (2024, 1, 2));
        let b = post("posts/b", (2024, 1, 1));
        let c = post("posts/c", (2024, 1, 3));

        let mut first = vec![&a, &b, &c];
        let mut second = vec![&c, &b, &a];
        sort_posts(&mut first);
        sort_posts(&mut second);
        assert_eq!(first, second);
        assert_eq!(first, vec![&c, &a, &b]);
    }
}
