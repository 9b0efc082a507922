//! HTML helper functions

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::url::url_for;
use crate::config::SiteConfig;

/// Generate a CSS link tag
///
/// # Examples
/// ```ignore
/// css(&config, "style.css") // -> <link rel="stylesheet" href="/static/css/style.css">
/// ```
pub fn css(config: &SiteConfig, path: &str) -> String {
    let path =
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
            path.to_string()
        } else {
            let path = if path.ends_with(".css") {
                path.to_string()
            } else {
                format!("{}.css", path)
            };
            url_for(config, &format!("static/css/{}", path.trim_start_matches('/')))
        };

    format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(&path))
}

/// Generate Open Graph meta tags for an article
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Share targets shown under an article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    Facebook,
    LinkedIn,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [Self::Twitter, Self::Facebook, Self::LinkedIn];

    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::LinkedIn => "LinkedIn",
        }
    }

    /// Share URL for a page
    pub fn url(self, page_url: &str, title: &str) -> String {
        let page = utf8_percent_encode(page_url, NON_ALPHANUMERIC);
        match self {
            Self::Twitter => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                page,
                utf8_percent_encode(title, NON_ALPHANUMERIC)
            ),
            Self::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", page),
            Self::LinkedIn => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                page
            ),
        }
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        let config = SiteConfig::default();
        assert_eq!(
            css(&config, "style"),
            r#"<link rel="stylesheet" href="/static/css/style.css">"#
        );
        assert!(css(&config, "https://cdn.test/x.css").contains("https://cdn.test/x.css"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_share_url_encodes_page() {
        let url = ShareTarget::Facebook.url("https://blog.test/post/a b", "T");
        assert_eq!(
            url,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fblog%2Etest%2Fpost%2Fa%20b"
        );
    }

    #[test]
    fn test_open_graph_skips_empty_description() {
        let tags = open_graph("Title", "", "https://blog.test/", None, "Blog");
        assert!(tags.contains(r#"og:title" content="Title""#));
        assert!(!tags.contains("og:description"));
    }
}
