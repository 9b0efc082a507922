//! Comment panel state and markup

use super::view::{Element, Node};
use crate::content::Comment;

/// Attribute marking the control that opens the panel
pub const OPEN_ATTR: &str = "data-comments-open";
/// Attribute marking the control that closes the panel
pub const CLOSE_ATTR: &str = "data-comments-close";

/// Open/closed state of the comment panel, owned by the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentPanel {
    visible: bool,
}

impl CommentPanel {
    /// The toggle control under the article
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// The panel's own close callback
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// State requested through the `comments` query parameter
    pub fn from_query(value: Option<&str>) -> Self {
        let mut panel = Self::default();
        match value {
            Some("open") => panel.open(),
            Some("closed") => panel.close(),
            _ => {}
        }
        panel
    }
}

/// The control under the article that opens the panel
pub fn open_control(href: &str) -> Node {
    Element::new("a")
        .class("-rotate-90 text-gray-600 cursor-pointer")
        .attr("href", format!("{}?comments=open", href))
        .attr(OPEN_ATTR, "")
        .attr("aria-label", "Show comments")
        .attr("aria-controls", "comments")
        .text("Comments")
        .into()
}

/// The panel listing comments, with its close control and submission form
pub fn render_panel(
    panel: &CommentPanel,
    post_id: &str,
    comments: &[Comment],
    page_href: &str,
    endpoint: &str,
) -> Node {
    let mut class = String::from(
        "fixed top-0 right-0 h-full w-full max-w-md overflow-y-auto bg-white shadow-xl p-5 z-50",
    );
    if !panel.is_open() {
        class.push_str(" hidden");
    }

    let header = Element::new("div")
        .class("flex justify-between items-center mb-5")
        .child(
            Element::new("h3")
                .class("text-xl font-bold")
                .text(format!("Comments ({})", comments.len())),
        )
        .child(
            Element::new("a")
                .class("text-gray-600 hover:text-gray-800 cursor-pointer")
                .attr("href", page_href)
                .attr(CLOSE_ATTR, "")
                .attr("aria-label", "Close comments")
                .text("×"),
        );

    let list = Element::new("ul")
        .class("space-y-5")
        .children(comments.iter().map(render_comment));

    let mut aside = Element::new("aside")
        .class(&class)
        .attr("id", "comments")
        .attr("aria-hidden", (!panel.is_open()).to_string())
        .child(header)
        .child(list);

    if comments.is_empty() {
        aside = aside.child(
            Element::new("p")
                .class("text-gray-500")
                .text("No comments yet."),
        );
    }

    aside.child(comment_form(post_id, endpoint)).into()
}

fn render_comment(comment: &Comment) -> Node {
    Element::new("li")
        .attr("data-comment-id", comment.id.clone())
        .child(
            Element::new("p")
                .child(Element::new("span").class("text-yellow-500").text(comment.name.clone()))
                .text(": ")
                .text(comment.content.clone()),
        )
        .into()
}

/// Submission form; the endpoint receiving it lives outside this crate
fn comment_form(post_id: &str, endpoint: &str) -> Element {
    let input = |name: &'static str, kind: &'static str, placeholder: &'static str| {
        Element::new("label")
            .class("block mb-5")
            .child(Element::new("span").class("text-gray-700").text(placeholder))
            .child(
                Element::new("input")
                    .class("shadow border rounded py-2 px-3 mt-1 block w-full")
                    .attr("name", name)
                    .attr("type", kind)
                    .attr("placeholder", placeholder)
                    .attr("required", ""),
            )
    };

    Element::new("form")
        .class("flex flex-col mt-10")
        .attr("method", "post")
        .attr("action", endpoint)
        .child(
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", "_id")
                .attr("value", post_id),
        )
        .child(input("name", "text", "Name"))
        .child(input("email", "email", "Email"))
        .child(
            Element::new("label")
                .class("block mb-5")
                .child(Element::new("span").class("text-gray-700").text("Comment"))
                .child(
                    Element::new("textarea")
                        .class("shadow border rounded py-2 px-3 mt-1 block w-full")
                        .attr("name", "comment")
                        .attr("rows", "8")
                        .attr("required", ""),
                ),
        )
        .child(
            Element::new("button")
                .class("bg-yellow-500 hover:bg-yellow-400 text-white font-bold py-2 px-4 rounded")
                .attr("type", "submit")
                .text("Submit"),
        )
}
