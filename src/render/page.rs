//! Post page layout

use chrono::{DateTime, Utc};

use super::panel::{self, CommentPanel};
use super::serializer::Serializers;
use super::view::{Element, Node};
use crate::config::SiteConfig;
use crate::content::{Author, Post};
use crate::helpers::{self, ImageResolver, ShareTarget};

/// Everything the page needs besides the post itself
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub images: &'a ImageResolver,
    pub serializers: &'a Serializers,
    /// Reference point for "Published ... ago"
    pub now: DateTime<Utc>,
    pub panel: CommentPanel,
}

/// Map a post record to the page body
pub fn render_post(post: &Post, ctx: &RenderContext) -> Node {
    let href = helpers::post_path(ctx.config, &post.slug.current);
    let published = format!(
        "Published {}",
        helpers::relative_date(&post.created_at, &ctx.now)
    );

    let mut main = Element::new("main").child(site_header(ctx.config));

    if let Some(src) = post.main_image.as_ref().and_then(|i| ctx.images.url_for(i)) {
        main = main.child(
            Element::new("img")
                .class("w-full h-40 object-cover")
                .attr("src", src)
                .attr("alt", ""),
        );
    }

    let mut article = Element::new("article")
        .class("max-w-3xl mx-auto p-5")
        .child(
            Element::new("h1")
                .class("text-3xl font-bold mt-10 mb-3")
                .text(post.title.clone()),
        )
        .child(
            Element::new("h3")
                .class("text-xl font-light text-gray-500 mb-3")
                .text(post.description.clone()),
        )
        .child(
            Element::new("div")
                .class("flex items-center space-x-3")
                .children(avatar(&post.author, "w-10 h-10 rounded-full", ctx))
                .child(
                    Element::new("div")
                        .child(Element::new("strong").text(post.author.name.clone()))
                        .child(
                            Element::new("p")
                                .class("text-sm font-extralight")
                                .child(time_tag(&post.created_at, &published)),
                        ),
                ),
        )
        .child(
            Element::new("div")
                .class("mt-5")
                .children(ctx.serializers.render_body(&post.body, ctx.images)),
        );

    article = article
        .child(action_row(post, &href, ctx))
        .child(
            Element::new("div")
                .class("flex items-center pb-10 pt-10 border-t border-gray-300")
                .children(avatar(&post.author, "w-28 h-28 rounded-full", ctx))
                .child(
                    Element::new("div")
                        .class("pl-5")
                        .child(
                            Element::new("h4")
                                .class("text-3xl font-bold")
                                .text(post.author.name.clone()),
                        )
                        .child(
                            Element::new("p")
                                .class("text-lg font-light pt-2")
                                .child(time_tag(&post.created_at, &published)),
                        ),
                ),
        );

    main.child(article)
        .child(panel::render_panel(
            &ctx.panel,
            &post.id,
            &post.comments,
            &href,
            &ctx.config.comment_endpoint,
        ))
        .into()
}

fn site_header(config: &SiteConfig) -> Element {
    Element::new("header")
        .class("flex justify-between p-5 max-w-7xl mx-auto")
        .child(
            Element::new("a")
                .class("font-bold text-2xl")
                .attr("href", helpers::url_for(config, "/"))
                .text(config.title.clone()),
        )
}

fn avatar(author: &Author, class: &str, ctx: &RenderContext) -> Option<Node> {
    let src = author.image.as_ref().and_then(|i| ctx.images.url_for(i))?;
    Some(
        Element::new("img")
            .class(class)
            .attr("src", src)
            .attr("alt", "author avatar")
            .into(),
    )
}

fn time_tag(date: &DateTime<Utc>, text: &str) -> Element {
    Element::new("time")
        .attr("datetime", helpers::date_xml(date))
        .text(text)
}

/// Comment toggle on the left, share links on the right
fn action_row(post: &Post, href: &str, ctx: &RenderContext) -> Element {
    let page_url = helpers::full_url_for(ctx.config, href);
    let share_class = "cursor-pointer text-gray-600 hover:text-gray-800";

    let shares = ShareTarget::ALL.iter().map(|target| {
        Node::from(
            Element::new("a")
                .class(share_class)
                .attr("href", target.url(&page_url, &post.title))
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .text(target.label()),
        )
    });

    Element::new("div")
        .class("flex justify-between items-center pt-10 pb-5")
        .child(panel::open_control(href))
        .child(
            Element::new("div")
                .class("flex items-center space-x-2")
                .children(shares)
                .child(
                    Element::new("a")
                        .class(share_class)
                        .attr("href", href.to_string())
                        .attr("data-bookmark", "")
                        .text("Bookmark"),
                ),
        )
}
