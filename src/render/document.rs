//! Full HTML documents around rendered pages

use super::page::{render_post, RenderContext};
use super::panel::{CLOSE_ATTR, OPEN_ATTR};
use super::view::{Element, Node};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{self, html_escape};

/// Client-side panel toggle; without it the `?comments=open` links still work
fn toggle_script() -> String {
    format!(
        r#"<script>
(function() {{
    var panel = document.getElementById('comments');
    if (!panel) return;
    function show(open) {{
        panel.classList.toggle('hidden', !open);
        panel.setAttribute('aria-hidden', String(!open));
    }}
    document.querySelectorAll('[{open}]').forEach(function(el) {{
        el.addEventListener('click', function(e) {{ e.preventDefault(); show(true); }});
    }});
    document.querySelectorAll('[{close}]').forEach(function(el) {{
        el.addEventListener('click', function(e) {{ e.preventDefault(); show(false); }});
    }});
}})();
</script>"#,
        open = OPEN_ATTR,
        close = CLOSE_ATTR
    )
}

/// Render a complete post document
pub fn post_document(post: &Post, ctx: &RenderContext) -> String {
    let body = render_post(post, ctx);
    let url = helpers::full_url_for(
        ctx.config,
        &helpers::post_path(ctx.config, &post.slug.current),
    );
    let image = post.main_image.as_ref().and_then(|i| ctx.images.url_for(i));
    let title = format!("{} | {}", post.title, ctx.config.title);

    let head = [
        helpers::open_graph(
            &post.title,
            &post.description,
            &url,
            image.as_deref(),
            &ctx.config.title,
        ),
        format!(
            r#"<meta name="description" content="{}">"#,
            html_escape(&post.description)
        ),
    ]
    .join("\n");

    wrap(ctx.config, &title, &head, &body, &toggle_script())
}

/// The 404 document for unknown slugs
pub fn not_found_document(config: &SiteConfig) -> String {
    let body: Node = Element::new("main")
        .class("max-w-3xl mx-auto p-5 text-center")
        .child(Element::new("h1").class("text-3xl font-bold mt-10 mb-3").text("404"))
        .child(
            Element::new("p")
                .class("text-xl font-light text-gray-500 mb-3")
                .text("This page could not be found."),
        )
        .child(
            Element::new("a")
                .class("text-blue-500 hover:underline")
                .attr("href", helpers::url_for(config, "/"))
                .text("Back to home"),
        )
        .into();

    let title = format!("404 | {}", config.title);
    wrap(config, &title, "", &body, "")
}

fn wrap(config: &SiteConfig, title: &str, head: &str, body: &Node, scripts: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{css}
{head}
</head>
<body>
{body}
{scripts}
</body>
</html>
"#,
        lang = html_escape(&config.language),
        title = html_escape(title),
        css = helpers::css(config, "style"),
        head = head,
        body = body.to_html(),
        scripts = scripts,
    )
}
