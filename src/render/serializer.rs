//! Rich-text body serializer
//!
//! Each block is classified into a `BlockKind` and rendered by the serializer
//! registered for that kind, or by the default serializer when none is.

use std::collections::HashMap;

use super::view::{Element, Node};
use crate::content::{Block, ListKind, Span, TextBlock};
use crate::helpers::ImageResolver;

/// Renders one block given its already-rendered inline children
pub type BlockSerializer = fn(&BlockKind, Vec<Node>) -> Node;

/// Renders a link annotation around its children
pub type LinkSerializer = fn(&str, Vec<Node>) -> Node;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `h1` through `h6`
    Heading(u8),
    Normal,
    Blockquote,
    ListItem,
    Image,
    /// A block `_type` with no dedicated model
    Custom(String),
}

impl BlockKind {
    pub fn of(block: &Block) -> Self {
        match block {
            Block::Text(text) => Self::of_text(text),
            Block::Image(_) => Self::Image,
            Block::Unknown { kind, .. } => Self::Custom(kind.clone()),
        }
    }

    fn of_text(block: &TextBlock) -> Self {
        if block.list_item.is_some() {
            return Self::ListItem;
        }
        match block.style.as_deref() {
            Some("h1") => Self::Heading(1),
            Some("h2") => Self::Heading(2),
            Some("h3") => Self::Heading(3),
            Some("h4") => Self::Heading(4),
            Some("h5") => Self::Heading(5),
            Some("h6") => Self::Heading(6),
            Some("blockquote") => Self::Blockquote,
            _ => Self::Normal,
        }
    }
}

/// Inline marks a span can carry
enum Mark<'a> {
    Strong,
    Em,
    Code,
    Underline,
    StrikeThrough,
    Link(&'a str),
    Unknown,
}

impl<'a> Mark<'a> {
    fn resolve(block: &'a TextBlock, mark: &str) -> Self {
        match mark {
            "strong" => Self::Strong,
            "em" => Self::Em,
            "code" => Self::Code,
            "underline" => Self::Underline,
            "strike-through" => Self::StrikeThrough,
            key => match block.mark_def(key) {
                Some(def) if def.kind == "link" => {
                    Self::Link(def.href.as_deref().unwrap_or_default())
                }
                _ => Self::Unknown,
            },
        }
    }
}

/// Serializer table keyed by block kind
#[derive(Clone)]
pub struct Serializers {
    blocks: HashMap<BlockKind, BlockSerializer>,
    link: LinkSerializer,
    default: BlockSerializer,
}

impl Default for Serializers {
    /// The article styling: larger headings, bulleted list items, blue links
    fn default() -> Self {
        Self::plain()
            .with(BlockKind::Heading(1), |_, children| {
                Element::new("h1")
                    .class("text-2xl font-bold my-5")
                    .children(children)
                    .into()
            })
            .with(BlockKind::Heading(2), |_, children| {
                Element::new("h2")
                    .class("text-xl font-bold my-5")
                    .children(children)
                    .into()
            })
            .with(BlockKind::ListItem, |_, children| {
                Element::new("li")
                    .class("list-disc ml-8")
                    .children(children)
                    .into()
            })
            .with_link(|href, children| {
                Element::new("a")
                    .class("text-blue-500 hover:underline")
                    .attr("href", href)
                    .children(children)
                    .into()
            })
    }
}

impl Serializers {
    /// A table with no overrides; everything goes through the default
    pub fn plain() -> Self {
        Self {
            blocks: HashMap::new(),
            link: default_link,
            default: default_block,
        }
    }

    pub fn with(mut self, kind: BlockKind, serializer: BlockSerializer) -> Self {
        self.blocks.insert(kind, serializer);
        self
    }

    pub fn with_link(mut self, serializer: LinkSerializer) -> Self {
        self.link = serializer;
        self
    }

    /// Render one block through its registered serializer or the default
    pub fn serialize_block(&self, kind: &BlockKind, children: Vec<Node>) -> Node {
        let serializer = self.blocks.get(kind).unwrap_or(&self.default);
        serializer(kind, children)
    }

    /// Render a body in document order, grouping consecutive list items
    pub fn render_body(&self, blocks: &[Block], images: &ImageResolver) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(blocks.len());
        let mut list: Option<(ListKind, Vec<Node>)> = None;

        for block in blocks {
            let kind = BlockKind::of(block);
            let list_kind = match block {
                Block::Text(text) => text.list_item,
                _ => None,
            };

            // close the open list when the run of same-kind items ends
            if list.as_ref().map(|(k, _)| Some(*k)) != Some(list_kind) {
                if let Some((k, items)) = list.take() {
                    nodes.push(wrap_list(k, items));
                }
            }

            let children = match block {
                Block::Text(text) => self.render_spans(text),
                Block::Image(image) => images
                    .url_for(image)
                    .map(|src| {
                        vec![Element::new("img")
                            .attr("src", src)
                            .attr("alt", image.alt.clone().unwrap_or_default())
                            .into()]
                    })
                    .unwrap_or_default(),
                Block::Unknown { .. } => Vec::new(),
            };
            let node = self.serialize_block(&kind, children);

            match list_kind {
                Some(k) => list.get_or_insert_with(|| (k, Vec::new())).1.push(node),
                None => nodes.push(node),
            }
        }

        if let Some((k, items)) = list {
            nodes.push(wrap_list(k, items));
        }
        nodes
    }

    fn render_spans(&self, block: &TextBlock) -> Vec<Node> {
        block
            .children
            .iter()
            .flat_map(|span| self.render_span(block, span))
            .collect()
    }

    fn render_span(&self, block: &TextBlock, span: &Span) -> Vec<Node> {
        let mut nodes = Vec::new();
        for (i, line) in span.text.split('\n').enumerate() {
            if i > 0 {
                nodes.push(Element::new("br").into());
            }
            if !line.is_empty() {
                nodes.push(Node::text(line));
            }
        }

        // the first mark ends up outermost
        for mark in span.marks.iter().rev() {
            nodes = match Mark::resolve(block, mark) {
                Mark::Strong => vec![Element::new("strong").children(nodes).into()],
                Mark::Em => vec![Element::new("em").children(nodes).into()],
                Mark::Code => vec![Element::new("code").children(nodes).into()],
                Mark::Underline => vec![Element::new("span")
                    .attr("style", "text-decoration: underline")
                    .children(nodes)
                    .into()],
                Mark::StrikeThrough => vec![Element::new("del").children(nodes).into()],
                Mark::Link(href) => vec![(self.link)(href, nodes)],
                Mark::Unknown => nodes,
            };
        }
        nodes
    }
}

fn wrap_list(kind: ListKind, items: Vec<Node>) -> Node {
    let tag = match kind {
        ListKind::Bullet => "ul",
        ListKind::Number => "ol",
    };
    Element::new(tag).children(items).into()
}

fn default_link(href: &str, children: Vec<Node>) -> Node {
    Element::new("a").attr("href", href).children(children).into()
}

/// Natural element for each kind; custom types become an empty tagged `div`
fn default_block(kind: &BlockKind, children: Vec<Node>) -> Node {
    let el = match kind {
        BlockKind::Heading(1) => Element::new("h1"),
        BlockKind::Heading(2) => Element::new("h2"),
        BlockKind::Heading(3) => Element::new("h3"),
        BlockKind::Heading(4) => Element::new("h4"),
        BlockKind::Heading(5) => Element::new("h5"),
        BlockKind::Heading(_) => Element::new("h6"),
        BlockKind::Normal => Element::new("p"),
        BlockKind::Blockquote => Element::new("blockquote"),
        BlockKind::ListItem => Element::new("li"),
        BlockKind::Image => Element::new("figure"),
        BlockKind::Custom(name) => {
            tracing::debug!("No serializer for block type {:?}, using default", name);
            Element::new("div").attr("data-block-type", name.clone())
        }
    };
    el.children(children).into()
}
