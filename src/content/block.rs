//! Rich-text body blocks

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use super::post::ImageRef;

/// One unit of rich-text content, tagged by `_type`
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A styled paragraph, heading, quote or list item
    Text(TextBlock),
    /// An inline image
    Image(ImageRef),
    /// Any block type this crate has no dedicated model for
    Unknown { kind: String, raw: Value },
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match kind.as_str() {
            "block" => serde_json::from_value(value)
                .map(Block::Text)
                .map_err(de::Error::custom),
            "image" => serde_json::from_value(value)
                .map(Block::Image)
                .map_err(de::Error::custom),
            _ => Ok(Block::Unknown { kind, raw: value }),
        }
    }
}

/// A `block`-typed entry: spans plus style and list metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub style: Option<String>,
    #[serde(rename = "listItem")]
    pub list_item: Option<ListKind>,
    pub level: Option<u32>,
    pub children: Vec<Span>,
    #[serde(rename = "markDefs")]
    pub mark_defs: Vec<MarkDef>,
}

impl TextBlock {
    /// Look up an annotation by its mark key
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|d| d.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Number,
}

/// A run of text sharing the same marks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Span {
    pub text: String,
    pub marks: Vec<String>,
}

/// An annotation referenced from span marks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_block() {
        let block: Block = serde_json::from_value(json!({
            "_type": "block",
            "_key": "k1",
            "style": "h2",
            "children": [{ "_type": "span", "text": "Intro", "marks": ["m1"] }],
            "markDefs": [{ "_key": "m1", "_type": "link", "href": "https://example.com" }]
        }))
        .unwrap();

        let Block::Text(text) = block else {
            panic!("expected a text block");
        };
        assert_eq!(text.style.as_deref(), Some("h2"));
        assert_eq!(text.children[0].text, "Intro");
        assert_eq!(
            text.mark_def("m1").and_then(|d| d.href.as_deref()),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_list_item() {
        let block: Block = serde_json::from_value(json!({
            "_type": "block",
            "listItem": "number",
            "level": 1,
            "children": []
        }))
        .unwrap();
        assert!(matches!(
            block,
            Block::Text(TextBlock { list_item: Some(ListKind::Number), .. })
        ));
    }

    #[test]
    fn test_unknown_block_keeps_type() {
        let block: Block =
            serde_json::from_value(json!({ "_type": "code", "code": "fn main() {}" })).unwrap();
        match block {
            Block::Unknown { kind, raw } => {
                assert_eq!(kind, "code");
                assert_eq!(raw["code"], "fn main() {}");
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }
}
