//! Loading node trees from JSON.
//!
//! Each node is an object tagged with `"type"`:
//!
//! ```text
//! { "type": "paragraph", "children": [
//!     { "type": "text", "text": "See " },
//!     { "type": "rubi", "parent": "友達", "rubi": ["とも", "だち"] }
//! ] }
//! ```
//!
//! Nesting is limited by `serde_json`'s recursion limit (128 levels).

use crate::ast::{Node, NodeKind, Rubi};
use crate::error::{Error, Result};
use serde::Deserialize;

/// Parse a node tree from JSON.
pub fn from_json(input: &str) -> Result<Node> {
    let raw: RawNode = serde_json::from_str(input)?;
    convert_node(raw)
}

impl Node {
    /// Parse a node tree from JSON. See [`crate::load`] for the format.
    pub fn from_json(input: &str) -> Result<Node> {
        from_json(input)
    }
}

/// Raw node structure for deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    children: Option<Vec<RawNode>>,
    level: Option<u8>,
    name: Option<String>,
    text: Option<String>,
    parent: Option<String>,
    rubi: Option<Vec<String>>,
}

impl RawNode {
    /// First field that is set but has no meaning for `kind`.
    fn unexpected_field(&self, kind: NodeKind) -> Option<&'static str> {
        let present = [
            ("children", self.children.is_some()),
            ("level", self.level.is_some()),
            ("name", self.name.is_some()),
            ("text", self.text.is_some()),
            ("parent", self.parent.is_some()),
            ("rubi", self.rubi.is_some()),
        ];
        let allowed = allowed_fields(kind);
        present
            .into_iter()
            .find(|(field, set)| *set && !allowed.contains(field))
            .map(|(field, _)| field)
    }
}

fn allowed_fields(kind: NodeKind) -> &'static [&'static str] {
    match kind {
        NodeKind::Headline => &["level", "children"],
        NodeKind::BlockQuote
        | NodeKind::BulletList
        | NodeKind::BulletListItem
        | NodeKind::Plain
        | NodeKind::Paragraph
        | NodeKind::Verbatim => &["children"],
        NodeKind::InlineElement => &["name", "children"],
        NodeKind::Text | NodeKind::TatenakaYoko => &["text"],
        NodeKind::Rubi => &["parent", "rubi"],
        NodeKind::LineBreak | NodeKind::HorizontalRule | NodeKind::NewPage => &[],
    }
}

/// Convert a raw node into a validated [`Node`].
///
/// Children are converted before the node's own fields are checked, so an
/// unsupported type anywhere in the tree is reported as such.
fn convert_node(mut raw: RawNode) -> Result<Node> {
    let kind = NodeKind::parse(&raw.kind)?;
    let unexpected = raw.unexpected_field(kind);
    let children = convert_children(raw.children.take().unwrap_or_default())?;
    if let Some(field) = unexpected {
        return Err(Error::UnexpectedField {
            kind: kind.name(),
            field,
        });
    }

    let node = match kind {
        NodeKind::Headline => Node::Headline {
            level: raw.level.unwrap_or(1),
            children,
        },
        NodeKind::Text => Node::Text {
            text: required(kind, "text", raw.text)?,
        },
        NodeKind::BlockQuote => Node::BlockQuote { children },
        NodeKind::BulletList => Node::BulletList { children },
        NodeKind::BulletListItem => Node::BulletListItem { children },
        NodeKind::Plain => Node::Plain { children },
        NodeKind::Paragraph => Node::Paragraph { children },
        NodeKind::Verbatim => Node::Verbatim { children },
        NodeKind::InlineElement => Node::InlineElement {
            name: required(kind, "name", raw.name)?,
            children,
        },
        NodeKind::LineBreak => Node::LineBreak,
        NodeKind::HorizontalRule => Node::HorizontalRule,
        NodeKind::Rubi => {
            let parent = required(kind, "parent", raw.parent)?;
            let parts = required(kind, "rubi", raw.rubi)?;
            Node::Rubi(Rubi::new(parent, parts)?)
        }
        NodeKind::TatenakaYoko => Node::TatenakaYoko {
            text: required(kind, "text", raw.text)?,
        },
        NodeKind::NewPage => Node::NewPage,
    };

    Ok(node)
}

fn convert_children(children: Vec<RawNode>) -> Result<Vec<Node>> {
    children.into_iter().map(convert_node).collect()
}

fn required<T>(kind: NodeKind, field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or(Error::MissingField {
        kind: kind.name(),
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_document() {
        let input = r#"{
            "type": "plain",
            "children": [
                { "type": "headline", "level": 2, "children": [{ "type": "text", "text": "Title" }] },
                { "type": "para", "children": [
                    { "type": "inline_element", "name": "em", "children": [{ "type": "text", "text": "hi" }] },
                    { "type": "rubi", "parent": "友達", "rubi": ["とも", "だち"] },
                    { "type": "tcy", "text": "12" }
                ] },
                { "type": "hr" },
                { "type": "new_page" }
            ]
        }"#;

        let node = from_json(input).unwrap();
        let expected = Node::plain(vec![
            Node::headline(2, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::inline("em", vec![Node::text("hi")]),
                Node::rubi("友達", ["とも", "だち"]).unwrap(),
                Node::tcy("12"),
            ]),
            Node::HorizontalRule,
            Node::NewPage,
        ]);
        assert_eq!(node, expected);
    }

    #[test]
    fn test_headline_level_defaults_to_one() {
        let node = Node::from_json(r#"{ "type": "headline" }"#).unwrap();
        assert_eq!(node, Node::headline(1, vec![]));
    }

    #[test]
    fn test_unknown_type() {
        let err = from_json(r#"{ "type": "table", "children": [] }"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVariant(ref s) if s == "table"));
    }

    #[test]
    fn test_unknown_type_nested() {
        let input = r#"{ "type": "paragraph", "children": [{ "type": "image" }] }"#;
        assert!(matches!(from_json(input), Err(Error::UnsupportedVariant(_))));
    }

    #[test]
    fn test_empty_rubi_rejected() {
        let err = from_json(r#"{ "type": "rubi", "parent": "友", "rubi": [] }"#).unwrap_err();
        assert!(matches!(err, Error::MalformedRubi { .. }));
    }

    #[test]
    fn test_missing_field() {
        let err = from_json(r#"{ "type": "inline_element", "children": [] }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { kind: "inline_element", field: "name" }
        ));
    }

    #[test]
    fn test_leaf_children_are_checked() {
        let err = from_json(r#"{ "type": "hr", "children": [{ "type": "footnote" }] }"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVariant(ref s) if s == "footnote"));

        let input = r#"{ "type": "text", "text": "a", "children": [{ "type": "table" }] }"#;
        assert!(matches!(from_json(input), Err(Error::UnsupportedVariant(_))));
    }

    #[test]
    fn test_leaf_with_children_rejected() {
        let input = r#"{ "type": "hr", "children": [{ "type": "text", "text": "x" }] }"#;
        assert!(matches!(
            from_json(input),
            Err(Error::UnexpectedField { kind: "horizontal_rule", field: "children" })
        ));

        let input = r#"{ "type": "new_page", "children": [] }"#;
        assert!(matches!(
            from_json(input),
            Err(Error::UnexpectedField { kind: "new_page", field: "children" })
        ));
    }

    #[test]
    fn test_stray_field_on_container_rejected() {
        let err = from_json(r#"{ "type": "paragraph", "text": "lost" }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedField { kind: "paragraph", field: "text" }
        ));

        let err = from_json(r#"{ "type": "rubi", "parent": "友", "rubi": ["とも"], "level": 2 }"#).unwrap_err();
        assert!(matches!(err, Error::UnexpectedField { kind: "rubi", field: "level" }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(from_json("{ \"type\": "), Err(Error::Json(_))));
    }

    #[test]
    fn test_serialized_tree_loads_back() {
        let tree = Node::bullet_list(vec![Node::bullet_list_item(vec![
            Node::text("a"),
            Node::LineBreak,
            Node::rubi("東京", ["とうきょう"]).unwrap(),
        ])]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(from_json(&json).unwrap(), tree);
    }
}
