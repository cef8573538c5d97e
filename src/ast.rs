//! Node tree definitions consumed by the renderers.
//!
//! Trees are produced by an external parser (or loaded with [`crate::load`])
//! and are never mutated by rendering.

use crate::error::{Error, Result};
use serde::Serialize;

/// A node of the document tree.
///
/// Rendering and dropping walk the tree with an explicit stack, so any depth
/// is safe there. `Clone`, `PartialEq`, `Serialize` and [`Node::inspect`]
/// recurse once per level and need a thread stack sized for the tree's
/// depth; trees from [`crate::load`] are capped at 128 levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A heading; `level` selects `<h1>`..`<h6>`
    Headline { level: u8, children: Vec<Node> },

    /// Raw text, rendered verbatim
    Text { text: String },

    /// A block quote
    BlockQuote { children: Vec<Node> },

    /// An unordered list; children are normally `BulletListItem`s
    BulletList { children: Vec<Node> },

    /// A single list item
    BulletListItem { children: Vec<Node> },

    /// Bare concatenation of children, no wrapper
    Plain { children: Vec<Node> },

    /// A paragraph
    Paragraph { children: Vec<Node> },

    /// A preformatted code block
    Verbatim { children: Vec<Node> },

    /// Generic inline wrapper such as `em` or `strong`.
    ///
    /// The tag name is passed through unchecked.
    InlineElement { name: String, children: Vec<Node> },

    /// A hard line break
    LineBreak,

    /// A thematic break
    HorizontalRule,

    /// Ruby (furigana) annotation
    Rubi(Rubi),

    /// Tate-chu-yoko: a horizontal run inside vertical text
    TatenakaYoko { text: String },

    /// Page break marker for paginated output
    NewPage,
}

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Headline,
    Text,
    BlockQuote,
    BulletList,
    BulletListItem,
    Plain,
    Paragraph,
    Verbatim,
    InlineElement,
    LineBreak,
    HorizontalRule,
    Rubi,
    TatenakaYoko,
    NewPage,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 14] = [
        Self::Headline,
        Self::Text,
        Self::BlockQuote,
        Self::BulletList,
        Self::BulletListItem,
        Self::Plain,
        Self::Paragraph,
        Self::Verbatim,
        Self::InlineElement,
        Self::LineBreak,
        Self::HorizontalRule,
        Self::Rubi,
        Self::TatenakaYoko,
        Self::NewPage,
    ];

    /// Parse a kind from its canonical name or a short alias.
    pub fn parse(s: &str) -> Result<Self> {
        // "BulletList", "bullet_list" and "bulletlist" all name the same kind
        let key = s.to_lowercase().replace('_', "");
        let kind = match key.as_str() {
            "headline" | "heading" | "h" => Self::Headline,
            "text" | "str" => Self::Text,
            "blockquote" | "quote" => Self::BlockQuote,
            "bulletlist" | "ul" => Self::BulletList,
            "bulletlistitem" | "li" => Self::BulletListItem,
            "plain" => Self::Plain,
            "paragraph" | "para" | "p" => Self::Paragraph,
            "verbatim" | "code" | "pre" => Self::Verbatim,
            "inlineelement" | "inline" => Self::InlineElement,
            "linebreak" | "br" => Self::LineBreak,
            "horizontalrule" | "hr" => Self::HorizontalRule,
            "rubi" | "ruby" => Self::Rubi,
            "tatenakayoko" | "tcy" => Self::TatenakaYoko,
            "newpage" | "pagebreak" => Self::NewPage,
            _ => return Err(Error::UnsupportedVariant(s.to_string())),
        };
        Ok(kind)
    }

    /// Canonical snake_case name, as used in serialized trees.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Text => "text",
            Self::BlockQuote => "block_quote",
            Self::BulletList => "bullet_list",
            Self::BulletListItem => "bullet_list_item",
            Self::Plain => "plain",
            Self::Paragraph => "paragraph",
            Self::Verbatim => "verbatim",
            Self::InlineElement => "inline_element",
            Self::LineBreak => "line_break",
            Self::HorizontalRule => "horizontal_rule",
            Self::Rubi => "rubi",
            Self::TatenakaYoko => "tatenaka_yoko",
            Self::NewPage => "new_page",
        }
    }

    /// Name used in debug output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Headline => "Headline",
            Self::Text => "Text",
            Self::BlockQuote => "BlockQuote",
            Self::BulletList => "BulletList",
            Self::BulletListItem => "BulletListItem",
            Self::Plain => "Plain",
            Self::Paragraph => "Paragraph",
            Self::Verbatim => "Verbatim",
            Self::InlineElement => "InlineElement",
            Self::LineBreak => "LineBreak",
            Self::HorizontalRule => "HorizontalRule",
            Self::Rubi => "Rubi",
            Self::TatenakaYoko => "TatenakaYoko",
            Self::NewPage => "NewPage",
        }
    }
}

/// Ruby annotation: a base string and its readings.
///
/// When the number of readings equals the number of characters in `parent`,
/// each reading annotates one character; otherwise the readings are joined
/// and annotate the whole base ("group" ruby).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rubi {
    parent: String,
    #[serde(rename = "rubi")]
    parts: Vec<String>,
}

impl Rubi {
    /// Build a ruby annotation. Both `parent` and `parts` must be non-empty.
    pub fn new(parent: impl Into<String>, parts: Vec<String>) -> Result<Self> {
        let parent = parent.into();
        if parent.is_empty() || parts.is_empty() {
            return Err(Error::MalformedRubi {
                parent,
                parts: parts.len(),
            });
        }
        Ok(Self { parent, parts })
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// True when one reading spans the whole base string.
    pub fn is_group(&self) -> bool {
        self.parent.chars().count() != self.parts.len()
    }
}

/// Borrowed view over a node's payload, used by the generic render fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// An ordered child sequence
    Children(&'a [Node]),
    /// A single nested node. No current variant produces this; it is kept
    /// so a future single-child variant renders through the fallback.
    Node(&'a Node),
    /// A primitive value
    Scalar(&'a str),
    /// No payload
    Absent,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn headline(level: u8, children: Vec<Node>) -> Self {
        Self::Headline { level, children }
    }

    pub fn block_quote(children: Vec<Node>) -> Self {
        Self::BlockQuote { children }
    }

    pub fn bullet_list(children: Vec<Node>) -> Self {
        Self::BulletList { children }
    }

    pub fn bullet_list_item(children: Vec<Node>) -> Self {
        Self::BulletListItem { children }
    }

    pub fn plain(children: Vec<Node>) -> Self {
        Self::Plain { children }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph { children }
    }

    pub fn verbatim(children: Vec<Node>) -> Self {
        Self::Verbatim { children }
    }

    pub fn inline(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::InlineElement {
            name: name.into(),
            children,
        }
    }

    /// Build a validated ruby node.
    pub fn rubi<S: Into<String>>(parent: impl Into<String>, parts: impl IntoIterator<Item = S>) -> Result<Self> {
        let parts = parts.into_iter().map(Into::into).collect();
        Ok(Self::Rubi(Rubi::new(parent, parts)?))
    }

    pub fn tcy(text: impl Into<String>) -> Self {
        Self::TatenakaYoko { text: text.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Headline { .. } => NodeKind::Headline,
            Self::Text { .. } => NodeKind::Text,
            Self::BlockQuote { .. } => NodeKind::BlockQuote,
            Self::BulletList { .. } => NodeKind::BulletList,
            Self::BulletListItem { .. } => NodeKind::BulletListItem,
            Self::Plain { .. } => NodeKind::Plain,
            Self::Paragraph { .. } => NodeKind::Paragraph,
            Self::Verbatim { .. } => NodeKind::Verbatim,
            Self::InlineElement { .. } => NodeKind::InlineElement,
            Self::LineBreak => NodeKind::LineBreak,
            Self::HorizontalRule => NodeKind::HorizontalRule,
            Self::Rubi(_) => NodeKind::Rubi,
            Self::TatenakaYoko { .. } => NodeKind::TatenakaYoko,
            Self::NewPage => NodeKind::NewPage,
        }
    }

    /// The node's payload.
    pub fn content(&self) -> Content<'_> {
        match self {
            Self::Headline { children, .. }
            | Self::BlockQuote { children }
            | Self::BulletList { children }
            | Self::BulletListItem { children }
            | Self::Plain { children }
            | Self::Paragraph { children }
            | Self::Verbatim { children }
            | Self::InlineElement { children, .. } => Content::Children(children),
            Self::Text { text } | Self::TatenakaYoko { text } => Content::Scalar(text),
            Self::Rubi(rubi) => Content::Scalar(rubi.parent()),
            Self::LineBreak | Self::HorizontalRule | Self::NewPage => Content::Absent,
        }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self.content() {
            Content::Children(children) => children,
            Content::Node(node) => std::slice::from_ref(node),
            Content::Scalar(_) | Content::Absent => &[],
        }
    }

    /// Human-readable summary for logs, e.g. `#<Text content="hi">`.
    pub fn inspect(&self) -> String {
        let kind = self.kind().display_name();
        match self {
            Self::LineBreak => "\\n".to_string(),
            Self::InlineElement { name, children } => format!(
                r#"#<{} name="{}" content="{}">"#,
                kind,
                name,
                inspect_list(children)
            ),
            Self::Rubi(rubi) => format!(r#"#<{} s="{}" r="{:?}">"#, kind, rubi.parent(), rubi.parts()),
            _ => match self.content() {
                Content::Children(children) => {
                    format!(r#"#<{} content="{}">"#, kind, inspect_list(children))
                }
                Content::Node(node) => format!(r#"#<{} content="{}">"#, kind, node.inspect()),
                Content::Scalar(s) => format!(r#"#<{} content="{}">"#, kind, s),
                Content::Absent => format!("#<{}>", kind),
            },
        }
    }
}

impl Drop for Node {
    // Unlinks children onto a heap stack so deep trees do not overflow on drop.
    fn drop(&mut self) {
        let mut stack = match self.children_mut() {
            Some(children) => std::mem::take(children),
            None => return,
        };
        while let Some(mut node) = stack.pop() {
            if let Some(children) = node.children_mut() {
                stack.append(children);
            }
        }
    }
}

impl Node {
    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Headline { children, .. }
            | Self::BlockQuote { children }
            | Self::BulletList { children }
            | Self::BulletListItem { children }
            | Self::Plain { children }
            | Self::Paragraph { children }
            | Self::Verbatim { children }
            | Self::InlineElement { children, .. } => Some(children),
            Self::Text { .. }
            | Self::TatenakaYoko { .. }
            | Self::Rubi(_)
            | Self::LineBreak
            | Self::HorizontalRule
            | Self::NewPage => None,
        }
    }
}

fn inspect_list(nodes: &[Node]) -> String {
    let items: Vec<String> = nodes.iter().map(Node::inspect).collect();
    format!("[{}]", items.join(", "))
}
