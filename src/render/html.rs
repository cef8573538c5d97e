//! HTML renderer for node trees.
//!
//! Output is a fragment: no `<html>` or `<body>` wrapper. Block-level
//! elements end with a newline, inline elements do not.
//!
//! The tree is walked with an explicit work stack rather than native
//! recursion, so rendering itself has no depth limit. See [`Node`] for the
//! operations on a tree that do recurse.

use std::borrow::Cow;

use serde::Deserialize;

use super::Backend;
use crate::ast::{Content, Node, NodeKind, Rubi};
use crate::error::{Error, Result};

/// Configuration for HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlConfig {
    /// Escape `& < > "` in text content. Off by default: text is emitted verbatim.
    pub escape_text: bool,
    /// CSS class on tate-chu-yoko spans.
    pub tcy_class: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            escape_text: false,
            tcy_class: "tcy".to_string(),
        }
    }
}

impl HtmlConfig {
    /// Load a config from TOML. Missing keys take their default values.
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

/// Render a tree to HTML with the default configuration.
pub fn render_html(node: &Node) -> String {
    render_html_with(node, &HtmlConfig::default())
}

/// Render a tree to HTML.
pub fn render_html_with(node: &Node, config: &HtmlConfig) -> String {
    let html = HtmlRenderer::new(config).render(node);
    tracing::trace!(kind = node.kind().name(), bytes = html.len(), "rendered node tree");
    html
}

/// The HTML backend.
#[derive(Debug, Clone, Default)]
pub struct HtmlBackend {
    config: HtmlConfig,
}

impl HtmlBackend {
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }
}

impl Backend for HtmlBackend {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, node: &Node) -> String {
        render_html_with(node, &self.config)
    }
}

enum Step<'a> {
    Visit(&'a Node),
    Emit(Cow<'a, str>),
}

struct HtmlRenderer<'a> {
    config: &'a HtmlConfig,
    output: String,
    stack: Vec<Step<'a>>,
}

impl<'a> HtmlRenderer<'a> {
    fn new(config: &'a HtmlConfig) -> Self {
        Self {
            config,
            output: String::new(),
            stack: Vec::new(),
        }
    }

    fn render(mut self, root: &'a Node) -> String {
        self.stack.push(Step::Visit(root));
        self.finish()
    }

    /// Run the work stack to completion.
    fn finish(mut self) -> String {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Visit(node) => self.render_node(node),
                Step::Emit(markup) => self.output.push_str(&markup),
            }
        }
        self.output
    }

    fn render_node(&mut self, node: &'a Node) {
        match node {
            Node::Headline { level, children } => {
                self.output.push_str(&format!("<h{}>", level));
                self.wrap(children, format!("</h{}>\n", level));
            }
            Node::BlockQuote { children } => {
                self.output.push_str("<blockquote>");
                self.wrap(children, "</blockquote>\n");
            }
            Node::BulletList { children } => {
                self.output.push_str("<ul>\n");
                self.wrap(children, "</ul>\n");
            }
            Node::BulletListItem { children } => {
                self.output.push_str("<li>");
                self.wrap(children, "</li>\n");
            }
            Node::Paragraph { children } => {
                self.output.push_str("<p>");
                self.wrap(children, "</p>\n");
            }
            Node::Verbatim { children } => {
                self.output.push_str("<pre><code>");
                self.wrap(children, "</code></pre>\n");
            }
            Node::InlineElement { name, children } => {
                self.output.push_str(&format!("<{}>", name));
                self.wrap(children, format!("</{}>", name));
            }
            Node::LineBreak => {
                self.output.push_str("<br />\n");
            }
            Node::HorizontalRule => {
                self.output.push_str("<hr />\n");
            }
            Node::Rubi(rubi) => {
                self.render_rubi(rubi);
            }
            Node::TatenakaYoko { text } => {
                let config = self.config;
                self.output.push_str(r#"<span class=""#);
                self.push_text(&config.tcy_class);
                self.output.push_str(r#"">"#);
                self.push_text(text);
                self.output.push_str("</span>");
            }
            // Text, Plain and NewPage have no markup of their own.
            Node::Text { .. } | Node::Plain { .. } | Node::NewPage => {
                self.render_content(node.kind(), node.content());
            }
        }
    }

    /// Generic rendering from a node's payload: children are rendered in
    /// order, a scalar is emitted as text, absent content yields nothing.
    fn render_content(&mut self, kind: NodeKind, content: Content<'a>) {
        match content {
            Content::Children(children) => self.push_children(children),
            Content::Node(inner) => self.stack.push(Step::Visit(inner)),
            Content::Scalar(text) => self.push_text(text),
            Content::Absent => {
                tracing::debug!(kind = kind.name(), "node has no content, rendering nothing");
            }
        }
    }

    /// Schedule `close` to be emitted after all of `children`.
    fn wrap(&mut self, children: &'a [Node], close: impl Into<Cow<'a, str>>) {
        self.stack.push(Step::Emit(close.into()));
        self.push_children(children);
    }

    fn push_children(&mut self, children: &'a [Node]) {
        self.stack.extend(children.iter().rev().map(Step::Visit));
    }

    fn render_rubi(&mut self, rubi: &Rubi) {
        self.output.push_str("<ruby>");
        if rubi.is_group() {
            self.push_text(rubi.parent());
            self.output.push_str("<rt>");
            self.push_text(&rubi.parts().concat());
            self.output.push_str("</rt>");
        } else {
            let mut buf = [0u8; 4];
            for (c, reading) in rubi.parent().chars().zip(rubi.parts()) {
                self.push_text(c.encode_utf8(&mut buf));
                self.output.push_str("<rt>");
                self.push_text(reading);
                self.output.push_str("</rt>");
            }
        }
        self.output.push_str("</ruby>");
    }

    fn push_text(&mut self, text: &str) {
        if self.config.escape_text {
            self.output.push_str(&escape_html(text));
        } else {
            self.output.push_str(text);
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
