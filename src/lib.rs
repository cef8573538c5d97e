//! # xpub-markdown
//!
//! Renders xpub markdown node trees to HTML fragments.
//!
//! Trees are built by a parser outside this crate (or loaded from JSON with
//! [`load::from_json`]) and rendered by a single pass over the tree. Besides
//! the usual headings, paragraphs, lists and code blocks, the node set covers
//! Japanese typesetting: ruby annotations ([`Rubi`]) and tate-chu-yoko runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use xpub_markdown::{render_html, Node};
//!
//! let doc = Node::paragraph(vec![
//!     Node::rubi("友達", ["とも", "だち"]).unwrap(),
//!     Node::text("と"),
//!     Node::inline("em", vec![Node::text("遊ぶ")]),
//! ]);
//!
//! assert_eq!(
//!     render_html(&doc),
//!     "<p><ruby>友<rt>とも</rt>達<rt>だち</rt></ruby>と<em>遊ぶ</em></p>\n"
//! );
//! ```
//!
//! ## Ruby
//!
//! A [`Rubi`] whose reading count equals the character count of its base
//! string is rendered one reading per character. Any other count renders the
//! joined readings over the whole base:
//!
//! - `友達` + `[とも, だち]` → `<ruby>友<rt>とも</rt>達<rt>だち</rt></ruby>`
//! - `友` + `[とも, だち]` → `<ruby>友<rt>ともだち</rt></ruby>`
//!
//! ## Escaping
//!
//! Text is emitted verbatim by default. Set [`HtmlConfig::escape_text`] when
//! rendering untrusted input.
//!
//! ## Backends
//!
//! - `html` (default): HTML fragments, see [`render::html`]
//! - `tex`: declared but not implemented; always yields [`TEX_PLACEHOLDER`]

pub mod ast;
pub mod error;
pub mod load;
pub mod render;

// Convenience re-exports
pub use ast::{Content, Node, NodeKind, Rubi};
pub use error::{Error, Result};
pub use render::{
    create_backend, render_html, render_html_with, render_tex, Backend, BackendKind, HtmlConfig,
    TEX_PLACEHOLDER,
};

/// Load a JSON tree and render it with the given backend in one step.
///
/// # Example
///
/// ```rust
/// use xpub_markdown::{render_json, BackendKind};
///
/// let html = render_json(r#"{ "type": "hr" }"#, BackendKind::Html, None).unwrap();
/// assert_eq!(html, "<hr />\n");
/// ```
pub fn render_json(input: &str, backend: BackendKind, html_config: Option<&HtmlConfig>) -> Result<String> {
    let node = load::from_json(input)?;
    let backend = create_backend(backend, html_config.unwrap_or(&HtmlConfig::default()));
    Ok(backend.render(&node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_pipeline() {
        let input = r#"{
            "type": "plain",
            "children": [
                { "type": "headline", "level": 1, "children": [{ "type": "text", "text": "序章" }] },
                { "type": "paragraph", "children": [
                    { "type": "text", "text": "令和" },
                    { "type": "tcy", "text": "12" },
                    { "type": "text", "text": "年" },
                    { "type": "line_break" },
                    { "type": "rubi", "parent": "友", "rubi": ["とも", "だち"] }
                ] },
                { "type": "new_page" },
                { "type": "bullet_list", "children": [
                    { "type": "bullet_list_item", "children": [{ "type": "text", "text": "一" }] }
                ] },
                { "type": "verbatim", "children": [{ "type": "text", "text": "x" }] },
                { "type": "block_quote", "children": [{ "type": "text", "text": "q" }] },
                { "type": "horizontal_rule" }
            ]
        }"#;

        let html = render_json(input, BackendKind::Html, None).unwrap();
        let expected = concat!(
            "<h1>序章</h1>\n",
            "<p>令和<span class=\"tcy\">12</span>年<br />\n<ruby>友<rt>ともだち</rt></ruby></p>\n",
            "<ul>\n<li>一</li>\n</ul>\n",
            "<pre><code>x</code></pre>\n",
            "<blockquote>q</blockquote>\n",
            "<hr />\n",
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_pipeline_with_tex_backend() {
        let out = render_json(r#"{ "type": "paragraph" }"#, BackendKind::Tex, None).unwrap();
        assert_eq!(out, TEX_PLACEHOLDER);
    }

    #[test]
    fn test_pipeline_rejects_unknown_variant() {
        let err = render_json(r#"{ "type": "footnote" }"#, BackendKind::Html, None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVariant(_)));
    }

    #[test]
    fn test_render_shared_across_threads() {
        let doc = std::sync::Arc::new(Node::paragraph(vec![Node::rubi("友達", ["とも", "だち"]).unwrap()]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let doc = std::sync::Arc::clone(&doc);
                std::thread::spawn(move || render_html(&doc))
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                "<p><ruby>友<rt>とも</rt>達<rt>だち</rt></ruby></p>\n"
            );
        }
    }
}
