//! TeX backend placeholder.

use super::Backend;
use crate::ast::Node;

/// Output of the TeX backend for every input.
pub const TEX_PLACEHOLDER: &str = "no impl.";

/// Render a tree to TeX. Not implemented: always returns [`TEX_PLACEHOLDER`].
pub fn render_tex(node: &Node) -> String {
    tracing::warn!(kind = node.kind().name(), "TeX output is not implemented");
    TEX_PLACEHOLDER.to_string()
}

/// The unimplemented TeX backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct TexBackend;

impl Backend for TexBackend {
    fn name(&self) -> &'static str {
        "tex"
    }

    fn is_implemented(&self) -> bool {
        false
    }

    fn render(&self, node: &Node) -> String {
        render_tex(node)
    }
}
