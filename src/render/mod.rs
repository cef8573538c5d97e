//! Rendering layer for converting node trees to output formats.

pub mod html;
pub mod tex;

pub use html::{render_html, render_html_with, HtmlBackend, HtmlConfig};
pub use tex::{render_tex, TexBackend, TEX_PLACEHOLDER};

use crate::ast::Node;
use crate::error::Error;
use std::str::FromStr;

/// Output backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// HTML fragments.
    #[default]
    Html,
    /// TeX source. Not implemented; always yields [`TEX_PLACEHOLDER`].
    Tex,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "tex" | "latex" => Ok(Self::Tex),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// Trait for output backends.
pub trait Backend {
    /// Short backend name, for logs.
    fn name(&self) -> &'static str;

    /// Whether `render` produces real output.
    fn is_implemented(&self) -> bool {
        true
    }

    /// Render a tree to a string.
    fn render(&self, node: &Node) -> String;
}

/// Create a backend of the given kind.
pub fn create_backend(kind: BackendKind, config: &HtmlConfig) -> Box<dyn Backend> {
    match kind {
        BackendKind::Html => Box::new(HtmlBackend::new(config.clone())),
        BackendKind::Tex => Box::new(TexBackend),
    }
}
