mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
pub mod site;
pub mod template;

pub use block::{Block, BlockType, List, Span};
pub use config::{Config, ConfigError, PathsConfig, SiteConfig};
pub use error::{RenderError, Result};
pub use html::{blocks_to_html, span_to_node};
pub use inline::tokenize;
pub use node::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use parser::{classify, extract_title, split_into_blocks};

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Result<Vec<Block>> {
    parser::parse(markdown)
}

/// Build the document tree: a `<div>` holding one node per block.
pub fn render_document(markdown: &str) -> Result<HtmlNode> {
    let blocks = parse(markdown)?;
    Ok(html::blocks_to_html(&blocks))
}

/// Serialize a node tree to an HTML string.
pub fn serialize(node: &HtmlNode) -> Result<String> {
    node.to_html()
}

/// Convert markdown to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    serialize(&render_document(markdown)?)
}
