use crate::block::{Block, List, Span};
use crate::node::{HtmlNode, LeafNode, ParentNode};

/// Assemble parsed blocks into a single `<div>` root, one child per block.
pub fn blocks_to_html(blocks: &[Block]) -> HtmlNode {
    let children = blocks.iter().map(block_to_node).collect();
    ParentNode::new("div", children).into()
}

fn block_to_node(block: &Block) -> HtmlNode {
    match block {
        Block::Heading { level, content } => wrap(format!("h{level}"), spans_to_nodes(content)),
        Block::Paragraph { content } => wrap("p", spans_to_nodes(content)),
        Block::CodeBlock { content } => {
            wrap("pre", vec![LeafNode::new("code", content.as_str()).into()])
        }
        Block::Quote { lines } => wrap("blockquote", quote_to_nodes(lines)),
        Block::List(list) => list_to_node(list),
    }
}

fn wrap(tag: impl Into<String>, children: Vec<HtmlNode>) -> HtmlNode {
    ParentNode::new(tag, children).into()
}

fn spans_to_nodes(spans: &[Span]) -> Vec<HtmlNode> {
    spans.iter().map(span_to_node).collect()
}

/// Flatten quoted lines into one run, a space between non-empty lines.
///
/// This departs from plain concatenation on purpose, so `> a\n>b` reads
/// `a b` rather than `ab`.
fn quote_to_nodes(lines: &[Vec<Span>]) -> Vec<HtmlNode> {
    let mut nodes = Vec::new();
    for line in lines.iter().filter(|line| !line.is_empty()) {
        if !nodes.is_empty() {
            nodes.push(LeafNode::text(" ").into());
        }
        nodes.extend(line.iter().map(span_to_node));
    }
    nodes
}

fn list_to_node(list: &List) -> HtmlNode {
    let tag = if list.ordered { "ol" } else { "ul" };
    let items = list
        .items
        .iter()
        .map(|item| wrap("li", spans_to_nodes(item)))
        .collect();
    wrap(tag, items)
}

/// Convert one inline span to its leaf node.
pub fn span_to_node(span: &Span) -> HtmlNode {
    let leaf = match span {
        Span::Text(text) => LeafNode::text(text.as_str()),
        Span::Bold(text) => LeafNode::new("b", text.as_str()),
        Span::Italic(text) => LeafNode::new("i", text.as_str()),
        Span::Code(text) => LeafNode::new("code", text.as_str()),
        Span::Link { text, url } => {
            LeafNode::new("a", text.as_str()).with_attribute("href", url.as_str())
        }
        Span::Image { alt, url } => LeafNode::new("img", "")
            .with_attribute("src", url.as_str())
            .with_attribute("alt", alt.as_str()),
    };
    leaf.into()
}
