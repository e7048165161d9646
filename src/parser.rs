use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockType, List, Span};
use crate::error::{RenderError, Result};
use crate::inline::tokenize;

/// One to six hashes, a space, then heading text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) .").unwrap());

const FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks on blank lines.
pub fn split_into_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block by its textual shape.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.split('\n').collect();

    if let Some(caps) = HEADING_RE.captures(lines[0]) {
        return BlockType::Heading(caps[1].len() as u8);
    }
    if lines.len() > 1 && block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }
    // Line-prefix checks below need a non-empty line to look at
    if lines.iter().any(|line| line.is_empty()) {
        return BlockType::Paragraph;
    }

    let mut quote = true;
    let mut unordered = true;
    let mut ordered = true;
    for (i, line) in lines.iter().enumerate() {
        quote &= line.starts_with('>');
        unordered &= line.starts_with("- ");
        ordered &= line.starts_with(&format!("{}. ", i + 1));
    }

    if quote {
        BlockType::Quote
    } else if unordered {
        BlockType::UnorderedList
    } else if ordered {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Result<Vec<Block>> {
    split_into_blocks(markdown)
        .into_iter()
        .map(parse_block)
        .collect()
}

fn parse_block(text: &str) -> Result<Block> {
    let block_type = classify(text);
    tracing::trace!(?block_type, "classified block");

    let block = match block_type {
        BlockType::Heading(level) => {
            let joined = join_lines(text);
            let stripped = joined.trim_start_matches('#');
            let stripped = stripped.strip_prefix(' ').unwrap_or(stripped);
            Block::Heading {
                level,
                content: tokenize(stripped)?,
            }
        }
        BlockType::Paragraph => Block::Paragraph {
            content: tokenize(&join_lines(text))?,
        },
        BlockType::Code => Block::CodeBlock {
            content: strip_fence(text).to_owned(),
        },
        BlockType::Quote => Block::Quote {
            lines: text
                .split('\n')
                .map(|line| {
                    let line = line.strip_prefix('>').unwrap_or(line);
                    tokenize(line.strip_prefix(' ').unwrap_or(line))
                })
                .collect::<Result<_>>()?,
        },
        BlockType::UnorderedList => Block::List(List {
            ordered: false,
            items: list_items(text, |line| line.strip_prefix("- "))?,
        }),
        BlockType::OrderedList => Block::List(List {
            ordered: true,
            items: list_items(text, |line| line.split_once(". ").map(|(_, rest)| rest))?,
        }),
    };
    Ok(block)
}

/// Tokenize each line of a list block after removing its marker.
fn list_items(text: &str, strip_marker: fn(&str) -> Option<&str>) -> Result<Vec<Vec<Span>>> {
    text.split('\n')
        .map(|line| tokenize(strip_marker(line).unwrap_or(line)))
        .collect()
}

/// Trim each line and join them with single spaces.
fn join_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Remove the enclosing fences and the line break after the opening one.
/// Everything else, including text on the opening fence line, is code.
fn strip_fence(text: &str) -> &str {
    let inner = text
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .unwrap_or(text);
    inner.strip_prefix('\n').unwrap_or(inner)
}

/// Text of the first `# ` line in the document.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_owned())
        .ok_or(RenderError::NoTitleFound)
}
