/// Errors raised while turning markdown into HTML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A `**`, `_` or backtick delimiter was opened but never closed.
    #[error("unterminated `{delimiter}` delimiter in {text:?}")]
    MalformedInlineSyntax {
        delimiter: &'static str,
        text: String,
    },
    /// A leaf node was serialized without a value.
    #[error("leaf node <{}> has no value", tag.as_deref().unwrap_or("#text"))]
    MissingValue { tag: Option<String> },
    /// A parent node was serialized with an empty tag.
    #[error("parent node has no tag")]
    MissingTag,
    /// A parent node was serialized with no children.
    #[error("parent node <{tag}> has no children")]
    MissingChildren { tag: String },
    /// The document has no `# ` heading line.
    #[error("no level-1 heading found")]
    NoTitleFound,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
