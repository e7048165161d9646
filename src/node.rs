//! HTML node tree and its serialization.
//!
//! Values and attribute values are written verbatim: nothing is escaped.

use crate::error::{RenderError, Result};

/// Ordered attribute map. Keys are unique; insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write each pair as ` key="value"`.
    fn write_html(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// A node without children. With no tag it renders as bare text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub tag: Option<String>,
    pub value: Option<String>,
    pub attributes: Attributes,
}

impl LeafNode {
    /// `<tag>value</tag>`
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        let Some(value) = &self.value else {
            return Err(RenderError::MissingValue {
                tag: self.tag.clone(),
            });
        };
        let Some(tag) = &self.tag else {
            out.push_str(value);
            return Ok(());
        };
        out.push('<');
        out.push_str(tag);
        self.attributes.write_html(out);
        out.push('>');
        out.push_str(value);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Ok(())
    }
}

/// A tagged node wrapping child nodes.
///
/// `attributes` are accepted but never rendered; existing pages depend on
/// that output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<HtmlNode>,
    pub attributes: Attributes,
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        if self.tag.is_empty() {
            return Err(RenderError::MissingTag);
        }
        if self.children.is_empty() {
            return Err(RenderError::MissingChildren {
                tag: self.tag.clone(),
            });
        }
        out.push('<');
        out.push_str(&self.tag);
        out.push('>');
        for child in &self.children {
            child.write_html(out)?;
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Serialize this node and everything under it.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.write_html(out),
            HtmlNode::Parent(parent) => parent.write_html(out),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}
