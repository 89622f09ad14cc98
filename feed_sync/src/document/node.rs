//! Owned document tree

use indexmap::IndexMap;

/// A parsed feed document: a single root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The root element's first direct child tagged `name` (e.g. `shop`).
    pub fn root_section(&self, name: &str) -> Option<&Node> {
        self.root.child(name)
    }
}

/// An element node: tag, attributes, element children and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push_str(&text.into());
        self
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn insert_attribute(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Element children in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_element_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Own text followed by descendant text, trimmed.
    pub fn trimmed_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_includes_descendants() {
        let node = Node::new("description")
            .with_text("  Soft ")
            .with_child(Node::new("b").with_text("cotton  "));
        assert_eq!(node.trimmed_text(), "Soft cotton");
    }

    #[test]
    fn root_section_is_direct_child_of_root() {
        let doc = Document::new(
            Node::new("yml_catalog")
                .with_child(Node::new("date"))
                .with_child(Node::new("shop").with_child(Node::new("offers"))),
        );
        assert_eq!(doc.root_section("shop").map(Node::name), Some("shop"));
        assert!(doc.root_section("offers").is_none());
    }
}
