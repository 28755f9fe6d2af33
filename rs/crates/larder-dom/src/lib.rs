//! larder-dom: Shared DomNode types for Larder
//!
//! This crate defines the in-memory element tree that screen templates produce,
//! that page regions hold as their live content, and that the HTML renderer
//! serializes. Node paths and pre-order flattening live here too, because both
//! the patcher and the event resolver walk trees the same way.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single element in a Larder tree.
///
/// `text` is the element's leading text node; `children` follow it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomNode {
    /// HTML tag name (e.g. "div", "button", "input")
    pub tag: String,

    /// Stable identity, rendered as `data-key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// HTML attributes (class, href, data-*, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<HashMap<String, String>>,

    /// Map of DOM event name → action name (e.g. "click" → "toggle_bookmark")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<HashMap<String, String>>,

    /// Leading text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DomNode>>,
}

/// Position of an element inside a forest: child index at each depth.
pub type NodePath = Vec<usize>;

impl DomNode {
    /// Create an empty element
    pub fn new(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Create a simple text node
    pub fn text(tag: &str, content: &str) -> Self {
        DomNode::new(tag).with_text(content)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_event(mut self, event: &str, action: &str) -> Self {
        self.events
            .get_or_insert_with(HashMap::new)
            .insert(event.to_string(), action.to_string());
        self
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DomNode>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Get an attribute value if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(name).map(|s| s.as_str())
    }

    /// Set (or overwrite) an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.into());
    }

    /// Get a class attribute if present
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    /// True when the class list contains `name`
    pub fn has_class(&self, name: &str) -> bool {
        self.class()
            .map_or(false, |c| c.split_whitespace().any(|part| part == name))
    }

    /// Iterate over children (empty slice if none)
    pub fn children_iter(&self) -> &[DomNode] {
        match &self.children {
            Some(c) => c,
            None => &[],
        }
    }

    /// Get an event action by event name
    pub fn event(&self, name: &str) -> Option<&str> {
        self.events.as_ref()?.get(name).map(|s| s.as_str())
    }

    /// The leading text node, if any
    pub fn first_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Concatenated text of this element and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(t) = &self.text {
            out.push_str(t);
        }
        for child in self.children_iter() {
            child.collect_text(out);
        }
    }

    /// Replace everything inside the element with a single text node.
    pub fn set_text_content(&mut self, content: impl Into<String>) {
        self.text = Some(content.into());
        self.children = None;
    }

    /// `data-*` attributes with the prefix stripped.
    pub fn dataset(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        if let Some(attrs) = &self.attrs {
            for (k, v) in attrs {
                if let Some(name) = k.strip_prefix("data-") {
                    out.insert(name.to_string(), v.clone());
                }
            }
        }
        out
    }
}

/// Paths of every element in `nodes`, in pre-order (document order).
pub fn preorder_paths(nodes: &[DomNode]) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        prefix.push(i);
        walk_paths(node, &mut prefix, &mut out);
        prefix.pop();
    }
    out
}

fn walk_paths(node: &DomNode, prefix: &mut NodePath, out: &mut Vec<NodePath>) {
    out.push(prefix.clone());
    for (i, child) in node.children_iter().iter().enumerate() {
        prefix.push(i);
        walk_paths(child, prefix, out);
        prefix.pop();
    }
}

/// Elements of `nodes` flattened in pre-order.
pub fn preorder(nodes: &[DomNode]) -> Vec<&DomNode> {
    fn walk<'a>(node: &'a DomNode, out: &mut Vec<&'a DomNode>) {
        out.push(node);
        for child in node.children_iter() {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    for node in nodes {
        walk(node, &mut out);
    }
    out
}

/// Number of elements in `nodes`, descendants included.
pub fn count_elements(nodes: &[DomNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + count_elements(n.children_iter()))
        .sum()
}

/// Resolve a path. Returns None once the path leaves the tree.
pub fn node_at<'a>(nodes: &'a [DomNode], path: &[usize]) -> Option<&'a DomNode> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get(*first)?;
    for &i in rest {
        node = node.children.as_ref()?.get(i)?;
    }
    Some(node)
}

/// Mutable variant of [`node_at`].
pub fn node_at_mut<'a>(nodes: &'a mut [DomNode], path: &[usize]) -> Option<&'a mut DomNode> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get_mut(*first)?;
    for &i in rest {
        node = node.children.as_mut()?.get_mut(i)?;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DomNode> {
        vec![
            DomNode::new("li")
                .with_class("preview")
                .with_child(
                    DomNode::new("a")
                        .with_attr("href", "#1")
                        .with_child(DomNode::text("h4", "Cheese Pizza"))
                        .with_child(DomNode::text("p", "Publisher")),
                ),
            DomNode::text("span", "tail"),
        ]
    }

    #[test]
    fn test_json_shape_omits_empty_fields() {
        let json = r#"{
            "tag": "div",
            "key": "recipe",
            "children": [
                { "tag": "h1", "text": "Cheese Pizza" },
                { "tag": "button", "events": { "click": "toggle_bookmark" }, "text": "+" }
            ]
        }"#;

        let node: DomNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.key.as_deref(), Some("recipe"));
        assert_eq!(node.children_iter()[1].event("click"), Some("toggle_bookmark"));

        let out = serde_json::to_value(&node.children_iter()[0]).unwrap();
        assert_eq!(out, serde_json::json!({ "tag": "h1", "text": "Cheese Pizza" }));
    }

    #[test]
    fn test_preorder_paths_follow_document_order() {
        let nodes = sample();
        let paths = preorder_paths(&nodes);
        assert_eq!(
            paths,
            vec![vec![0], vec![0, 0], vec![0, 0, 0], vec![0, 0, 1], vec![1]]
        );
        assert_eq!(count_elements(&nodes), 5);
        let tags: Vec<&str> = preorder(&nodes).iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["li", "a", "h4", "p", "span"]);
    }

    #[test]
    fn test_node_at_resolves_and_stops_outside_tree() {
        let mut nodes = sample();
        assert_eq!(node_at(&nodes, &[0, 0, 1]).unwrap().text.as_deref(), Some("Publisher"));
        assert!(node_at(&nodes, &[0, 3]).is_none());
        assert!(node_at(&nodes, &[]).is_none());

        node_at_mut(&mut nodes, &[1]).unwrap().set_text_content("changed");
        assert_eq!(nodes[1].text_content(), "changed");
    }

    #[test]
    fn test_text_content_and_dataset() {
        let mut node = DomNode::new("button")
            .with_attr("data-update-to", "5")
            .with_class("btn--tiny btn--update-servings")
            .with_child(DomNode::text("span", "more"))
            .with_text("Serve ");
        assert_eq!(node.text_content(), "Serve more");
        assert!(node.has_class("btn--update-servings"));
        assert!(!node.has_class("btn"));
        assert_eq!(node.dataset().get("update-to").map(String::as_str), Some("5"));

        node.set_text_content("plain");
        assert!(node.children.is_none());
        assert_eq!(node.first_text(), Some("plain"));
    }
}
