//! Live page regions.
//!
//! A [`Region`] holds the element forest currently shown in one named area
//! of the page and records every change made to it.

use std::collections::HashMap;

use larder_dom::{count_elements, node_at, node_at_mut, preorder, preorder_paths, DomNode, NodePath};

/// One recorded change to a region. `index` is the pre-order position of the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Replace { elements: usize },
    SetText { index: usize },
    SetAttr { index: usize, name: String },
}

/// An event resolved against a region, ready to become an action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiEvent {
    /// Action name bound on the element that handled the event.
    pub action: String,
    /// That element's `data-*` attributes, prefix stripped.
    pub data: HashMap<String, String>,
    /// Named input values below that element, in document order.
    pub form: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    children: Vec<DomNode>,
    mutations: Vec<Mutation>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new(), mutations: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Drain the recorded mutations.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn is_dirty(&self) -> bool {
        !self.mutations.is_empty()
    }

    /// Swap the whole content.
    pub fn replace(&mut self, nodes: Vec<DomNode>) {
        let elements = count_elements(&nodes);
        self.children = nodes;
        self.mutations.push(Mutation::Replace { elements });
    }

    pub(crate) fn set_text(&mut self, index: usize, path: &NodePath, text: String) {
        if let Some(node) = node_at_mut(&mut self.children, path) {
            if node.text_content() != text {
                node.set_text_content(text);
                self.mutations.push(Mutation::SetText { index });
            }
        }
    }

    pub(crate) fn set_attr(&mut self, index: usize, path: &NodePath, name: &str, value: &str) {
        if let Some(node) = node_at_mut(&mut self.children, path) {
            if node.attr(name) != Some(value) {
                node.set_attr(name, value);
                self.mutations.push(Mutation::SetAttr { index, name: name.to_string() });
            }
        }
    }

    /// Pre-order index of the first element matching `pred`.
    pub fn position(&self, pred: impl Fn(&DomNode) -> bool) -> Option<usize> {
        preorder(&self.children).into_iter().position(|n| pred(n))
    }

    /// Set an attribute without recording it, the way user input changes a form field.
    pub fn input(&mut self, index: usize, name: &str, value: &str) -> bool {
        let Some(path) = preorder_paths(&self.children).into_iter().nth(index) else {
            return false;
        };
        match node_at_mut(&mut self.children, &path) {
            Some(node) => {
                node.set_attr(name, value);
                true
            }
            None => false,
        }
    }

    /// Dispatch `event` on the element at pre-order `index`.
    ///
    /// The event is handled by the closest element, the target included,
    /// that binds it. `None` when nothing on the way up does.
    pub fn fire(&self, index: usize, event: &str) -> Option<UiEvent> {
        let mut path = preorder_paths(&self.children).into_iter().nth(index)?;
        while !path.is_empty() {
            let node = node_at(&self.children, &path)?;
            if let Some(action) = node.event(event) {
                return Some(UiEvent {
                    action: action.to_string(),
                    data: node.dataset(),
                    form: form_entries(node),
                });
            }
            path.pop();
        }
        None
    }
}

const FORM_FIELDS: &[&str] = &["input", "select", "textarea"];

fn form_entries(node: &DomNode) -> Vec<(String, String)> {
    preorder(std::slice::from_ref(node))
        .into_iter()
        .filter(|n| FORM_FIELDS.contains(&n.tag.as_str()))
        .filter_map(|n| {
            let name = n.attr("name")?;
            Some((name.to_string(), n.attr("value").unwrap_or("").to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Vec<DomNode> {
        vec![DomNode::new("form")
            .with_event("submit", "search")
            .with_attr("data-origin", "header")
            .with_child(DomNode::new("input").with_attr("name", "query").with_attr("value", "pizza"))
            .with_child(DomNode::new("button").with_child(DomNode::text("span", "Search")))]
    }

    #[test]
    fn test_fire_bubbles_to_closest_binding() {
        let mut region = Region::new("header");
        region.replace(form());
        let span = region.position(|n| n.tag == "span").unwrap();

        let event = region.fire(span, "submit").unwrap();
        assert_eq!(event.action, "search");
        assert_eq!(event.data.get("origin").map(String::as_str), Some("header"));
        assert_eq!(event.form, vec![("query".to_string(), "pizza".to_string())]);

        assert!(region.fire(span, "click").is_none());
        assert!(region.fire(99, "submit").is_none());
    }

    #[test]
    fn test_input_is_not_recorded() {
        let mut region = Region::new("header");
        region.replace(form());
        region.take_mutations();

        let field = region.position(|n| n.tag == "input").unwrap();
        assert!(region.input(field, "value", "pasta"));
        assert!(!region.is_dirty());
        assert_eq!(region.fire(field, "submit").unwrap().form[0].1, "pasta");
    }

    #[test]
    fn test_replace_records_element_count() {
        let mut region = Region::new("header");
        region.replace(form());
        assert_eq!(region.mutations(), &[Mutation::Replace { elements: 4 }]);
    }
}
