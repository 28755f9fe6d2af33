//! The rendering contract shared by every screen.
//!
//! A screen only knows how to turn its data into markup. Putting that markup
//! on the page is done by the free functions here, which work on any
//! [`Template`].

use larder_dom::{node_at, preorder, preorder_paths, DomNode};
use tracing::debug;

use crate::region::Region;

pub const DEFAULT_ERROR: &str = "Something went wrong. Please try again!";

/// A screen renderer.
pub trait Template {
    type Data: ?Sized;

    /// Name of the region this screen owns.
    fn region(&self) -> &'static str;

    fn markup(&self, data: &Self::Data) -> Vec<DomNode>;

    /// Empty data makes [`render`] show the error block instead.
    fn is_empty(&self, _data: &Self::Data) -> bool {
        false
    }

    fn error_message(&self) -> &'static str {
        DEFAULT_ERROR
    }

    fn message(&self) -> &'static str {
        ""
    }
}

/// Replace the region with the screen's markup, or its error block when `data` is empty.
pub fn render<T: Template + ?Sized>(view: &T, region: &mut Region, data: &T::Data) {
    if view.is_empty(data) {
        render_error(view, region, None);
        return;
    }
    region.replace(view.markup(data));
}

/// Patch the region in place towards the screen's markup.
///
/// Elements are paired by pre-order position. For each pair that differs,
/// non-blank leading text replaces the old element's text and every new
/// attribute is copied over. Attributes missing from the new element stay.
/// A different element nesting or tag sequence replaces the region. Empty
/// data or empty markup leaves it alone.
pub fn update<T: Template + ?Sized>(view: &T, region: &mut Region, data: &T::Data) {
    if view.is_empty(data) {
        return;
    }
    let new = view.markup(data);
    if new.is_empty() {
        return;
    }

    let new_paths = preorder_paths(&new);
    let old_tags: Vec<&str> = preorder(region.children()).iter().map(|n| n.tag.as_str()).collect();
    let new_tags: Vec<&str> = preorder(&new).iter().map(|n| n.tag.as_str()).collect();
    if old_tags != new_tags || preorder_paths(region.children()) != new_paths {
        debug!(region = region.name(), old = old_tags.len(), new = new_tags.len(), "shape changed, replacing");
        region.replace(new);
        return;
    }

    for (index, path) in new_paths.iter().enumerate() {
        let Some(new_el) = node_at(&new, path) else { continue };
        match node_at(region.children(), path) {
            Some(cur) if cur == new_el => continue,
            Some(_) => {}
            None => continue,
        }

        if new_el.first_text().is_some_and(|t| !t.trim().is_empty()) {
            region.set_text(index, path, new_el.text_content());
        }
        if let Some(attrs) = &new_el.attrs {
            let mut names: Vec<&String> = attrs.keys().collect();
            names.sort();
            for name in names {
                region.set_attr(index, path, name, &attrs[name]);
            }
        }
    }
}

pub(crate) fn icon(name: &str) -> DomNode {
    DomNode::new("svg").with_child(DomNode::new("use").with_attr("href", format!("img/icons.svg#icon-{}", name)))
}

pub fn render_spinner(region: &mut Region) {
    region.replace(vec![DomNode::new("div").with_class("spinner").with_child(icon("loader"))]);
}

/// Error block with `message`, or the screen's default error message.
pub fn render_error<T: Template + ?Sized>(view: &T, region: &mut Region, message: Option<&str>) {
    let message = message.unwrap_or(view.error_message());
    region.replace(vec![DomNode::new("div")
        .with_class("error")
        .with_child(DomNode::new("div").with_child(icon("alert-triangle")))
        .with_child(DomNode::text("p", message))]);
}

/// Message block with `message`, or the screen's default message.
pub fn render_message<T: Template + ?Sized>(view: &T, region: &mut Region, message: Option<&str>) {
    let message = message.unwrap_or(view.message());
    region.replace(vec![DomNode::new("div")
        .with_class("message")
        .with_child(DomNode::new("div").with_child(icon("smile")))
        .with_child(DomNode::text("p", message))]);
}
