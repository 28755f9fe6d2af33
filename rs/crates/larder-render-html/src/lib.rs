//! larder-render-html: Render Larder DomNode trees to HTML strings
//!
//! Event bindings are written as `data-a_<event>` attributes so that a page
//! loaded in a browser keeps the same delegation hooks the regions use.

use larder_dom::DomNode;

/// Void elements that must not have closing tags
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Render a sequence of sibling nodes (a region's content).
pub fn render_fragment(nodes: &[DomNode]) -> String {
    let mut buf = String::with_capacity(nodes.len() * 256);
    for node in nodes {
        write_node(node, &mut buf);
    }
    buf
}

/// One named page region and its current content.
pub struct RegionHtml<'a> {
    pub name: &'a str,
    pub content: &'a [DomNode],
}

/// Options for rendering the full page shell.
pub struct PageOptions<'a> {
    pub title: Option<String>,
    pub description: Option<String>,
    pub styles: Vec<String>,
    pub regions: Vec<RegionHtml<'a>>,
}

/// Render a full HTML page with every region in its own container.
pub fn render_page(opts: &PageOptions<'_>) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");

    if let Some(title) = &opts.title {
        html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    }
    if let Some(desc) = &opts.description {
        html.push_str(&format!("<meta name=\"description\" content=\"{}\" />\n", escape_attr(desc)));
    }
    for href in &opts.styles {
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\" />", escape_attr(href)));
    }

    html.push_str("\n</head>\n<body>\n<div class=\"container\">\n");
    for region in &opts.regions {
        html.push_str(&format!(
            "<div class=\"{}\" data-region=\"{}\">",
            escape_attr(region.name),
            escape_attr(region.name)
        ));
        html.push_str(&render_fragment(region.content));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</body>\n</html>");
    html
}

fn write_node(node: &DomNode, buf: &mut String) {
    let is_void = VOID_ELEMENTS.contains(&node.tag.as_str());

    buf.push('<');
    buf.push_str(&node.tag);

    if let Some(key) = &node.key {
        buf.push_str(" data-key=\"");
        buf.push_str(&escape_attr(key));
        buf.push('"');
    }

    if let Some(attrs) = &node.attrs {
        // Sort for deterministic output
        let mut keys: Vec<&String> = attrs.keys().collect();
        keys.sort();
        for k in keys {
            let v = &attrs[k];
            buf.push(' ');
            buf.push_str(k);
            buf.push_str("=\"");
            buf.push_str(&escape_attr(v));
            buf.push('"');
        }
    }

    if let Some(events) = &node.events {
        let mut keys: Vec<&String> = events.keys().collect();
        keys.sort();
        for k in keys {
            let v = &events[k];
            buf.push_str(" data-a_");
            buf.push_str(k);
            buf.push_str("=\"");
            buf.push_str(&escape_attr(v));
            buf.push('"');
        }
    }

    buf.push('>');

    if let Some(text) = &node.text {
        buf.push_str(&escape_html(text));
    }

    for child in node.children_iter() {
        write_node(child, buf);
    }

    if !is_void {
        buf.push_str("</");
        buf.push_str(&node.tag);
        buf.push('>');
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
