// =====================================================
// FILE: src/render/dom.rs - MUTABLE HTML DOCUMENT
// =====================================================

use html5ever::{LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, StrTendril};

pub use ego_tree::NodeId;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed page edited in place. Serialization goes through html5ever, so
/// namespaced attributes (`xlink:href`, `xmlns:xlink`) survive a render.
///
/// Node ids stay valid for the document's lifetime; nodes dropped by a
/// content replacement are detached, not reused.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.html.tree.get(id).and_then(|n| n.value().as_element())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|n| n.descendants().skip(1).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    pub fn find_element(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|el| el.name() == name))
    }

    pub fn find_descendant_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(id).into_iter().find(|&n| {
            self.attr(n, "class")
                .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
        })
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .into_iter()
            .find(|&id| self.element(id).is_some())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            if let Node::Element(el) = node.value() {
                el.attrs.insert(
                    QualName::new(None, Namespace::from(""), LocalName::from(name)),
                    StrTendril::from(value),
                );
            }
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|d| d.value().as_text())
            .map(|t| &*t.text)
            .collect()
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if self.element(id).is_none() {
            return;
        }
        self.detach_children(id);
        if text.is_empty() {
            return;
        }
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.append(Node::Text(Text {
                text: StrTendril::from(text),
            }));
        }
    }

    /// Replaces the children with `markup`, parsed as a body fragment.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        if self.element(id).is_none() {
            return;
        }
        self.detach_children(id);

        let fragment = Html::parse_fragment(markup);
        let mut stack: Vec<_> = fragment
            .root_element()
            .children()
            .map(|c| (c, id))
            .collect();
        stack.reverse();

        while let Some((source, parent)) = stack.pop() {
            let Some(mut target) = self.html.tree.get_mut(parent) else {
                continue;
            };
            let copied = target.append(source.value().clone()).id();
            let mut children: Vec<_> = source.children().map(|c| (c, copied)).collect();
            children.reverse();
            stack.extend(children);
        }
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        self.html
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .map(|el| el.inner_html())
            .unwrap_or_default()
    }

    pub fn lang(&self) -> Option<&str> {
        self.document_element().and_then(|id| self.attr(id, "lang"))
    }

    pub fn set_lang(&mut self, code: &str) {
        if let Some(id) = self.document_element() {
            self.set_attr(id, "lang", code);
        }
    }

    pub fn title(&self) -> Option<String> {
        self.find_element("title").map(|id| self.text_content(id))
    }

    /// Creates `<title>` inside `<head>` when the page has none.
    pub fn set_title(&mut self, text: &str) {
        let id = match self.find_element("title") {
            Some(id) => id,
            None => {
                let parent = self
                    .find_element("head")
                    .or_else(|| self.document_element())
                    .unwrap_or_else(|| self.root());
                let element = Element::new(
                    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("title")),
                    Vec::new(),
                );
                match self.html.tree.get_mut(parent) {
                    Some(mut node) => node.append(Node::Element(element)).id(),
                    None => return,
                }
            }
        };
        self.set_text(id, text);
    }

    pub fn to_html(&self) -> String {
        self.html.html()
    }

    fn detach_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            if let Some(mut node) = self.html.tree.get_mut(child) {
                node.detach();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html lang="vi"><head><title>Old</title></head><body><p id="a" class="x y">Hi <b>there</b></p><img src="a.png" alt="A"><script>if (a < b) {}</script></body></html>"#;

    #[test]
    fn parse_and_serialize_keeps_structure() {
        let doc = Document::parse(PAGE);
        let html = doc.to_html();
        assert_eq!(html, PAGE);
        assert_eq!(Document::parse(&html).to_html(), html);
    }

    #[test]
    fn svg_namespaced_attributes_survive() {
        let page = r##"<!DOCTYPE html><html lang="vi"><head></head><body><a href="mailto:x@y.z"><svg xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#icon-mail"></use></svg></a></body></html>"##;
        let mut doc = Document::parse(page);
        doc.set_lang("en");
        let out = doc.to_html();
        assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(out.contains(r##"<use xlink:href="#icon-mail"></use>"##));
    }

    #[test]
    fn set_text_replaces_children_and_escapes() {
        let mut doc = Document::parse(PAGE);
        let p = doc.find_element("p").unwrap();
        doc.set_text(p, "a < b & c");
        assert_eq!(doc.text_content(p), "a < b & c");
        assert!(doc.to_html().contains(r#"<p id="a" class="x y">a &lt; b &amp; c</p>"#));
        assert!(doc.find_element("b").is_none());
    }

    #[test]
    fn set_inner_html_parses_markup() {
        let mut doc = Document::parse(PAGE);
        let p = doc.find_element("p").unwrap();
        doc.set_inner_html(p, r#"<span class="accent">Bold</span> move"#);
        assert_eq!(doc.inner_html(p), r#"<span class="accent">Bold</span> move"#);
        assert!(doc.find_descendant_with_class(p, "accent").is_some());
        assert_eq!(doc.text_content(p), "Bold move");
    }

    #[test]
    fn title_and_lang() {
        let mut doc = Document::parse(PAGE);
        assert_eq!(doc.title().as_deref(), Some("Old"));
        doc.set_title("New");
        doc.set_lang("en");
        assert_eq!(doc.title().as_deref(), Some("New"));
        assert_eq!(doc.lang(), Some("en"));
        assert!(doc.to_html().starts_with(r#"<!DOCTYPE html><html lang="en">"#));
    }

    #[test]
    fn missing_title_is_created_in_head() {
        let mut doc = Document::parse("<html><head></head><body></body></html>");
        doc.set_title("Case");
        let title = doc.find_element("title").unwrap();
        let head = doc.find_element("head").unwrap();
        assert!(doc.children(head).contains(&title));
        assert!(doc.to_html().contains("<head><title>Case</title></head>"));
    }

    #[test]
    fn new_attributes_append_existing_ones_update_in_place() {
        let mut doc = Document::parse(PAGE);
        let img = doc.find_element("img").unwrap();
        doc.set_attr(img, "alt", "B");
        doc.set_attr(img, "data-text", "x");
        assert!(doc
            .to_html()
            .contains(r#"<img src="a.png" alt="B" data-text="x">"#));
    }
}
