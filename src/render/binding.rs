// src/render/binding.rs
use crate::i18n::Catalog;
use crate::render::dom::{Document, NodeId};
use std::collections::BTreeSet;

// Markup contract
pub const ATTR_TEXT: &str = "data-i18n";
pub const ATTR_HTML: &str = "data-i18n-html";
pub const ATTR_ATTRS: &str = "data-i18n-attr";
pub const ATTR_TYPEWRITER: &str = "data-i18n-typewriter";
pub const ATTR_CASE: &str = "data-case";
pub const ATTR_CASE_FIELD: &str = "data-case-field";
/// Where typewriter source text is stored for the animation to pick up.
pub const TYPEWRITER_DATA: &str = "data-text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrBinding {
    pub attr: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Text(String),
    Html(String),
    Attributes(Vec<AttrBinding>),
    Typewriter(String),
}

impl BindingKind {
    pub fn keys(&self) -> Vec<&str> {
        match self {
            BindingKind::Text(key) | BindingKind::Html(key) | BindingKind::Typewriter(key) => {
                vec![key.as_str()]
            }
            BindingKind::Attributes(pairs) => pairs.iter().map(|p| p.key.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub node: NodeId,
    pub kind: BindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFieldBinding {
    pub node: NodeId,
    pub field: String,
}

/// `"title:nav.about, aria-label:nav.toggle_label"` -> pairs. Malformed entries are dropped.
pub fn parse_attr_spec(spec: &str) -> Vec<AttrBinding> {
    spec.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            match entry.split_once(':') {
                Some((attr, key)) if !attr.trim().is_empty() && !key.trim().is_empty() => {
                    Some(AttrBinding {
                        attr: attr.trim().to_string(),
                        key: key.trim().to_string(),
                    })
                }
                _ => {
                    log::debug!("Ignoring malformed attribute binding '{}'", entry);
                    None
                }
            }
        })
        .collect()
}

/// Bindings collected once per document and reused for every render.
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
    case_id: Option<String>,
    case_fields: Vec<CaseFieldBinding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the document once. Elements under a text or HTML binding are
    /// skipped since their content gets replaced wholesale.
    pub fn scan(doc: &Document) -> Self {
        let mut registry = Self::new();
        let mut stack: Vec<NodeId> = doc.children(doc.root()).into_iter().rev().collect();

        while let Some(id) = stack.pop() {
            let Some(el) = doc.element(id) else {
                continue;
            };

            if let Some(spec) = el.attr(ATTR_ATTRS) {
                let pairs = parse_attr_spec(spec);
                if !pairs.is_empty() {
                    registry.push(id, BindingKind::Attributes(pairs));
                }
            }
            if let Some(key) = non_empty(el.attr(ATTR_TYPEWRITER)) {
                registry.push(id, BindingKind::Typewriter(key.to_string()));
            }
            if let Some(field) = non_empty(el.attr(ATTR_CASE_FIELD)) {
                registry.case_fields.push(CaseFieldBinding {
                    node: id,
                    field: field.to_string(),
                });
            }
            if matches!(el.name(), "html" | "body") {
                if let Some(case_id) = non_empty(el.attr(ATTR_CASE)) {
                    // body wins over html, it comes later in document order
                    registry.case_id = Some(case_id.to_string());
                }
            }

            let replaces_content = match (
                non_empty(el.attr(ATTR_HTML)),
                non_empty(el.attr(ATTR_TEXT)),
            ) {
                (Some(key), text) => {
                    if text.is_some() {
                        log::debug!("Element has both text and HTML bindings; using HTML");
                    }
                    registry.push(id, BindingKind::Html(key.to_string()));
                    true
                }
                (None, Some(key)) => {
                    registry.push(id, BindingKind::Text(key.to_string()));
                    true
                }
                (None, None) => false,
            };

            if !replaces_content {
                stack.extend(doc.children(id).into_iter().rev());
            }
        }

        log::debug!(
            "Binding scan: {} bindings, {} case fields, case: {:?}",
            registry.bindings.len(),
            registry.case_fields.len(),
            registry.case_id
        );
        registry
    }

    fn push(&mut self, node: NodeId, kind: BindingKind) {
        self.bindings.push(Binding { node, kind });
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn case_id(&self) -> Option<&str> {
        self.case_id.as_deref()
    }

    pub fn case_fields(&self) -> &[CaseFieldBinding] {
        &self.case_fields
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.case_fields.is_empty()
    }

    pub fn referenced_keys(&self) -> BTreeSet<&str> {
        self.bindings.iter().flat_map(|b| b.kind.keys()).collect()
    }

    /// Keys referenced by bindings but absent from the default table.
    pub fn missing_keys(&self, catalog: &Catalog) -> Vec<String> {
        self.referenced_keys()
            .into_iter()
            .filter(|key| !catalog.has_key(key))
            .map(str::to_string)
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_spec_skips_malformed_entries() {
        let pairs = parse_attr_spec(" title:nav.about ,broken, :x, aria-label : nav.toggle_label,");
        assert_eq!(
            pairs,
            vec![
                AttrBinding {
                    attr: "title".into(),
                    key: "nav.about".into()
                },
                AttrBinding {
                    attr: "aria-label".into(),
                    key: "nav.toggle_label".into()
                },
            ]
        );
    }

    #[test]
    fn scan_collects_every_kind() {
        let doc = Document::parse(
            r#"<html><body data-case="sun">
                <a data-i18n="nav.about" data-i18n-attr="title:nav.about">About</a>
                <h1 data-i18n-html="hero.title_html"><span data-i18n="nav.contact">x</span></h1>
                <p class="typewriter" data-i18n-typewriter="hero.lede"></p>
                <h2 data-case-field="title"></h2>
            </body></html>"#,
        );
        let registry = BindingRegistry::scan(&doc);

        let kinds: Vec<&BindingKind> = registry.bindings().iter().map(|b| &b.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert!(kinds.contains(&&BindingKind::Text("nav.about".into())));
        assert!(kinds.contains(&&BindingKind::Html("hero.title_html".into())));
        assert!(kinds.contains(&&BindingKind::Typewriter("hero.lede".into())));
        // nested binding inside the HTML-bound heading is not collected
        assert!(!registry.referenced_keys().contains("nav.contact"));
        assert_eq!(registry.case_id(), Some("sun"));
        assert_eq!(registry.case_fields().len(), 1);
    }
}
