// src/render/case_study.rs
use crate::core::prelude::*;
use crate::i18n::Resolver;
use crate::render::binding::BindingRegistry;
use crate::render::dom::Document;

const TITLE_FIELD: &str = "title";
const TITLE_TEMPLATE_KEY: &str = "case.page_title";

/// Writes per-case text fields and the page title for case-study pages.
pub struct CaseFieldRenderer;

impl CaseFieldRenderer {
    /// Returns the number of fields written. Pages without a case id, or
    /// with an id the catalog does not know, are left alone.
    pub fn render(
        resolver: &mut Resolver,
        lang: Language,
        doc: &mut Document,
        registry: &BindingRegistry,
    ) -> usize {
        let Some(case_id) = registry.case_id() else {
            return 0;
        };
        if !resolver.catalog().cases().contains(case_id) {
            log::debug!("Unknown case '{}', skipping case fields", case_id);
            return 0;
        }

        if let Some((found, _)) = resolver.case_record(case_id, lang) {
            if found != lang {
                log::debug!("Case '{}' has no {} record, using {}", case_id, lang, found);
            }
        }

        let mut written = 0;
        for binding in registry.case_fields() {
            match resolver.case_field(case_id, lang, &binding.field) {
                Some(text) => {
                    doc.set_text(binding.node, text);
                    written += 1;
                }
                None => log::debug!("Case '{}' has no field '{}'", case_id, binding.field),
            }
        }

        if let Some(title) = resolver
            .case_field(case_id, lang, TITLE_FIELD)
            .map(str::to_string)
        {
            let page_title =
                resolver.resolve_with(lang, TITLE_TEMPLATE_KEY, &[("title", title.as_str())]);
            if page_title.is_empty() {
                doc.set_title(&title);
            } else {
                doc.set_title(&page_title);
            }
        }

        written
    }
}
