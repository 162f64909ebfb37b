// src/render/renderer.rs
use crate::core::prelude::*;
use crate::lang::{LanguageContext, PreferenceStore};
use crate::render::binding::{BindingKind, BindingRegistry, TYPEWRITER_DATA};
use crate::render::case_study::CaseFieldRenderer;
use crate::render::dom::{Document, NodeId};

/// Called after a typewriter source was rebound so the effect starts over.
pub trait EffectHook {
    fn restart_typewriter(&mut self, doc: &mut Document, node: NodeId, text: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl EffectHook for NoEffects {
    fn restart_typewriter(&mut self, _doc: &mut Document, _node: NodeId, _text: &str) {}
}

/// Empties the visible `.typewriter-text` output so typing begins from the
/// first character of the new source.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypewriterRestart;

pub const TYPEWRITER_OUTPUT_CLASS: &str = "typewriter-text";

impl EffectHook for TypewriterRestart {
    fn restart_typewriter(&mut self, doc: &mut Document, node: NodeId, _text: &str) {
        if let Some(output) = doc.find_descendant_with_class(node, TYPEWRITER_OUTPUT_CLASS) {
            doc.set_text(output, "");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub language: Language,
    pub text: usize,
    pub html: usize,
    pub attributes: usize,
    pub typewriters: usize,
    pub case_fields: usize,
    /// Keys absent from every candidate language; their elements keep authored content.
    pub missing: Vec<String>,
}

impl RenderReport {
    fn new(language: Language) -> Self {
        Self {
            language,
            text: 0,
            html: 0,
            attributes: 0,
            typewriters: 0,
            case_fields: 0,
            missing: Vec::new(),
        }
    }

    pub fn applied(&self) -> usize {
        self.text + self.html + self.attributes + self.typewriters + self.case_fields
    }
}

pub struct Renderer<H: EffectHook = NoEffects> {
    hook: H,
    params: Vec<(String, String)>,
}

impl Renderer<NoEffects> {
    pub fn new() -> Self {
        Self::with_hook(NoEffects)
    }
}

impl Default for Renderer<NoEffects> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: EffectHook> Renderer<H> {
    pub fn with_hook(hook: H) -> Self {
        Self {
            hook,
            params: Vec::new(),
        }
    }

    /// Placeholder value available to every bound string (e.g. `{year}`).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Applies every binding for the context's active language, updates
    /// `<html lang>`, persists the language and re-renders case fields.
    /// Rendering the same language twice yields the same document.
    pub fn render<S: PreferenceStore>(
        &mut self,
        ctx: &mut LanguageContext<S>,
        doc: &mut Document,
        registry: &BindingRegistry,
    ) -> RenderReport {
        let lang = ctx.active();
        let mut report = RenderReport::new(lang);

        doc.set_lang(lang.code());
        ctx.persist();

        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        for binding in registry.bindings() {
            match &binding.kind {
                BindingKind::Text(key) => {
                    if let Some(text) = resolve(ctx, key, &params, &mut report) {
                        doc.set_text(binding.node, &text);
                        report.text += 1;
                    }
                }
                BindingKind::Html(key) => {
                    if let Some(markup) = resolve(ctx, key, &params, &mut report) {
                        doc.set_inner_html(binding.node, &markup);
                        report.html += 1;
                    }
                }
                BindingKind::Attributes(pairs) => {
                    for pair in pairs {
                        if let Some(value) = resolve(ctx, &pair.key, &params, &mut report) {
                            doc.set_attr(binding.node, &pair.attr, &value);
                            report.attributes += 1;
                        }
                    }
                }
                BindingKind::Typewriter(key) => {
                    if let Some(text) = resolve(ctx, key, &params, &mut report) {
                        doc.set_attr(binding.node, TYPEWRITER_DATA, &text);
                        self.hook.restart_typewriter(doc, binding.node, &text);
                        report.typewriters += 1;
                    }
                }
            }
        }

        report.case_fields = CaseFieldRenderer::render(ctx.resolver(), lang, doc, registry);

        if !report.missing.is_empty() {
            log::warn!(
                "Render {}: {} missing keys: {}",
                lang,
                report.missing.len(),
                report.missing.join(", ")
            );
        }
        log::debug!("Rendered {} bindings in {}", report.applied(), lang);
        report
    }

    /// Selects `lang` and re-renders before returning.
    pub fn switch_language<S: PreferenceStore>(
        &mut self,
        ctx: &mut LanguageContext<S>,
        lang: Language,
        doc: &mut Document,
        registry: &BindingRegistry,
    ) -> RenderReport {
        ctx.select(lang);
        self.render(ctx, doc, registry)
    }
}

fn resolve<S: PreferenceStore>(
    ctx: &mut LanguageContext<S>,
    key: &str,
    params: &[(&str, &str)],
    report: &mut RenderReport,
) -> Option<String> {
    let lang = ctx.active();
    if ctx.resolver().lookup(lang, key).is_none() {
        if !report.missing.iter().any(|k| k == key) {
            report.missing.push(key.to_string());
        }
        return None;
    }
    Some(ctx.resolve_with(key, params))
}
