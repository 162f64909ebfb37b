// src/render/mod.rs - DECLARATIVE RENDER ENGINE

pub mod binding;
pub mod case_study;
pub mod dom;
pub mod renderer;
pub mod site;

pub use binding::{AttrBinding, Binding, BindingKind, BindingRegistry};
pub use case_study::CaseFieldRenderer;
pub use dom::{Document, NodeId};
pub use renderer::{EffectHook, NoEffects, RenderReport, Renderer, TypewriterRestart};
