// src/server/pages.rs - PER-REQUEST PAGE RENDERING
use super::cookies::CookieStore;
use super::types::{LangQuery, SiteState};
use crate::core::prelude::*;
use crate::lang::LanguageContext;
use crate::render::{BindingRegistry, Document, Renderer, TypewriterRestart};
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use std::path::Component;

/// Maps a decoded request path to a file below the site dir, refusing `..`
/// and absolute parts.
pub fn page_path(site_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() || trimmed.ends_with('/') {
        format!("{}index.html", trimmed)
    } else {
        trimmed.to_string()
    };

    let relative = Path::new(&relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(site_dir.join(relative))
}

pub async fn render_page(
    req: HttpRequest,
    data: web::Data<SiteState>,
    query: web::Query<LangQuery>,
) -> ActixResult<HttpResponse> {
    let requested = req.match_info().get("page").unwrap_or_default();
    let Some(file_path) = page_path(&data.site_dir, requested) else {
        log::warn!("Rejected path: {}", req.path());
        return Ok(HttpResponse::NotFound().body("Not found"));
    };

    let source = match tokio::fs::read_to_string(&file_path).await {
        Ok(source) => source,
        Err(e) => {
            log::debug!("Page {} unavailable: {}", file_path.display(), e);
            return Ok(HttpResponse::NotFound().body("Not found"));
        }
    };

    let mut ctx = LanguageContext::restore(data.catalog.clone(), CookieStore::from_request(&req));
    if let Some(code) = query.lang.as_deref() {
        if let Err(e) = ctx.select_code(code) {
            log::debug!("Ignoring ?lang: {}", e);
        }
    }

    let mut doc = Document::parse(&source);
    let registry = BindingRegistry::scan(&doc);
    let year = chrono::Local::now().year().to_string();
    let report = Renderer::with_hook(TypewriterRestart)
        .with_param("year", year)
        .render(&mut ctx, &mut doc, &registry);

    log::debug!(
        "{} rendered in {} ({} bindings)",
        req.path(),
        report.language,
        report.applied()
    );

    let mut response = HttpResponse::Ok();
    response
        .content_type("text/html; charset=utf-8")
        .insert_header(("Content-Language", report.language.code()))
        .insert_header(("Vary", "Cookie"));
    ctx.store().apply(&mut response);
    Ok(response.body(doc.to_html()))
}
