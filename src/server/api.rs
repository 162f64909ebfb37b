// src/server/api.rs - JSON ENDPOINTS
use super::cookies::CookieStore;
use super::types::{LangQuery, SiteState};
use crate::contact::{ContactForm, StatusKind};
use crate::core::constants::VERSION;
use crate::core::prelude::*;
use crate::lang::LanguageContext;
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

/// Complete table for one language, default-language entries filling the gaps.
pub async fn translations(
    path: web::Path<String>,
    data: web::Data<SiteState>,
) -> ActixResult<HttpResponse> {
    let code = path.into_inner();
    match code.parse::<Language>() {
        Ok(lang) => Ok(HttpResponse::Ok()
            .insert_header(("Cache-Control", "public, max-age=300"))
            .json(data.catalog.complete_table(lang))),
        Err(e) => Ok(HttpResponse::NotFound().json(json!({ "error": e.to_string() }))),
    }
}

pub async fn languages(data: web::Data<SiteState>) -> ActixResult<HttpResponse> {
    let list: Vec<_> = crate::i18n::available_languages()
        .into_iter()
        .map(|lang| json!({ "code": lang.code(), "name": lang.native_name() }))
        .collect();
    Ok(HttpResponse::Ok().json(json!({
        "default": data.catalog.default_language().code(),
        "languages": list,
    })))
}

pub async fn submit_contact(
    req: HttpRequest,
    data: web::Data<SiteState>,
    query: web::Query<LangQuery>,
    form: web::Form<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let mut ctx = LanguageContext::restore(data.catalog.clone(), CookieStore::from_request(&req));
    if let Some(code) = query.lang.as_deref() {
        if let Err(e) = ctx.select_code(code) {
            log::debug!("Ignoring ?lang: {}", e);
        }
    }
    let lang = ctx.active();

    let mut contact = ContactForm::new(data.contact.endpoint.clone())
        .with_contact_email(data.contact.email.clone())
        .with_fields(form.into_inner());

    let code = if let Err(e) = contact.validate() {
        log::info!("Contact form rejected: {}", e);
        contact.reject(ctx.resolver(), lang);
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        let status = contact.submit(&*data.relay, ctx.resolver(), lang).await;
        match status.kind {
            StatusKind::Sent => StatusCode::OK,
            _ => StatusCode::BAD_GATEWAY,
        }
    };

    Ok(HttpResponse::build(code).json(json!({
        "status": contact.status(),
        "fields": contact.fields(),
        "submitting": contact.is_submitting(),
    })))
}

pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "portfolio-i18n",
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
