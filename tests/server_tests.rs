// tests/server_tests.rs
use actix_web::{test, web, App};
use portfolio_i18n::contact::relay::RelayFuture;
use portfolio_i18n::contact::FormRelay;
use portfolio_i18n::core::config::ContactConfig;
use portfolio_i18n::server::{configure, SiteState};
use portfolio_i18n::Catalog;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

const INDEX: &str = r#"<!DOCTYPE html><html lang="vi"><head><title>Anh Thuyết</title></head>
<body><a id="about" data-i18n="nav.about">Giới thiệu</a></body></html>"#;

struct FixedRelay(u16);

impl FormRelay for FixedRelay {
    fn post<'a>(&'a self, _endpoint: &'a str, _fields: &'a [(String, String)]) -> RelayFuture<'a> {
        let status = self.0;
        Box::pin(async move { Ok(status) })
    }
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
    std::fs::write(dir.path().join("about.html"), INDEX).unwrap();
    std::fs::write(dir.path().join("old.htm"), INDEX).unwrap();
    std::fs::write(dir.path().join("du an.html"), INDEX).unwrap();
    std::fs::write(dir.path().join("dự-án.html"), INDEX).unwrap();
    std::fs::write(dir.path().join("style.css"), "body{}").unwrap();
    dir
}

fn state(dir: &TempDir, relay_status: u16) -> web::Data<SiteState> {
    web::Data::new(SiteState::new(
        Arc::new(Catalog::embedded().unwrap()),
        dir.path().to_path_buf(),
        Arc::new(FixedRelay(relay_status)),
        ContactConfig {
            endpoint: "https://formspree.io/f/test".into(),
            email: "hello@anhthuyet.design".into(),
        },
    ))
}

macro_rules! app {
    ($dir:expr, $relay:expr) => {{
        let data = state(&$dir, $relay);
        let root = $dir.path().to_path_buf();
        test::init_service(App::new().app_data(data).configure(move |cfg| configure(cfg, &root))).await
    }};
}

#[actix_web::test]
async fn index_renders_in_default_language() {
    let dir = site();
    let app = app!(dir, 200);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("content-language").unwrap().to_str().unwrap(),
        "vi"
    );
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Giới thiệu"));
    assert!(body.contains("lang=\"vi\""));
}

#[actix_web::test]
async fn lang_query_switches_and_sets_cookie() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get().uri("/about.html?lang=en").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "lang")
        .expect("lang cookie");
    assert_eq!(cookie.value(), "en");

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(">About</a>"));
}

#[actix_web::test]
async fn lang_cookie_is_restored() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(actix_web::cookie::Cookie::new("lang", "en"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    // unchanged preference, nothing to set
    assert!(resp.response().cookies().next().is_none());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(">About</a>"));
}

#[actix_web::test]
async fn missing_page_and_traversal_are_404() {
    let dir = site();
    let app = app!(dir, 200);

    for uri in ["/nope.html", "/../secret.html"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status().as_u16(), 404, "{}", uri);
    }
}

#[actix_web::test]
async fn static_assets_are_served() {
    let dir = site();
    let app = app!(dir, 200);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/style.css").to_request()).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn translation_table_endpoint() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get().uri("/i18n/en.json").to_request();
    let table: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(table["nav.about"], "About");
    // filled from the default language
    assert!(table["contact.zalo"].is_string());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/i18n/fr.json").to_request()).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn contact_relay_failure_keeps_fields() {
    let dir = site();
    let app = app!(dir, 500);

    let req = test::TestRequest::post()
        .uri("/contact?lang=en")
        .set_form([
            ("name", "Lan"),
            ("email", "lan@example.com"),
            ("message", "Brochure"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 502);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"]["kind"], "error");
    assert!(body["status"]["message"]
        .as_str()
        .unwrap()
        .contains("hello@anhthuyet.design"));
    assert_eq!(body["fields"][0], serde_json::json!(["name", "Lan"]));
    assert_eq!(body["submitting"], false);
}

#[actix_web::test]
async fn contact_success_and_validation() {
    let dir = site();
    let app = app!(dir, 200);

    let ok = test::TestRequest::post()
        .uri("/contact")
        .set_form([
            ("name", "Lan"),
            ("email", "lan@example.com"),
            ("message", "Brochure"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, ok).await;
    assert_eq!(body["status"]["kind"], "sent");
    assert_eq!(body["fields"][0], serde_json::json!(["name", ""]));

    let invalid = test::TestRequest::post()
        .uri("/contact")
        .set_form([("name", "Lan")])
        .to_request();
    let resp = test::call_service(&app, invalid).await;
    assert_eq!(resp.status().as_u16(), 422);
}

#[actix_web::test]
async fn health_reports_version() {
    let dir = site();
    let app = app!(dir, 200);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn region_tagged_lang_query_is_accepted() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get().uri("/?lang=en-US").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "lang")
        .expect("lang cookie");
    assert_eq!(cookie.value(), "en");
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(">About</a>"));
    assert!(body.contains("lang=\"en\""));
}

#[actix_web::test]
async fn percent_encoded_page_paths_are_rendered() {
    let dir = site();
    let app = app!(dir, 200);

    for uri in ["/du%20an.html?lang=en", "/d%E1%BB%B1-%C3%A1n.html?lang=en"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(resp.status().is_success(), "{}", uri);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(">About</a>"), "{}", uri);
    }
}

#[actix_web::test]
async fn htm_pages_and_head_requests_are_rendered() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get().uri("/old.htm?lang=en").to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(body.contains(">About</a>"));
    assert!(body.contains("lang=\"en\""));

    let head = test::TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/")
        .to_request();
    let resp = test::call_service(&app, head).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("content-language").unwrap().to_str().unwrap(),
        "vi"
    );
}

#[actix_web::test]
async fn unsupported_lang_query_is_ignored() {
    let dir = site();
    let app = app!(dir, 200);

    let req = test::TestRequest::get().uri("/?lang=xx").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "lang")
        .expect("lang cookie");
    assert_eq!(cookie.value(), "vi");
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Giới thiệu"));
}

#[actix_web::test]
async fn contact_ignores_unsupported_lang_query() {
    let dir = site();
    let app = app!(dir, 500);

    let mut messages = Vec::new();
    for uri in ["/contact?lang=xx", "/contact?lang=vi"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_form([
                ("name", "Lan"),
                ("email", "lan@example.com"),
                ("message", "Brochure"),
            ])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        messages.push(body["status"]["message"].as_str().unwrap().to_string());
    }
    assert_eq!(messages[0], messages[1]);
}
