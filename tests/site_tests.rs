// tests/site_tests.rs
use portfolio_i18n::render::site::{build_site, check_site, render_page};
use portfolio_i18n::{Catalog, Language};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const INDEX: &str = r#"<!DOCTYPE html><html lang="vi"><head><title>Anh Thuyết</title></head>
<body><a data-i18n="nav.about">Giới thiệu</a><small data-i18n-html="footer.rights_html"></small></body></html>"#;

const BROKEN: &str = r#"<html><body data-case="atlantis"><p data-i18n="not.a.key">x</p></body></html>"#;

async fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(path, content).await.unwrap();
}

#[test]
fn render_page_substitutes_year() {
    let catalog = Arc::new(Catalog::embedded().unwrap());
    let (html, missing) = render_page(catalog, INDEX, Language::En, "2031");
    assert!(html.contains(">About</a>"));
    assert!(html.contains("© 2031"));
    assert!(html.contains("lang=\"en\""));
    assert!(missing.is_empty());
}

#[tokio::test]
async fn build_writes_one_tree_per_language() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(site.path(), "index.html", INDEX).await;
    write(site.path(), "cases/sun.html", INDEX).await;
    write(site.path(), "assets/css/style.css", "body{}").await;

    let catalog = Arc::new(Catalog::embedded().unwrap());
    let report = build_site(catalog, site.path(), out.path(), &Language::ALL, "2031")
        .await
        .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.assets, 1);
    assert!(report.missing.is_empty());

    let en = tokio::fs::read_to_string(out.path().join("en/index.html")).await.unwrap();
    assert!(en.contains(">About</a>"));
    let vi = tokio::fs::read_to_string(out.path().join("vi/cases/sun.html")).await.unwrap();
    assert!(vi.contains("Giới thiệu"));
    assert!(out.path().join("en/assets/css/style.css").exists());
    assert!(out.path().join("vi/assets/css/style.css").exists());
}

#[tokio::test]
async fn build_rejects_missing_site_dir() {
    let out = TempDir::new().unwrap();
    let catalog = Arc::new(Catalog::embedded().unwrap());
    let result = build_site(
        catalog,
        &out.path().join("nope"),
        out.path(),
        &[Language::En],
        "2031",
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn check_reports_unknown_keys_and_cases() {
    let site = TempDir::new().unwrap();
    write(site.path(), "index.html", INDEX).await;
    write(site.path(), "broken.html", BROKEN).await;

    let catalog = Catalog::embedded().unwrap();
    let problems = check_site(&catalog, site.path()).await.unwrap();

    assert_eq!(problems.len(), 1);
    let (page, keys) = &problems[0];
    assert_eq!(page, Path::new("broken.html"));
    assert!(keys.contains(&"not.a.key".to_string()));
    assert!(keys.contains(&"case:atlantis".to_string()));
}
