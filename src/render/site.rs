// =====================================================
// FILE: src/render/site.rs - PRE-RENDER + KEY CHECK FOR A SITE DIRECTORY
// =====================================================

use crate::core::prelude::*;
use crate::lang::{LanguageContext, MemoryStore};
use crate::render::binding::BindingRegistry;
use crate::render::dom::Document;
use crate::render::renderer::Renderer;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
    pub missing: Vec<(PathBuf, Vec<String>)>,
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

fn site_files(site_dir: &Path) -> Result<Vec<PathBuf>> {
    if !site_dir.is_dir() {
        return Err(AppError::Validation(format!(
            "Site directory not found: {}",
            site_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(site_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::Io(std::io::Error::other(e.to_string())))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Renders one page in `lang`. Returns the HTML and keys missing everywhere.
pub fn render_page(
    catalog: Arc<Catalog>,
    source: &str,
    lang: Language,
    year: &str,
) -> (String, Vec<String>) {
    let mut doc = Document::parse(source);
    let registry = BindingRegistry::scan(&doc);
    let mut ctx = LanguageContext::with_language(catalog, MemoryStore::new(), lang);
    let report = Renderer::new()
        .with_param("year", year)
        .render(&mut ctx, &mut doc, &registry);
    (doc.to_html(), report.missing)
}

/// Writes `<out>/<lang>/<relative path>` for every page and language;
/// non-HTML files are copied next to each language's pages.
pub async fn build_site(
    catalog: Arc<Catalog>,
    site_dir: &Path,
    out_dir: &Path,
    languages: &[Language],
    year: &str,
) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    for path in site_files(site_dir)? {
        let relative = path
            .strip_prefix(site_dir)
            .map_err(|e| AppError::Render(e.to_string()))?;

        if is_html(&path) {
            let source = tokio::fs::read_to_string(&path).await?;
            for &lang in languages {
                let (html, missing) = render_page(catalog.clone(), &source, lang, year);
                let target = out_dir.join(lang.code()).join(relative);
                write_file(&target, html.as_bytes()).await?;
                if !missing.is_empty() {
                    report.missing.push((relative.to_path_buf(), missing));
                }
            }
            report.pages += 1;
        } else {
            let data = tokio::fs::read(&path).await?;
            for &lang in languages {
                write_file(&out_dir.join(lang.code()).join(relative), &data).await?;
            }
            report.assets += 1;
        }
    }

    log::info!(
        "Built {} pages and {} assets into {}",
        report.pages,
        report.assets,
        out_dir.display()
    );
    Ok(report)
}

/// Pages whose bindings reference keys absent from the default table.
pub async fn check_site(catalog: &Catalog, site_dir: &Path) -> Result<Vec<(PathBuf, Vec<String>)>> {
    let mut problems = Vec::new();
    for path in site_files(site_dir)?.into_iter().filter(|p| is_html(p)) {
        let source = tokio::fs::read_to_string(&path).await?;
        let doc = Document::parse(&source);
        let registry = BindingRegistry::scan(&doc);

        let mut missing = registry.missing_keys(catalog);
        if let Some(case_id) = registry.case_id() {
            if !catalog.cases().contains(case_id) {
                missing.push(format!("case:{}", case_id));
            }
        }
        if !missing.is_empty() {
            let relative = path.strip_prefix(site_dir).unwrap_or(&path).to_path_buf();
            problems.push((relative, missing));
        }
    }
    Ok(problems)
}

async fn write_file(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(target, data).await?;
    Ok(())
}
