// src/main.rs
use chrono::Datelike;
use clap::{Parser, Subcommand};
use portfolio_i18n::core::prelude::*;
use portfolio_i18n::lang::{LanguageContext, SettingsFile};
use portfolio_i18n::render::{site, BindingRegistry, Document, Renderer};
use portfolio_i18n::Resolver;
use std::io::Write;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Bilingual portfolio renderer and site server",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: .folio/folio.toml next to the binary)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site with per-request rendering
    Serve {
        #[arg(long)]
        port: Option<u16>,

        #[arg(long)]
        site: Option<PathBuf>,
    },

    /// Render one page to stdout
    Render {
        file: PathBuf,

        /// Language code; the choice is remembered for the next run
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Pre-render every page into <out>/<lang>/
    Build {
        site: PathBuf,
        out: PathBuf,

        /// Only these languages (default: all)
        #[arg(short, long)]
        lang: Vec<String>,
    },

    /// Report binding keys and case ids the catalog does not know
    Check { site: PathBuf },

    /// Resolve one key with fallback
    Lookup {
        key: String,

        #[arg(short, long)]
        lang: Option<String>,

        /// Placeholder value, e.g. --param email=hi@example.com
        #[arg(short, long, value_parser = parse_param)]
        param: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::load_with_messages(false).await?,
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Serve { port, site } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(site) = site {
                config.server.site_dir = site;
            }
            portfolio_i18n::run_server(config).await
        }
        Commands::Render { file, lang } => render(&config, &file, lang.as_deref()).await,
        Commands::Build { site, out, lang } => build(&config, &site, &out, &lang).await,
        Commands::Check { site } => check(&config, &site).await,
        Commands::Lookup { key, lang, param } => lookup(&config, &key, lang.as_deref(), &param).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone())
    };

    env_logger::Builder::new()
        .parse_filters(&level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

async fn render(config: &Config, file: &Path, lang: Option<&str>) -> Result<()> {
    let catalog = Arc::new(Catalog::load(config).await?);
    let settings = SettingsFile::load(config.resolve_path(&config.settings_file)).await?;
    let mut ctx = LanguageContext::restore(catalog, settings);
    if let Some(code) = lang {
        ctx.select_code(code)?;
    }

    let source = tokio::fs::read_to_string(file).await?;
    let mut doc = Document::parse(&source);
    let registry = BindingRegistry::scan(&doc);
    let year = chrono::Local::now().year().to_string();
    let report = Renderer::new()
        .with_param("year", year)
        .render(&mut ctx, &mut doc, &registry);

    ctx.store_mut().save().await?;
    log::info!(
        "{}: {} bindings applied in {}",
        file.display(),
        report.applied(),
        report.language
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(doc.to_html().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

async fn build(config: &Config, site_dir: &Path, out: &Path, codes: &[String]) -> Result<()> {
    let catalog = Arc::new(Catalog::load(config).await?);
    let languages = if codes.is_empty() {
        Language::ALL.to_vec()
    } else {
        codes
            .iter()
            .map(|c| c.parse::<Language>().map_err(AppError::from))
            .collect::<Result<Vec<_>>>()?
    };

    let year = chrono::Local::now().year().to_string();
    let report = site::build_site(catalog, site_dir, out, &languages, &year).await?;
    for (page, keys) in &report.missing {
        log::warn!("{}: missing {}", page.display(), keys.join(", "));
    }
    println!(
        "{} pages, {} assets -> {}",
        report.pages,
        report.assets,
        out.display()
    );
    Ok(())
}

async fn check(config: &Config, site_dir: &Path) -> Result<()> {
    let catalog = Catalog::load(config).await?;

    for lang in Language::ALL {
        let missing = catalog.missing_in(lang);
        if !missing.is_empty() {
            println!("{} falls back for {} keys", lang, missing.len());
        }
    }

    let problems = site::check_site(&catalog, site_dir).await?;
    if problems.is_empty() {
        println!("All bindings resolve");
        return Ok(());
    }
    for (page, keys) in &problems {
        println!("{}: {}", page.display(), keys.join(", "));
    }
    Err(AppError::Validation(format!(
        "{} pages reference unknown keys",
        problems.len()
    )))
}

async fn lookup(
    config: &Config,
    key: &str,
    lang: Option<&str>,
    params: &[(String, String)],
) -> Result<()> {
    let catalog = Arc::new(Catalog::load(config).await?);
    let lang = match lang {
        Some(code) => code.parse()?,
        None => catalog.default_language(),
    };

    let mut resolver = Resolver::new(catalog);
    let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    println!("{}", resolver.resolve_with(lang, key, &params));
    Ok(())
}
