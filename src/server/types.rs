// src/server/types.rs
use crate::contact::FormRelay;
use crate::core::config::ContactConfig;
use crate::core::prelude::*;
use serde::Deserialize;

/// Shared, read-only state for every worker.
#[derive(Clone)]
pub struct SiteState {
    pub catalog: Arc<Catalog>,
    pub site_dir: PathBuf,
    pub relay: Arc<dyn FormRelay>,
    pub contact: ContactConfig,
}

impl SiteState {
    pub fn new(
        catalog: Arc<Catalog>,
        site_dir: PathBuf,
        relay: Arc<dyn FormRelay>,
        contact: ContactConfig,
    ) -> Self {
        Self {
            catalog,
            site_dir,
            relay,
            contact,
        }
    }
}

/// `?lang=en` on any page is an explicit language selection.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}
