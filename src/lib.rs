#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

// Module definitions
pub mod contact;
pub mod core;
pub mod i18n;
pub mod lang;
pub mod render;
pub mod server;
pub mod setup;

// Essential re-exports
pub use core::config::Config;
pub use core::error::{AppError, Result};
pub use i18n::{Catalog, Language, Resolver};
pub use lang::LanguageContext;
pub use render::{BindingRegistry, Document, Renderer};

pub async fn load_config() -> Result<Config> {
    Config::load().await
}

/// Loads the catalog the config points at and serves the site until shutdown.
pub async fn run_server(config: Config) -> Result<()> {
    let catalog = std::sync::Arc::new(Catalog::load(&config).await?);
    server::run(&config, catalog).await
}
