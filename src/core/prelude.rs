// src/core/prelude.rs

// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};

// Standard library essentials
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

// i18n essentials
pub use crate::i18n::{Catalog, Language, TranslationError};
