//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to the candidate-verse JSON library
    pub verses_path: Option<PathBuf>,
    /// Path to a directory of lesson .txt files for batch annotation
    pub lessons_path: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            verses_path: None,
            lessons_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Verses path: env var override, or default <data dir>/versemark/verses.json
        config.verses_path = env::var("VERSEMARK_VERSES_PATH").ok().map_or_else(
            || {
                dirs::data_dir()
                    .map(|d| d.join("versemark/verses.json"))
                    .filter(|p| p.is_file())
            },
            |path| {
                let p = PathBuf::from(shellexpand::tilde(&path).to_string());
                p.is_file().then_some(p)
            },
        );

        // Lessons directory for batch mode
        config.lessons_path = env::var("VERSEMARK_LESSONS_PATH").ok().and_then(|path| {
            let p = PathBuf::from(shellexpand::tilde(&path).to_string());
            p.is_dir().then_some(p)
        });

        Ok(config)
    }

    /// Check if a verse library is configured
    pub const fn has_verse_library(&self) -> bool {
        self.verses_path.is_some()
    }
}
