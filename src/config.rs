//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::bible::DisplayOptions;
use crate::constants::library::DATA_DIR_NAME;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Bible document to load directly
    pub bible_path: Option<PathBuf>,
    /// Directory scanned for `*.ebf1.json` documents
    pub library_path: Option<PathBuf>,
    /// Library-relative path of the default Bible
    pub default_bible: Option<String>,
    /// Display options applied to every lookup
    pub display: DisplayOptions,
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
            bible_path: None,
            library_path: None,
            default_bible: None,
            display: DisplayOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("BIBLEREF_BIBLE") {
            let path = expand_path(&path);
            if !path.is_file() {
                return Err(Error::config(
                    format!("BIBLEREF_BIBLE points to {}, which is not a file", path.display()),
                    "Set BIBLEREF_BIBLE to an .ebf1.json Bible document or unset it",
                ));
            }
            config.bible_path = Some(path);
        }

        // Library path: env var override, or the platform data dir if it exists
        config.library_path = env::var("BIBLEREF_LIBRARY").ok().map_or_else(
            || {
                dirs::data_dir()
                    .map(|d| d.join(DATA_DIR_NAME))
                    .filter(|p| p.is_dir())
            },
            |path| {
                let p = expand_path(&path);
                p.is_dir().then_some(p)
            },
        );

        config.default_bible = env::var("BIBLEREF_DEFAULT").ok().filter(|s| !s.trim().is_empty());

        apply_flag("BIBLEREF_QUOTES", &mut config.display.quotes);
        apply_flag("BIBLEREF_VERSE_NUMBERS", &mut config.display.verse_numbers);
        apply_flag("BIBLEREF_LINE_BREAKS", &mut config.display.line_breaks);
        apply_flag("BIBLEREF_ELLIPSIS", &mut config.display.ellipsis);
        apply_flag("BIBLEREF_CITATION", &mut config.display.parentheses_citation);
        apply_flag("BIBLEREF_TITLES", &mut config.display.section_titles);

        Ok(config)
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

fn apply_flag(var: &str, target: &mut bool) {
    if let Some(value) = env::var(var).ok().as_deref().and_then(parse_flag) {
        *target = value;
    } else if env::var_os(var).is_some() {
        tracing::warn!("Ignoring {var}: expected one of 1/0, true/false, yes/no, on/off");
    }
}

/// Parse a boolean environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn defaults_match_front_end() {
        let config = Config::default();
        assert!(config.display.quotes);
        assert!(config.display.ellipsis);
        assert!(!config.display.verse_numbers);
        assert!(config.bible_path.is_none());
        assert_eq!(config.app_name(), "bibleref");
    }
}
