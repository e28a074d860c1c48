//! Catalog of Bible documents on disk.
//!
//! Scans a directory tree for `*.ebf1.json` files and records each
//! translation's name, relative path and canon, without keeping the verse
//! text in memory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::bible::{BibleDocument, BibleKind};
use crate::constants::library::{BIBLE_FILE_SUFFIX, INDEX_FILE};
use crate::error::{Error, Result};

/// One Bible document found in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Translation name, or the file stem when the document has none.
    pub name: String,
    /// Path relative to the library root, `/`-separated.
    pub path: String,
    /// Canon, judged by book count.
    #[serde(rename = "type")]
    pub kind: BibleKind,
    /// Whether this is the library's default Bible.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

/// Just enough of a document to catalog it.
#[derive(Default, Deserialize)]
struct Summary {
    #[serde(default)]
    bible: SummaryBody,
}

#[derive(Default, Deserialize)]
struct SummaryBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    books: Vec<IgnoredAny>,
}

/// Bible documents available under a root directory.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    entries: Vec<LibraryEntry>,
}

impl Library {
    /// Scan `root` recursively.
    ///
    /// Entries are ordered by path and unique by name (first path wins).
    /// `default_path`, relative to `root`, marks the default entry. Files
    /// that cannot be read or parsed are logged and skipped.
    pub fn scan(root: &Path, default_path: Option<&str>) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Library(format!(
                "Library path does not exist or is not a directory: {}",
                root.display()
            )));
        }

        let start = Instant::now();
        let mut entries: Vec<LibraryEntry> = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(BIBLE_FILE_SUFFIX))
            })
            .filter_map(|e| match read_entry(root, e.path()) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping {}: {err}", e.path().display());
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        let mut seen = HashSet::new();
        entries.retain(|entry| seen.insert(entry.name.clone()));

        if let Some(default_path) = default_path {
            for entry in &mut entries {
                entry.default = entry.path == default_path;
            }
        }

        let count = entries.len();
        let elapsed = start.elapsed();
        tracing::info!("Indexed {count} Bibles under {} in {elapsed:?}", root.display());

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Directory the library was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All entries, ordered by path.
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// The entry marked default, else the first entry.
    pub fn default_entry(&self) -> Option<&LibraryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.default)
            .or_else(|| self.entries.first())
    }

    /// Entry by name or relative path, case-insensitive.
    pub fn find(&self, query: &str) -> Option<&LibraryEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == query || entry.path.to_lowercase() == query)
    }

    /// Load the full document behind an entry.
    pub fn load(&self, entry: &LibraryEntry) -> Result<BibleDocument> {
        BibleDocument::load(&self.root.join(&entry.path))
    }

    /// The catalog as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the catalog to `index.json` in the library root.
    pub fn write_index(&self) -> Result<PathBuf> {
        let path = self.root.join(INDEX_FILE);
        let mut json = self.to_json()?;
        json.push('\n');
        fs_err::write(&path, json).map_err(|e| Error::io(e, path.clone()))?;
        tracing::info!("Wrote {} entries to {}", self.entries.len(), path.display());
        Ok(path)
    }
}

fn read_entry(root: &Path, path: &Path) -> Result<LibraryEntry> {
    let content = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let summary: Summary =
        serde_json::from_str(&content).map_err(|e| Error::json(e, path.to_path_buf()))?;

    let relative: Vec<String> = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let relative = relative.join("/");

    let name = summary
        .bible
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().trim_end_matches(BIBLE_FILE_SUFFIX).to_string())
                .unwrap_or_default()
        });

    Ok(LibraryEntry {
        name,
        path: relative,
        kind: BibleKind::from_book_count(summary.bible.books.len()),
        default: false,
    })
}
