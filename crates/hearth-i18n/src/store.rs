//! Translation tables loaded from a directory of per-locale JSON files.
//!
//! # Invariants
//!
//! 1. **Lookups are total**: `resolve()` returns a string for every
//!    (locale, key) input; a miss at either tier yields the key itself.
//!
//! 2. **Tables are immutable after construction**: only the default
//!    locale is mutable, so concurrent reads need no locking.
//!
//! 3. **Loading happens exactly once**, synchronously, at construction.
//!    There is no lazy per-key loading and no reload.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing directory | Path absent/unreadable | Empty store, logged |
//! | Malformed file | Bad JSON or non-flat shape | Locale skipped, logged |
//! | Missing locale | No table for the code | `resolve` returns the key |
//! | Missing key | Key not in the table | `resolve` returns the key |

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

/// Locale identifier (e.g., `"en_US"`, `"fr_FR"`).
///
/// Codes are opaque: no normalization is applied, so `en_US` and `en-US`
/// are distinct. Unknown codes are a normal condition handled by fallback.
pub type LocaleCode = String;

/// File extension recognized by the loader. Other entries are ignored.
pub const TRANSLATION_FILE_EXT: &str = "json";

/// Errors from loading translation files.
///
/// Never propagated out of [`TranslationStore::load`]; surfaced through
/// warn-level log lines only. Public so hosts driving
/// [`load_locale_file`] directly can match on the cause.
#[derive(Debug)]
pub enum LoadError {
    /// The translation directory could not be opened.
    DirUnavailable { path: PathBuf, source: io::Error },
    /// A translation file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// A translation file did not decode to a flat string map.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirUnavailable { path, source } => {
                write!(
                    f,
                    "translation directory '{}' unavailable: {source}",
                    path.display()
                )
            }
            Self::Read { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "cannot decode '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirUnavailable { source, .. } | Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Translated strings for a single locale.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a translation.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a translation by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all keys in this table.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl From<HashMap<String, String>> for TranslationTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

/// Per-locale translation tables with two-tier key fallback.
///
/// Built once from a directory where each `<LocaleCode>.json` file holds
/// a flat string-to-string map. Lookups fall back to the literal key on
/// a locale miss or a key miss; there is no cross-locale fallback chain.
///
/// # Example
///
/// ```no_run
/// use hearth_i18n::TranslationStore;
///
/// let store = TranslationStore::load("en_US", "plugins/my-plugin/lang");
/// assert_eq!(store.resolve(Some("de_DE"), "greeting"), "greeting");
/// ```
#[derive(Debug)]
pub struct TranslationStore {
    tables: HashMap<LocaleCode, TranslationTable>,
    default_locale: RwLock<LocaleCode>,
    source_dir: PathBuf,
}

impl TranslationStore {
    /// Load every translation file directly inside `source_dir`.
    ///
    /// Non-recursive. A missing or unreadable directory yields a store
    /// with no tables (every lookup then returns the key unchanged); a
    /// file that fails to decode skips that locale only. Both cases are
    /// logged at warn level, never raised.
    pub fn load(default_locale: impl Into<LocaleCode>, source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let tables = load_tables(&source_dir);
        debug!(
            dir = %source_dir.display(),
            locales = tables.len(),
            "translation store loaded"
        );
        Self {
            tables,
            default_locale: RwLock::new(default_locale.into()),
            source_dir,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_tables(
        default_locale: impl Into<LocaleCode>,
        tables: HashMap<LocaleCode, TranslationTable>,
    ) -> Self {
        Self {
            tables,
            default_locale: RwLock::new(default_locale.into()),
            source_dir: PathBuf::new(),
        }
    }

    /// Look up a key in the given locale's table, without fallback.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables.get(locale).and_then(|t| t.get(key))
    }

    /// Resolve a (locale, key) pair to a display string.
    ///
    /// An omitted locale substitutes the current default. A locale with
    /// no table, or a table with no entry for `key`, resolves to `key`
    /// unchanged. Total over its inputs: never fails.
    #[must_use]
    pub fn resolve(&self, locale: Option<&str>, key: &str) -> String {
        let default;
        let locale = match locale {
            Some(code) => code,
            None => {
                default = self.default_locale();
                default.as_str()
            }
        };
        match self.get(locale, key) {
            Some(value) => value.to_string(),
            None => key.to_string(),
        }
    }

    /// The locale used when `resolve` is called without one.
    #[must_use]
    pub fn default_locale(&self) -> LocaleCode {
        // Recover from poisoning: lookups stay total even if a writer
        // panicked mid-update.
        self.default_locale
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the default locale for subsequent omitted-locale lookups.
    ///
    /// Plain last-write-wins; in-flight lookups may observe either value.
    /// Does not reload any tables.
    pub fn set_default_locale(&self, locale: impl Into<LocaleCode>) {
        *self
            .default_locale
            .write()
            .unwrap_or_else(|e| e.into_inner()) = locale.into();
    }

    /// All loaded locale codes.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// The table for a locale, if one was loaded.
    #[must_use]
    pub fn table(&self, locale: &str) -> Option<&TranslationTable> {
        self.tables.get(locale)
    }

    /// The directory this store was built from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Whether no locales were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    // -----------------------------------------------------------------
    // Coverage
    // -----------------------------------------------------------------

    /// Collect all unique keys across every loaded locale.
    ///
    /// The result is sorted for deterministic output.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .tables
            .values()
            .flat_map(|t| t.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Find keys from `reference_keys` that `locale`'s table does not
    /// define.
    ///
    /// Uses the store's own lookup, so a key missing from a loaded
    /// locale counts as missing even when another locale defines it.
    /// Returns the missing keys sorted alphabetically.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .map(|key| key.to_string())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Generate a coverage report across all loaded locales.
    ///
    /// Uses `all_keys()` as the reference set. Intended for
    /// translation-completeness audits in plugin CI.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all = self.all_keys();
        let ref_keys: Vec<&str> = all.iter().map(String::as_str).collect();
        let total = ref_keys.len();

        let mut locale_tags: Vec<String> = self.tables.keys().cloned().collect();
        locale_tags.sort_unstable();

        let locales = locale_tags
            .into_iter()
            .map(|tag| {
                let missing = self.missing_keys(&tag, &ref_keys);
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale: tag,
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

/// Coverage report for a translation store.
///
/// Shows how many keys each locale covers relative to the full key set
/// and lists the specific missing keys.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Total number of unique keys across all locales.
    pub total_keys: usize,
    /// Per-locale coverage data, sorted by locale tag.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone)]
pub struct LocaleCoverage {
    /// Locale tag (e.g., `"en_US"`).
    pub locale: String,
    /// Number of reference keys the locale defines.
    pub present: usize,
    /// Reference keys the locale does not define.
    pub missing: Vec<String>,
    /// Coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

/// Decode a single translation file into a table.
///
/// The file must hold a flat JSON object mapping string keys to string
/// values; anything else is a [`LoadError::Decode`].
pub fn load_locale_file(path: &Path) -> Result<TranslationTable, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: HashMap<String, String> =
        serde_json::from_str(&raw).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(entries.into())
}

fn load_tables(dir: &Path) -> HashMap<LocaleCode, TranslationTable> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            let err = LoadError::DirUnavailable {
                path: dir.to_path_buf(),
                source,
            };
            warn!(error = %err, "starting with empty translation tables");
            return HashMap::new();
        }
    };

    let mut tables = HashMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(TRANSLATION_FILE_EXT)
        {
            continue;
        }
        // An empty stem would produce an empty locale code.
        let Some(locale) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
        else {
            warn!(path = %path.display(), "skipping translation file without a usable locale stem");
            continue;
        };
        match load_locale_file(&path) {
            Ok(table) => {
                debug!(locale, entries = table.len(), "loaded translation table");
                tables.insert(locale.to_string(), table);
            }
            Err(err) => warn!(error = %err, "skipping translation file"),
        }
    }
    tables
}
