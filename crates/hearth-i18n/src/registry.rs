//! Process-wide shared translation store.
//!
//! The registry holds at most one live [`TranslationStore`], keyed by the
//! directory it was built from. Construction happens while holding the
//! slot lock, so concurrent callers observe either the previous
//! fully-built store or the new one, never a partially-initialized
//! instance, and never race to build duplicates.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::info;

use crate::store::{LocaleCode, TranslationStore};

/// Default translation directory when the host does not name one.
pub const DEFAULT_LANG_DIR: &str = "/lang";

/// Lazily-initialized holder for the shared [`TranslationStore`].
///
/// Most hosts use the process-wide instance via [`TranslationRegistry::global`];
/// tests construct their own registries to avoid cross-test interference.
///
/// The cache key is the source directory alone: a request naming a
/// different directory rebuilds the store, while a request with a
/// different default locale but the same directory returns the existing
/// store unchanged.
#[derive(Debug, Default)]
pub struct TranslationRegistry {
    slot: Mutex<Option<Arc<TranslationStore>>>,
}

impl TranslationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// The process-wide registry, alive for the process lifetime.
    #[must_use]
    pub fn global() -> &'static TranslationRegistry {
        static GLOBAL: OnceLock<TranslationRegistry> = OnceLock::new();
        GLOBAL.get_or_init(TranslationRegistry::new)
    }

    /// Return the shared store, building it on first use.
    ///
    /// Rebuilds (replacing the held instance) only when `source_dir`
    /// differs from the held store's directory by exact path comparison.
    /// `default_locale` is honored on (re)construction only; on a cache
    /// hit the existing store keeps its current default.
    pub fn shared(
        &self,
        default_locale: impl Into<LocaleCode>,
        source_dir: impl AsRef<Path>,
    ) -> Arc<TranslationStore> {
        let source_dir = source_dir.as_ref();
        let mut slot = self.slot.lock().expect("translation registry lock poisoned");

        if let Some(store) = slot.as_ref() {
            if store.source_dir() == source_dir {
                return Arc::clone(store);
            }
        }

        info!(
            dir = %source_dir.display(),
            rebuild = slot.is_some(),
            "building shared translation store"
        );
        let store = Arc::new(TranslationStore::load(
            default_locale,
            source_dir.to_path_buf(),
        ));
        *slot = Some(Arc::clone(&store));
        store
    }

    /// [`shared`](Self::shared) with the [`DEFAULT_LANG_DIR`] directory.
    pub fn shared_default(&self, default_locale: impl Into<LocaleCode>) -> Arc<TranslationStore> {
        self.shared(default_locale, DEFAULT_LANG_DIR)
    }
}
