#![forbid(unsafe_code)]

//! Translation lookup for Hearth plugins.
//!
//! Provides per-locale string tables loaded from a directory of JSON
//! files, a process-wide shared store, and a host-facing capability
//! trait for addressing translated messages to recipients.
//!
//! Lookups never fail: a missing locale or missing key resolves to the
//! key itself, so the worst case a player ever sees is an untranslated
//! key string.

pub mod localize;
pub mod registry;
pub mod store;

pub use localize::Localize;
pub use registry::{DEFAULT_LANG_DIR, TranslationRegistry};
pub use store::{
    CoverageReport, LoadError, LocaleCode, LocaleCoverage, TranslationStore, TranslationTable,
};
