//! Host-facing translation capability for message-emitting call sites.
//!
//! Plugins compose [`Localize`] into the types that talk to players.
//! Implementors supply access to a [`TranslationStore`], a delivery
//! channel, and a recipient-locale probe; the provided methods cover the
//! common translate-and-send paths.

use std::sync::Arc;

use crate::store::{LocaleCode, TranslationStore};

/// Capability to translate keys and deliver the result to recipients.
///
/// `recipient_locale` is an explicit capability probe: it returns `None`
/// when the running host cannot report a locale preference (older host
/// API) or the recipient has none. [`translate_to`](Self::translate_to)
/// treats that as a recoverable condition and falls back to the store's
/// default locale, never an error.
pub trait Localize {
    /// The host's recipient handle (e.g., a player).
    type Recipient;

    /// The translation store used by this call site.
    fn translations(&self) -> Arc<TranslationStore>;

    /// Deliver a resolved string to a recipient.
    fn deliver(&self, recipient: &Self::Recipient, text: &str);

    /// Probe the recipient's preferred locale, if the host exposes one.
    fn recipient_locale(&self, recipient: &Self::Recipient) -> Option<LocaleCode>;

    /// Translate `key` in the store's default locale.
    fn translate(&self, key: &str) -> String {
        self.translations().resolve(None, key)
    }

    /// Translate `key` in an explicit locale.
    fn translate_in(&self, locale: &str, key: &str) -> String {
        self.translations().resolve(Some(locale), key)
    }

    /// Translate `key` for a recipient's preferred locale and deliver it.
    ///
    /// Falls back to the default locale when no preference is available.
    fn translate_to(&self, recipient: &Self::Recipient, key: &str) {
        let locale = self.recipient_locale(recipient);
        let text = self.translations().resolve(locale.as_deref(), key);
        self.deliver(recipient, &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TranslationTable;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Player {
        name: &'static str,
        locale: Option<&'static str>,
    }

    /// Test host: records deliveries, honors per-player locales when
    /// `locale_api` is on (simulating a host without the accessor when
    /// off).
    struct TestHost {
        store: Arc<TranslationStore>,
        locale_api: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl TestHost {
        fn new(locale_api: bool) -> Self {
            let mut en = TranslationTable::new();
            en.insert("greeting", "Hello");

            let mut fr = TranslationTable::new();
            fr.insert("greeting", "Bonjour");

            let mut tables = HashMap::new();
            tables.insert("en_US".to_string(), en);
            tables.insert("fr_FR".to_string(), fr);
            Self {
                store: Arc::new(TranslationStore::with_tables("en_US", tables)),
                locale_api,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Localize for TestHost {
        type Recipient = Player;

        fn translations(&self) -> Arc<TranslationStore> {
            Arc::clone(&self.store)
        }

        fn deliver(&self, recipient: &Player, text: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((recipient.name.to_string(), text.to_string()));
        }

        fn recipient_locale(&self, recipient: &Player) -> Option<LocaleCode> {
            if self.locale_api {
                recipient.locale.map(String::from)
            } else {
                None
            }
        }
    }

    #[test]
    fn translate_uses_default_locale() {
        let host = TestHost::new(true);
        assert_eq!(host.translate("greeting"), "Hello");
        assert_eq!(host.translate("farewell"), "farewell");
    }

    #[test]
    fn translate_in_uses_explicit_locale() {
        let host = TestHost::new(true);
        assert_eq!(host.translate_in("fr_FR", "greeting"), "Bonjour");
        assert_eq!(host.translate_in("de_DE", "greeting"), "greeting");
    }

    #[test]
    fn translate_to_honors_recipient_preference() {
        let host = TestHost::new(true);
        let pierre = Player {
            name: "Pierre",
            locale: Some("fr_FR"),
        };
        host.translate_to(&pierre, "greeting");
        assert_eq!(host.sent(), vec![("Pierre".to_string(), "Bonjour".to_string())]);
    }

    #[test]
    fn translate_to_falls_back_without_locale_api() {
        // Host cannot report locales at all: default-locale path is used.
        let host = TestHost::new(false);
        let pierre = Player {
            name: "Pierre",
            locale: Some("fr_FR"),
        };
        host.translate_to(&pierre, "greeting");
        assert_eq!(host.sent(), vec![("Pierre".to_string(), "Hello".to_string())]);
    }

    #[test]
    fn translate_to_falls_back_without_preference() {
        let host = TestHost::new(true);
        let anon = Player {
            name: "anon",
            locale: None,
        };
        host.translate_to(&anon, "greeting");
        assert_eq!(host.sent(), vec![("anon".to_string(), "Hello".to_string())]);
    }

    #[test]
    fn translate_to_unknown_locale_delivers_key() {
        let host = TestHost::new(true);
        let klaus = Player {
            name: "Klaus",
            locale: Some("de_DE"),
        };
        host.translate_to(&klaus, "greeting");
        assert_eq!(host.sent(), vec![("Klaus".to_string(), "greeting".to_string())]);
    }
}
