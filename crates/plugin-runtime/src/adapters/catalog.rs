//! In-memory translation catalog.

use std::collections::HashMap;

use pb_02_identity_bootstrap::{Localizer, Message};

/// Translations keyed by locale, then message ID.
///
/// Lookup tries the exact locale, then its base language (`de` for
/// `de-AT`), then the message's default text.
#[derive(Debug, Clone, Default)]
pub struct CatalogLocalizer {
    entries: HashMap<String, HashMap<String, String>>,
}

impl CatalogLocalizer {
    /// Create an empty catalog; every lookup yields the default text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one translation.
    pub fn with_translation(
        mut self,
        locale: impl Into<String>,
        message_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(locale, message_id, text);
        self
    }

    /// Add or replace one translation.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        message_id: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .entry(locale.into())
            .or_default()
            .insert(message_id.into(), text.into());
    }

    fn lookup(&self, locale: &str, message_id: &str) -> Option<&str> {
        self.entries
            .get(locale)
            .and_then(|messages| messages.get(message_id))
            .map(String::as_str)
    }
}

impl Localizer for CatalogLocalizer {
    fn localize(&self, locale: &str, message: &Message) -> String {
        let base = locale.split(|c: char| c == '-' || c == '_').next().unwrap_or(locale);
        self.lookup(locale, message.id)
            .or_else(|| self.lookup(base, message.id))
            .unwrap_or(message.default)
            .to_string()
    }
}
