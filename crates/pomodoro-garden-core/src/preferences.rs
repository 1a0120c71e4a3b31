//! Theme and language preferences, each stored under its own key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::i18n::Locale;
use crate::storage::{load_json, save_json, KvStore, LANGUAGE_KEY, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Translation key for the button that switches away from this theme.
    pub fn toggle_label_key(self) -> &'static str {
        match self {
            Theme::Light => "toggle_to_dark",
            Theme::Dark => "toggle_to_light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ValidationError::UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub locale: Locale,
}

impl Preferences {
    /// Read both keys. Anything absent, unreadable or unsupported falls back
    /// to the default.
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let theme = load_json::<String, _>(store, THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();
        let locale = Locale::from_code_or_default(
            load_json::<String, _>(store, LANGUAGE_KEY).as_deref(),
        );
        Self { theme, locale }
    }

    pub fn set_theme<S: KvStore + ?Sized>(&mut self, store: &S, theme: Theme) {
        self.theme = theme;
        save_json(store, THEME_KEY, theme.as_str());
    }

    pub fn toggle_theme<S: KvStore + ?Sized>(&mut self, store: &S) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(store, next);
        next
    }

    pub fn set_locale<S: KvStore + ?Sized>(&mut self, store: &S, locale: Locale) {
        self.locale = locale;
        save_json(store, LANGUAGE_KEY, locale.code());
    }

    /// Unsupported codes are logged and leave the locale unchanged.
    pub fn set_locale_by_code<S: KvStore + ?Sized>(&mut self, store: &S, code: &str) -> bool {
        match code.parse::<Locale>() {
            Ok(locale) => {
                self.set_locale(store, locale);
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_on_first_run() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.locale, Locale::Es);
    }

    #[test]
    fn choices_survive_reload() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::load(&store);
        assert_eq!(prefs.toggle_theme(&store), Theme::Dark);
        assert!(prefs.set_locale_by_code(&store, "en"));
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn unsupported_locale_is_ignored() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::load(&store);
        assert!(!prefs.set_locale_by_code(&store, "fr"));
        assert_eq!(prefs.locale, Locale::Es);
        assert!(store.raw(LANGUAGE_KEY).is_none());
    }

    #[test]
    fn garbage_values_fall_back() {
        let store = MemoryStore::new();
        store.save(THEME_KEY, "\"sepia\"").unwrap();
        store.save(LANGUAGE_KEY, "42").unwrap();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn unreadable_store_uses_defaults() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let mut prefs = Preferences::load(&store);
        prefs.set_theme(&store, Theme::Dark);
        assert_eq!(prefs.theme, Theme::Dark);
    }
}
