//! Light/dark theme selection behind injected host boundaries.
//!
//! The whole persisted surface of the app is one named preference plus
//! one system color-scheme signal. Both arrive as trait objects so the
//! logic runs in tests without a display environment: the web frontend
//! plugs in localStorage and a media query, native frontends an
//! in-memory store.

/// Reads/writes the single persisted preference string.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// The system color-scheme signal (`prefers-color-scheme`).
pub trait SystemScheme {
    fn prefers_dark(&self) -> bool;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// Session-only store for frontends without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entry: Option<(String, String)>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entry
            .as_ref()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entry = Some((key.to_string(), value.to_string()));
    }

    fn remove(&mut self, key: &str) {
        if self.entry.as_ref().is_some_and(|(k, _)| k == key) {
            self.entry = None;
        }
    }
}

/// Fixed system answer, for frontends that probe once at startup.
#[derive(Debug, Clone, Copy)]
pub struct StaticScheme(pub bool);

impl SystemScheme for StaticScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
}

impl ThemeChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

const THEME_KEY: &str = "theme";

/// The theme toggle's state machine: a stored preference overrides the
/// system scheme; choosing the mode the system already uses clears the
/// stored preference instead of pinning it.
pub struct ThemeController<S, Q> {
    store: S,
    system: Q,
}

impl<S: PreferenceStore, Q: SystemScheme> ThemeController<S, Q> {
    pub fn new(store: S, system: Q) -> Self {
        Self { store, system }
    }

    fn system_choice(&self) -> ThemeChoice {
        if self.system.prefers_dark() {
            ThemeChoice::Dark
        } else {
            ThemeChoice::Light
        }
    }

    /// The effective theme right now.
    pub fn resolve(&self) -> ThemeChoice {
        self.store
            .get(THEME_KEY)
            .and_then(|v| ThemeChoice::from_str(&v))
            .unwrap_or_else(|| self.system_choice())
    }

    /// Select a theme, persisting only a deviation from the system.
    pub fn choose(&mut self, choice: ThemeChoice) {
        if choice == self.system_choice() {
            self.store.remove(THEME_KEY);
        } else {
            self.store.set(THEME_KEY, choice.as_str());
        }
    }

    /// Flip light/dark; returns the new effective theme.
    pub fn toggle(&mut self) -> ThemeChoice {
        let next = match self.resolve() {
            ThemeChoice::Light => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::Light,
        };
        self.choose(next);
        next
    }

    /// Whether a preference is currently persisted (test hook).
    pub fn has_stored_preference(&self) -> bool {
        self.store.get(THEME_KEY).is_some()
    }
}
