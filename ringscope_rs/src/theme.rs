//! Theme synchronizer and preference stores.
//!
//! The theme is a two-state machine (`dark` -> `light` -> `dark`). A toggle
//! persists the new state and, when an analysis is loaded, re-renders the
//! graph and the ring list together so both surfaces always share a palette.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ringscope_report::types::{Theme, ThemedSurfaces};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::PreferenceError;
use crate::store::AnalysisStore;
use crate::types::AnalysisResult;
use crate::{graph, rings};

/// Preference key of the theme flag.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Small key-value store holding user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local preferences (tests, one-shot renders).
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences pre-seeded with a theme.
    pub fn with_theme(theme: Theme) -> Self {
        let mut prefs = Self::new();
        prefs
            .values
            .insert(THEME_PREFERENCE_KEY.into(), theme.as_str().into());
        prefs
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.into(), value.into());
        Ok(())
    }
}

/// Preferences kept in a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/ringscope/preferences.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ringscope").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|source| PreferenceError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.into(), Value::String(value.into()));

        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(&Value::Object(values)).map_err(|source| {
            PreferenceError::Decode {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, body).map_err(io_err)
    }
}

/// Graph and ring list for one theme, built in one go.
pub fn render_surfaces(result: &AnalysisResult, theme: Theme) -> ThemedSurfaces {
    ThemedSurfaces {
        theme,
        graph: graph::render(result, theme),
        rings: rings::render(&result.fraud_rings, theme),
    }
}

/// Outcome of one toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeChange {
    pub theme: Theme,
    /// Re-rendered surfaces; `None` when nothing is loaded.
    pub surfaces: Option<ThemedSurfaces>,
}

/// Owns the theme state and its persistence.
pub struct ThemeSynchronizer {
    theme: Theme,
    prefs: Box<dyn PreferenceStore>,
}

impl std::fmt::Debug for ThemeSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSynchronizer")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeSynchronizer {
    /// Start from the persisted theme. Only `"light"` selects light; a
    /// missing, unknown or unreadable value starts dark.
    pub fn new(prefs: Box<dyn PreferenceStore>) -> Self {
        let theme = match prefs.get(THEME_PREFERENCE_KEY) {
            Ok(Some(value)) if value == Theme::Light.as_str() => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                warn!("Could not read theme preference, starting dark: {e}");
                Theme::Dark
            }
        };
        debug!(theme = %theme, "theme synchronizer ready");
        Self { theme, prefs }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme, persist it, and re-render whatever `store` holds.
    ///
    /// A failed write is logged; the in-memory theme still flips.
    pub fn toggle(&mut self, store: &AnalysisStore) -> ThemeChange {
        self.theme = self.theme.toggled();
        if let Err(e) = self.prefs.set(THEME_PREFERENCE_KEY, self.theme.as_str()) {
            warn!("Could not persist theme preference: {e}");
        }
        info!(theme = %self.theme, "theme toggled");

        ThemeChange {
            theme: self.theme,
            surfaces: store.get().map(|result| render_surfaces(result, self.theme)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::sample_result;
    use tempfile::TempDir;

    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::Unavailable("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn starts_dark_by_default() {
        let sync = ThemeSynchronizer::new(Box::new(MemoryPreferences::new()));
        assert_eq!(sync.theme(), Theme::Dark);
    }

    #[test]
    fn restores_light_from_preferences() {
        let sync = ThemeSynchronizer::new(Box::new(MemoryPreferences::with_theme(Theme::Light)));
        assert_eq!(sync.theme(), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_starts_dark() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(THEME_PREFERENCE_KEY, "solarized").expect("set");
        assert_eq!(ThemeSynchronizer::new(Box::new(prefs)).theme(), Theme::Dark);
    }

    #[test]
    fn toggle_without_analysis_renders_nothing() {
        let mut sync = ThemeSynchronizer::new(Box::new(MemoryPreferences::new()));
        let change = sync.toggle(&AnalysisStore::new());
        assert_eq!(change.theme, Theme::Light);
        assert!(change.surfaces.is_none());
    }

    #[test]
    fn toggle_rerenders_graph_and_rings_with_same_theme() {
        let mut store = AnalysisStore::new();
        store.set(sample_result());
        let mut sync = ThemeSynchronizer::new(Box::new(MemoryPreferences::new()));

        let change = sync.toggle(&store);
        let surfaces = change.surfaces.expect("loaded analysis re-renders");
        assert_eq!(surfaces.theme, Theme::Light);
        assert_eq!(surfaces.graph.theme, Theme::Light);
        assert!(surfaces.graph.nodes.iter().all(|n| n.font.color == "#000000"));
        assert!(surfaces.rings.iter().all(|c| c.style == Theme::Light.card_style()));
    }

    #[test]
    fn broken_store_does_not_block_toggle() {
        let mut sync = ThemeSynchronizer::new(Box::new(BrokenPreferences));
        assert_eq!(sync.theme(), Theme::Dark);
        assert_eq!(sync.toggle(&AnalysisStore::new()).theme, Theme::Light);
    }

    #[test]
    fn file_preferences_round_trip_and_keep_other_keys() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("prefs.json");
        let mut prefs = FilePreferences::new(&path);

        assert_eq!(prefs.get(THEME_PREFERENCE_KEY).expect("read"), None);
        prefs.set("density", "compact").expect("write");
        prefs.set(THEME_PREFERENCE_KEY, "light").expect("write");

        let reopened = FilePreferences::new(&path);
        assert_eq!(
            reopened.get(THEME_PREFERENCE_KEY).expect("read").as_deref(),
            Some("light")
        );
        assert_eq!(reopened.get("density").expect("read").as_deref(), Some("compact"));
    }

    #[test]
    fn corrupt_preference_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").expect("write");
        assert!(FilePreferences::new(&path).get(THEME_PREFERENCE_KEY).is_err());
    }
}
