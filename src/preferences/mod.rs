//! Theme and sidebar preferences
//!
//! The store is initialised on load (defaults are written when nothing is
//! stored yet) and written through on every change. Changes are published on
//! a broadcast channel so the shell can restyle without polling.
//!
//! ```text
//! set_theme() ──▶ backend.write() ──▶ broadcast ──▶ subscribers
//! ```

use crate::config::PreferencesConfig;
use crate::core::error::{AdminError, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("preference backend unavailable: {0}")]
    Unavailable(String),
}

impl From<PreferenceError> for AdminError {
    fn from(err: PreferenceError) -> Self {
        AdminError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
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
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sidebar {
    #[default]
    Expanded,
    Collapsed,
}

impl Sidebar {
    pub fn toggled(self) -> Self {
        match self {
            Sidebar::Expanded => Sidebar::Collapsed,
            Sidebar::Collapsed => Sidebar::Expanded,
        }
    }
}

/// Everything the store persists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub sidebar: Sidebar,
}

/// A preference that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    Theme(Theme),
    Sidebar(Sidebar),
}

/// Where preferences are kept between runs
pub trait PreferenceBackend: Send + Sync {
    /// Stored preferences, or `None` when nothing has been written yet
    fn read(&self) -> Result<Option<Preferences>, PreferenceError>;

    fn write(&self, preferences: &Preferences) -> Result<(), PreferenceError>;
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for Box<B> {
    fn read(&self) -> Result<Option<Preferences>, PreferenceError> {
        (**self).read()
    }

    fn write(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        (**self).write(preferences)
    }
}

/// YAML file backend
///
/// An unreadable file is treated as empty so a corrupt file is replaced
/// with defaults instead of locking the user out of the dashboard.
#[derive(Debug, Clone)]
pub struct YamlFileBackend {
    path: PathBuf,
}

impl YamlFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceBackend for YamlFileBackend {
    fn read(&self) -> Result<Option<Preferences>, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_yaml::from_str(&content) {
            Ok(preferences) => Ok(Some(preferences)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable preferences: {}", e);
                Ok(None)
            }
        }
    }

    fn write(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_yaml::to_string(preferences)?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }
}

/// In-memory backend; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<Preferences>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(preferences))),
        }
    }

    /// What is currently stored
    pub fn stored(&self) -> Option<Preferences> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self) -> Result<Option<Preferences>, PreferenceError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| PreferenceError::Unavailable(e.to_string()))?;
        Ok(*slot)
    }

    fn write(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| PreferenceError::Unavailable(e.to_string()))?;
        *slot = Some(*preferences);
        Ok(())
    }
}

/// Current preferences backed by a [`PreferenceBackend`]
pub struct PreferenceStore<B: PreferenceBackend> {
    backend: B,
    current: Preferences,
    changes: broadcast::Sender<PreferenceChange>,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    /// Read stored preferences, writing the defaults when none exist
    pub fn load(backend: B) -> Result<Self, PreferenceError> {
        let current = match backend.read()? {
            Some(stored) => stored,
            None => {
                let defaults = Preferences::default();
                backend.write(&defaults)?;
                tracing::debug!("Initialised preferences with defaults");
                defaults
            }
        };
        let (changes, _) = broadcast::channel(16);
        Ok(Self {
            backend,
            current,
            changes,
        })
    }

    pub fn preferences(&self) -> Preferences {
        self.current
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn sidebar(&self) -> Sidebar {
        self.current.sidebar
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Receive every subsequent change
    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PreferenceError> {
        if self.current.theme == theme {
            return Ok(());
        }
        self.commit(
            Preferences {
                theme,
                ..self.current
            },
            PreferenceChange::Theme(theme),
        )
    }

    pub fn set_sidebar(&mut self, sidebar: Sidebar) -> Result<(), PreferenceError> {
        if self.current.sidebar == sidebar {
            return Ok(());
        }
        self.commit(
            Preferences {
                sidebar,
                ..self.current
            },
            PreferenceChange::Sidebar(sidebar),
        )
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, PreferenceError> {
        let theme = self.current.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn toggle_sidebar(&mut self) -> Result<Sidebar, PreferenceError> {
        let sidebar = self.current.sidebar.toggled();
        self.set_sidebar(sidebar)?;
        Ok(sidebar)
    }

    // Written before the in-memory value changes, so a failed write leaves
    // the store as it was.
    fn commit(&mut self, next: Preferences, change: PreferenceChange) -> Result<(), PreferenceError> {
        self.backend.write(&next)?;
        self.current = next;
        tracing::debug!(?change, "Preference changed");
        // No subscribers is fine
        let _ = self.changes.send(change);
        Ok(())
    }
}

impl PreferenceStore<Box<dyn PreferenceBackend>> {
    /// File-backed when a path is configured, in-memory otherwise
    pub fn from_config(config: &PreferencesConfig) -> Result<Self, PreferenceError> {
        let backend: Box<dyn PreferenceBackend> = match &config.path {
            Some(path) => Box::new(YamlFileBackend::new(path)),
            None => Box::new(MemoryBackend::new()),
        };
        Self::load(backend)
    }
}
