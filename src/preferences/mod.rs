use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Minimalist,
    Cyber,
    Party,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub sound_enabled: bool,
    pub play_count: u64,
    pub has_seen_onboarding: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::default(),
            sound_enabled: true,
            play_count: 0,
            has_seen_onboarding: false,
        }
    }
}

pub type PreferencesHandle = Arc<Mutex<PreferencesStore>>;

/// Preferences backed by a JSON file, written after every change.
#[derive(Debug)]
pub struct PreferencesStore {
    file_path: PathBuf,
    preferences: Preferences,
}

impl PreferencesStore {
    pub fn open(file_path: &Path) -> Result<Self, Error> {
        let preferences = if file_path.exists() {
            let content = fs::read_to_string(file_path).map_err(|error| {
                Error::log_and_create_storage(&format!(
                    "Could not read the preferences file. File: '{}', Error: '{error}'.",
                    file_path.display()
                ))
            })?;
            serde_json::from_str(&content).unwrap_or_else(|error| {
                log::error!(
                    "Preferences file is malformed, defaulting to the built-in preferences. File: '{}', Error: '{error}'.",
                    file_path.display()
                );
                Preferences::default()
            })
        } else {
            log::info!(
                "Preferences file not found, using defaults. File: '{}'.",
                file_path.display()
            );
            Preferences::default()
        };

        Ok(PreferencesStore {
            file_path: file_path.to_path_buf(),
            preferences,
        })
    }

    pub fn into_handle(self) -> PreferencesHandle {
        Arc::new(Mutex::new(self))
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), Error> {
        self.persist(Preferences {
            theme,
            ..self.preferences.clone()
        })
    }

    pub fn set_sound_enabled(&mut self, sound_enabled: bool) -> Result<(), Error> {
        self.persist(Preferences {
            sound_enabled,
            ..self.preferences.clone()
        })
    }

    pub fn record_play(&mut self) -> Result<u64, Error> {
        let play_count = self.preferences.play_count.saturating_add(1);
        self.persist(Preferences {
            play_count,
            ..self.preferences.clone()
        })?;
        Ok(play_count)
    }

    pub fn complete_onboarding(&mut self) -> Result<(), Error> {
        self.persist(Preferences {
            has_seen_onboarding: true,
            ..self.preferences.clone()
        })
    }

    /// The in-memory copy only changes once the file has been written.
    fn persist(&mut self, updated: Preferences) -> Result<(), Error> {
        self.save(&updated)?;
        self.preferences = updated;
        Ok(())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), Error> {
        if let Some(directory) = self.file_path.parent() {
            if !directory.as_os_str().is_empty() {
                fs::create_dir_all(directory).map_err(|error| {
                    Error::log_and_create_storage(&format!(
                        "Could not create the preferences directory. Directory: '{}', Error: '{error}'.",
                        directory.display()
                    ))
                })?;
            }
        }
        let content = serde_json::to_string_pretty(preferences).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Could not serialize the preferences. Error: '{error}'."
            ))
        })?;
        fs::write(&self.file_path, content).map_err(|error| {
            Error::log_and_create_storage(&format!(
                "Could not write the preferences file. File: '{}', Error: '{error}'.",
                self.file_path.display()
            ))
        })
    }
}

pub fn lock(handle: &PreferencesHandle) -> Result<std::sync::MutexGuard<'_, PreferencesStore>, Error> {
    handle.lock().map_err(|error| {
        Error::log_and_create_internal(&format!(
            "The preferences lock is poisoned. Error: '{error}'."
        ))
    })
}
