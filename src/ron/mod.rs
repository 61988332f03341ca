//! Utilities for loading RON files and watching directories for changes.
//!
//! This module provides a small helper for reading RON definition files
//! from a directory and a filesystem watcher resource that sets a shared
//! boolean when files change. The watcher is used for hot-reloading
//! RON-based structure definitions during development.

use bevy::log::warn;
use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Resource)]
/// File-watcher resource for RON hot-reload.
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared boolean set to `true` when watched files change.
    _watcher: Option<notify::RecommendedWatcher>, // Watcher handle kept to prevent immediate drop.
}

impl RonWatcher {
    /// Create a stub `RonWatcher` that does not have an active OS watcher.
    ///
    /// # Return
    /// Returns a `RonWatcher` with `changed` initialized to `false` and no
    /// underlying OS watcher. Useful as a fallback when watcher creation
    /// fails or when running on platforms without notify support.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Read and clear the `changed` flag in one step.
    ///
    /// # Return
    /// `true` if a change was observed since the last call.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn take_changed(&self) -> bool {
        let mut changed = self.changed.lock().unwrap();
        std::mem::take(&mut *changed)
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
///
/// # Return
/// A `Vec<T>` containing all successfully deserialized items found in the
/// directory. Files that fail to parse are skipped with a warning.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            if let Ok(metadata) = entry.metadata()
                && metadata.is_file()
                && let Some(ext) = entry.path().extension()
                && ext == "ron"
                && let Ok(content) = std::fs::read_to_string(entry.path())
            {
                match ron::from_str::<T>(&content) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        warn!("failed to parse {}: {e:?}", entry.path().display());
                    }
                }
            }
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Arguments
/// * `path` - Directory path to watch for `.ron` file changes.
///
/// # Return
/// Returns a `RonWatcher` on success. The returned watcher's `changed`
/// flag will be set to `true` when a file is created or modified under
/// the watched directory.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the watcher cannot be registered for the provided path.
///
/// # Panics
/// The watcher callback uses `Mutex::lock().unwrap()` when setting the
/// shared `changed` flag; that call can panic if the mutex is poisoned.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Resolve watched path to a canonical form if possible so we can filter events
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    // Only set changed when an event path is under the watched directory
                    let relevant = event.paths.iter().any(|p| {
                        let p_canon = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
                        p_canon.starts_with(&watched_path)
                    });
                    if relevant {
                        *changed_clone.lock().unwrap() = true;
                    }
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher {
        changed,
        _watcher: Some(watcher),
    })
}
