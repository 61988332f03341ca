//! Structure loader and watcher for loading structure definitions from RON
//! files and monitoring changes for hot reloading during runtime.
//!
//! # Example
//! ```no_run
//! use bevy::prelude::*;
//! use multiblock::structure::loader as structure_loader;
//!
//! let mut app = App::new();
//!
//! // Load the initial registry and insert it as a resource
//! let registry = structure_loader::load_structures_from_dir("data/structures");
//! app.insert_resource(registry);
//!
//! // Create a watcher (fallback to stub on error) and insert it as a resource
//! let watcher = structure_loader::setup_structure_watcher("data/structures")
//!     .unwrap_or_else(|_| structure_loader::StructureWatcher::stub());
//! app.insert_resource(watcher);
//!
//! // The check system reloads the registry when files change
//! app.add_systems(Update, structure_loader::check_structure_changes);
//! ```

use super::registry::{Structure, StructureRegistry};
use super::shape::ShapeDef;
use crate::ron_loader::{RonWatcher, load_ron_files, setup_ron_watcher};
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};

/// Default directory for structure definition files.
pub const STRUCTURE_DIR: &str = "data/structures";

/// File-watcher resource over the structure definition directory. Carries
/// the watched path so reloads re-read the same directory the watcher was
/// set up over.
#[derive(Resource)]
pub struct StructureWatcher {
    pub watcher: RonWatcher,
    pub path: String,
}

impl StructureWatcher {
    /// Create a stub `StructureWatcher` that does not have an active OS
    /// watcher and reloads from the default directory.
    #[must_use]
    pub fn stub() -> Self {
        StructureWatcher {
            watcher: RonWatcher::stub(),
            path: STRUCTURE_DIR.to_string(),
        }
    }
}

/// Load all structure definitions from RON files.
///
/// Definitions that cannot describe a placeable structure are skipped with
/// a warning: non-positive dimensions, a shaped definition with an empty
/// point set, or an id already taken by an earlier file.
///
/// # Arguments
/// * `path` - The directory path where structure RON files are located
///   (e.g., "data/structures").
///
/// # Returns
/// A `StructureRegistry` containing all loaded structure definitions,
/// indexed by both name and numeric id.
#[must_use]
pub fn load_structures_from_dir(path: &str) -> StructureRegistry {
    let mut registry = StructureRegistry::default();
    let defs: Vec<ShapeDef> = load_ron_files(path);
    for def in defs {
        if def.width <= 0 || def.height <= 0 || def.depth <= 0 {
            warn!(
                "skipping structure '{}': non-positive dimensions {}x{}x{}",
                def.name, def.width, def.height, def.depth
            );
            continue;
        }
        if def.shaped && def.points.is_empty() {
            warn!("skipping structure '{}': shaped with no points", def.name);
            continue;
        }
        if let Some(taken) = registry.names_by_id.get(&def.id) {
            warn!(
                "skipping structure '{}': id {} already used by '{}'",
                def.name, def.id, taken
            );
            continue;
        }
        registry.register(Structure::from_def(&def));
    }
    info!(
        "loaded {} structure definitions from '{}'",
        registry.len(),
        path
    );
    registry
}

/// Set up a file watcher to monitor changes in structure RON files, for
/// hot reloading definitions without restarting the host.
///
/// # Arguments
/// * `path` - The directory path where structure RON files are located.
///
/// # Returns
/// A `StructureWatcher` that can be inserted as a resource and polled by
/// [`check_structure_changes`].
///
/// # Errors
/// Returns a `notify::Error` if the underlying file watcher could not be
/// created or configured.
pub fn setup_structure_watcher(path: &str) -> Result<StructureWatcher, notify::Error> {
    setup_ron_watcher(path).map(|watcher| StructureWatcher {
        watcher,
        path: path.to_string(),
    })
}

/// Reload the structure registry when the watcher has observed changes.
///
/// Already-placed instances keep the cells they were placed with; a reload
/// only affects future placement and teardown walks, so shrinking a shape
/// under live instances will strand their outer cells.
///
/// # Panics
/// Will panic if the internal watcher mutex is poisoned.
#[allow(clippy::needless_pass_by_value)]
pub fn check_structure_changes(
    watcher: Res<StructureWatcher>,
    mut registry: ResMut<StructureRegistry>,
) {
    if watcher.watcher.take_changed() {
        info!(
            "structure definitions changed, reloading from '{}'",
            watcher.path
        );
        *registry = load_structures_from_dir(&watcher.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("multiblock-loader-{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn loads_valid_definitions() {
        let dir = scratch_dir("valid");
        fs::write(
            dir.join("table.ron"),
            r#"(name: "table", id: 1, width: 2, height: 1, depth: 2)"#,
        )
        .unwrap();
        fs::write(
            dir.join("tank.ron"),
            r#"(name: "tank", id: 2, width: 3, height: 3, depth: 3, hollow: true)"#,
        )
        .unwrap();

        let registry = load_structures_from_dir(dir.to_str().unwrap());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("table").unwrap().shape.max_cells, 4);
        assert!(registry.get("tank").unwrap().shape.hollow);
    }

    #[test]
    fn rejects_unplaceable_definitions() {
        let dir = scratch_dir("invalid");
        fs::write(
            dir.join("flat.ron"),
            r#"(name: "flat", id: 1, width: 2, height: 0, depth: 2)"#,
        )
        .unwrap();
        fs::write(
            dir.join("empty_shaped.ron"),
            r#"(name: "empty_shaped", id: 2, width: 2, height: 2, depth: 2, shaped: true)"#,
        )
        .unwrap();
        fs::write(dir.join("garbage.ron"), "not ron at all").unwrap();

        let registry = load_structures_from_dir(dir.to_str().unwrap());
        assert!(registry.is_empty());
    }

    #[test]
    fn first_definition_wins_on_duplicate_id() {
        let dir = scratch_dir("dup");
        // Directory iteration order is not promised, so both files claim
        // the same id and we only assert that exactly one survived.
        fs::write(
            dir.join("a.ron"),
            r#"(name: "first", id: 5, width: 1, height: 1, depth: 1)"#,
        )
        .unwrap();
        fs::write(
            dir.join("b.ron"),
            r#"(name: "second", id: 5, width: 1, height: 1, depth: 1)"#,
        )
        .unwrap();

        let registry = load_structures_from_dir(dir.to_str().unwrap());
        assert_eq!(registry.len(), 1);
        assert!(registry.get_by_id(5).is_some());
    }

    #[test]
    fn watcher_carries_the_watched_path() {
        assert_eq!(StructureWatcher::stub().path, STRUCTURE_DIR);

        let dir = scratch_dir("watched");
        if let Ok(watcher) = setup_structure_watcher(dir.to_str().unwrap()) {
            assert_eq!(watcher.path, dir.to_str().unwrap());
        }
    }

    #[test]
    fn missing_directory_yields_empty_registry() {
        let registry = load_structures_from_dir("/definitely/not/a/dir");
        assert!(registry.is_empty());
    }
}
