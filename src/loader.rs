//! Loading machine definitions from JSON files and strings.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{MachineDefinition, MachineError};

/// `DefinitionLoader` reads wire-format machine definitions from individual
/// `.json` files, from raw strings, or from every definition file in a
/// directory.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a single machine definition from the specified file path.
    pub fn load(path: &Path) -> Result<MachineDefinition, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_from_string(&content)
    }

    /// Parses a machine definition from JSON content, e.g. user input.
    pub fn load_from_string(content: &str) -> Result<MachineDefinition, MachineError> {
        serde_json::from_str(content).map_err(|e| MachineError::Parse(e.to_string()))
    }

    /// Loads every `.json` definition in a directory. Directories and files
    /// with other extensions are skipped; each file yields its own result so
    /// one broken definition does not hide the others.
    pub fn load_dir(directory: &Path) -> Vec<Result<(PathBuf, MachineDefinition), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }
}
