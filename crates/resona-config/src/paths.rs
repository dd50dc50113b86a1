//! Platform-specific paths for settings and parameter presets.
//!
//! - **User config**: `~/.config/resona/` (Linux), `~/Library/Application Support/resona/` (macOS), `%APPDATA%\resona\` (Windows)
//! - **User presets**: `<user config>/presets/`

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_NAME: &str = "resona";
const PRESETS_SUBDIR: &str = "presets";
const PRESET_EXTENSION: &str = "toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Creates the user presets directory if needed and returns it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Resolves a preset by path or by name.
///
/// An existing file path is returned as is. Otherwise `name` (with `.toml`
/// appended if missing) is looked up in `dir`.
pub fn find_preset_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    let file_name = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.{PRESET_EXTENSION}")
    };
    let candidate = dir.join(file_name);
    candidate.is_file().then_some(candidate)
}

/// [`find_preset_in`] over the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(&user_presets_dir(), name)
}

/// Lists `.toml` files in `dir`, sorted by path.
///
/// A missing or unreadable directory yields an empty list.
pub fn list_presets_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXTENSION)
        })
        .collect();
    presets.sort();
    presets
}

/// Preset name from a file path (the file stem).
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn user_dirs_are_namespaced() {
        assert!(user_config_dir().ends_with("resona"));
        assert!(user_presets_dir().ends_with("resona/presets"));
    }

    #[test]
    fn find_by_path_and_name() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("bright.toml");
        fs::write(&preset_path, "name = \"Bright\"").unwrap();

        assert_eq!(
            find_preset_in(temp_dir.path(), preset_path.to_str().unwrap()),
            Some(preset_path.clone())
        );
        assert_eq!(
            find_preset_in(temp_dir.path(), "bright"),
            Some(preset_path.clone())
        );
        assert_eq!(
            find_preset_in(temp_dir.path(), "bright.toml"),
            Some(preset_path)
        );
        assert_eq!(find_preset_in(temp_dir.path(), "dark"), None);
    }

    #[test]
    fn list_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let presets = list_presets_in(temp_dir.path());
        let names: Vec<_> = presets
            .iter()
            .filter_map(|p| preset_name_from_path(p))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn list_missing_dir_is_empty() {
        assert!(list_presets_in(Path::new("/nonexistent/resona/12345")).is_empty());
    }
}
