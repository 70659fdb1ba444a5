use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("cascade file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("cascade file {name} not found; searched: {}", join_paths(searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
}

impl CascadeResolveError {
    /// Path named in diagnostics: the explicit path, or the first candidate.
    pub fn primary_path(&self) -> PathBuf {
        match self {
            CascadeResolveError::Missing(path) => path.clone(),
            CascadeResolveError::NotFound { name, searched } => searched
                .first()
                .cloned()
                .unwrap_or_else(|| PathBuf::from(name)),
        }
    }
}

/// Resolve the cascade file, checking known locations in order.
///
/// Resolution order:
/// 1. Explicit path (used verbatim, must exist)
/// 2. Working directory, then `./models/`
/// 3. Directory of the running executable
/// 4. User data directory (platform-specific)
pub fn resolve(name: &str, explicit: Option<&Path>) -> Result<PathBuf, CascadeResolveError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(CascadeResolveError::Missing(path.to_path_buf()))
        };
    }
    resolve_in(name, &search_dirs())
}

/// First `dir/name` that exists among `dirs`.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, CascadeResolveError> {
    let searched: Vec<PathBuf> = dirs.iter().map(|d| d.join(name)).collect();
    searched
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| CascadeResolveError::NotFound {
            name: name.to_string(),
            searched,
        })
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("."), PathBuf::from("models")];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Some(data_dir) = model_data_dir() {
        dirs.push(data_dir);
    }
    dirs
}

/// Platform-specific model directory.
///
/// - macOS: `~/Library/Application Support/FaceCloak/models/`
/// - Linux: `$XDG_DATA_HOME/FaceCloak/models/` or `~/.local/share/FaceCloak/models/`
/// - Windows: `%APPDATA%/FaceCloak/models/`
pub fn model_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("FaceCloak").join("models"))
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
