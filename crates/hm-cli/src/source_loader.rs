use std::fs;
use std::path::{Path, PathBuf};

use hm_core::HeroMlError;
use walkdir::WalkDir;

use crate::{map_cli_source_path, map_cli_source_read, map_cli_source_scan};

pub(crate) const SCRIPT_EXTENSION: &str = "heroml";

#[derive(Debug, Clone)]
pub(crate) struct LoadedScript {
    pub(crate) path: PathBuf,
    pub(crate) source: String,
}

pub(crate) fn load_script(file: &str) -> Result<LoadedScript, HeroMlError> {
    let path = resolve_path(file)?;
    if !path.is_file() {
        return Err(HeroMlError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("Script file does not exist: {}", path.display()),
        ));
    }
    if !has_script_extension(&path) {
        return Err(HeroMlError::new(
            "CLI_SOURCE_EXTENSION",
            format!(
                "Script file must have a .{} extension: {}",
                SCRIPT_EXTENSION,
                path.display()
            ),
        ));
    }

    let source = fs::read_to_string(&path).map_err(map_cli_source_read)?;
    Ok(LoadedScript { path, source })
}

/// A single script file, or every script below a directory in path order.
pub(crate) fn collect_scripts(target: &str) -> Result<Vec<PathBuf>, HeroMlError> {
    let root = resolve_path(target)?;
    if !root.exists() {
        return Err(HeroMlError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("Path does not exist: {}", root.display()),
        ));
    }

    if root.is_file() {
        if !has_script_extension(&root) {
            return Err(HeroMlError::new(
                "CLI_SOURCE_EXTENSION",
                format!(
                    "Script file must have a .{} extension: {}",
                    SCRIPT_EXTENSION,
                    root.display()
                ),
            ));
        }
        return Ok(vec![root]);
    }

    let mut scripts = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false).into_iter() {
        let entry = entry.map_err(map_cli_source_scan)?;
        if entry.file_type().is_file() && has_script_extension(entry.path()) {
            scripts.push(entry.into_path());
        }
    }
    scripts.sort();

    if scripts.is_empty() {
        return Err(HeroMlError::new(
            "CLI_SOURCE_EMPTY",
            format!("No .{} files found under {}", SCRIPT_EXTENSION, root.display()),
        ));
    }
    Ok(scripts)
}

fn resolve_path(raw: &str) -> Result<PathBuf, HeroMlError> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(std::env::current_dir()
        .map_err(map_cli_source_path)?
        .join(path))
}

fn has_script_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension == SCRIPT_EXTENSION)
}
