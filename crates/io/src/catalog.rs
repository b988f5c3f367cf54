// Catalog JSON load/save

use std::path::{Path, PathBuf};

use yokscore_recon::{Catalog, ReconError};

pub fn load(path: &Path) -> Result<Catalog, ReconError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Catalog::from_json(text)
}

/// Overwrite `path` with the whole catalog, pretty-printed.
///
/// Atomic: write `<file>.tmp` next to the real file then rename, so a failed
/// write never leaves a truncated catalog behind. A symlinked catalog is
/// written through the link; the link itself stays.
pub fn save(catalog: &Catalog, path: &Path) -> Result<(), ReconError> {
    let json = catalog.to_json_pretty()?;
    let target = resolve_link(path);
    let temp_path = temp_path_for(&target);

    if let Err(e) = std::fs::write(&temp_path, json.as_bytes()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(ReconError::CatalogWrite(format!(
            "failed to write {}: {e}",
            temp_path.display()
        )));
    }

    if let Err(e) = std::fs::rename(&temp_path, &target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(ReconError::CatalogWrite(format!(
            "failed to rename to {}: {e}",
            target.display()
        )));
    }

    log::info!("wrote {} ({} bytes)", target.display(), json.len());
    Ok(())
}

fn resolve_link(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
