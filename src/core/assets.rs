use anyhow::{bail, Result};
use bevy::asset::io::file::FileAssetReader;
use std::path::{Path, PathBuf};

/// Directory Bevy's default file source reads from: `BEVY_ASSET_ROOT`, else
/// `CARGO_MANIFEST_DIR`, else the executable's directory, joined with `assets`.
pub fn asset_root() -> PathBuf {
    FileAssetReader::get_base_path().join("assets")
}

/// Fails when `relative` does not name a file under `root`.
pub fn require_asset(root: &Path, relative: &str) -> Result<PathBuf> {
    let full = root.join(relative);
    if !full.is_file() {
        bail!("asset '{}' not found at {}", relative, full.display());
    }
    Ok(full)
}
