//! Init command handler

use anyhow::{bail, Context, Result};
use sos_core::SosConfig;
use std::path::Path;

/// Write the default configuration to `path`
pub fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let rendered = SosConfig::default().to_toml()?;
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Default configuration written");
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::LayeredConfig;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sos").join("config.toml");

        handle_init(&path, false).unwrap();
        let loaded = SosConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, SosConfig::default());

        assert!(handle_init(&path, false).is_err());
        handle_init(&path, true).unwrap();
    }
}
