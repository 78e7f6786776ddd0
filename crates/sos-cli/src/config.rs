//! Effective configuration for a CLI invocation

use anyhow::{Context, Result};
use sos_core::{LayeredConfig, SosConfig};
use std::path::Path;

/// File (if present), then environment, then `--set` overrides, then validation
pub fn load(path: &Path, overrides: &[String]) -> Result<SosConfig> {
    let mut config = SosConfig::load_or_default(path)?;
    config.merge_with_env()?;
    apply_overrides(&mut config, overrides)?;
    config
        .validate()
        .with_context(|| format!("invalid configuration ({})", path.display()))?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

fn apply_overrides(config: &mut SosConfig, overrides: &[String]) -> Result<()> {
    for assignment in overrides {
        config.apply_override(assignment)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::CapabilityPolicy;

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[capability]\npolicy = \"denied\"\n").unwrap();

        let config = load(&path, &["capability.policy=granted".to_string()]).unwrap();
        assert_eq!(config.capability.policy, CapabilityPolicy::Granted);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load(&path, &["location.source=file".to_string()]).is_err());
        assert!(load(&path, &["no-equals-sign".to_string()]).is_err());
    }
}
