//! Loading configuration from disk and layering overrides on top

use sos_core::{CapabilityPolicy, LayeredConfig, LocationSource, SosConfig, SosError};
use std::io::Write;

#[test]
fn test_load_file_then_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[database]
url = "https://disaster-drill.firebaseio.com/"
collection = "SOSMessages"

[location]
source = "file"
path = "/var/lib/sos/last_fix.json"

[capability]
policy = "denied"
"#
    )
    .unwrap();

    let mut config = SosConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.location.source, LocationSource::File);
    assert_eq!(config.capability.policy, CapabilityPolicy::Denied);

    config.apply_override("capability.policy=granted").unwrap();
    config
        .merge_env_vars([("SOS_AUTH_TOKEN", "secret-token")])
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.capability.policy, CapabilityPolicy::Granted);
    assert_eq!(config.database.auth_token.as_deref(), Some("secret-token"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SosConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, SosConfig::default());
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[database\nurl = 3").unwrap();
    assert!(matches!(
        SosConfig::load_from_file(file.path()),
        Err(SosError::Config { .. })
    ));
}

#[test]
fn test_override_needs_assignment() {
    let mut config = SosConfig::default();
    assert!(config.apply_override("database.url").is_err());
}
