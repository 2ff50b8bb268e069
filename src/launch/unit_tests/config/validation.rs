use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::launch::{config::LaunchConfig, error::LaunchError};

#[test]
fn validation() {
    // Valid config
    let config = LaunchConfig::default();
    assert!(config.validate().is_ok());

    // Empty program should fail
    let config = LaunchConfig::new("");
    match config.validate() {
        Err(LaunchError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // Empty range should fail
    let config = LaunchConfig::default().ports(8060..8060);
    match config.validate() {
        Err(LaunchError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // No delay candidates should fail
    let config = LaunchConfig::default().delays([]);
    match config.validate() {
        Err(LaunchError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // Label with a space would split into two arguments
    let config = LaunchConfig::default().label("two words");
    match config.validate() {
        Err(LaunchError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_working_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let config = LaunchConfig::default().working_dir(missing.to_string_lossy());

    assert!(matches!(
        config.validate(),
        Err(LaunchError::InvalidConfiguration(_))
    ));
}

#[test]
fn bad_env_key_fails() {
    let config = LaunchConfig::default().env([("A=B", "1")]);

    assert!(matches!(
        config.validate(),
        Err(LaunchError::InvalidConfiguration(_))
    ));
}

#[test]
fn build_commands_rejects_invalid_config() {
    let config = LaunchConfig::default().delays([]);
    let result = config.build_commands_with(&mut StdRng::seed_from_u64(1));

    assert!(matches!(result, Err(LaunchError::InvalidConfiguration(_))));
}
