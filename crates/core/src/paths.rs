//! Well-known storage locations.

use std::path::PathBuf;

/// File name of the persisted cluster list, kept directly in the user's
/// home directory.
pub const CONFIG_FILE_NAME: &str = "joint.json";

/// Cluster config file: `~/joint.json`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().ends_with("joint.json"));
    }
}
