use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/chip)
    pub config: PathBuf,

    /// Config file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Standard XDG paths, falling back to `./.chip` when no home directory
    /// can be determined.
    #[must_use]
    pub fn new() -> Self {
        let config = ProjectDirs::from("", "", "chip").map_or_else(
            || PathBuf::from(".chip"),
            |project| project.config_dir().to_path_buf(),
        );
        Self::with_base(config)
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            config: base,
        }
    }

    /// Ensure the config directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_sets_all_paths() {
        let base = PathBuf::from("/tmp/test-chip");
        let dirs = Directories::with_base(base.clone());

        assert_eq!(dirs.config, base);
        assert_eq!(dirs.config_file, base.join("config.json"));
    }

    #[test]
    fn test_ensure_exists_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = temp_dir.path().join("chip-test-subdir");
        let dirs = Directories::with_base(base.clone());

        assert!(!base.exists());
        dirs.ensure_exists().unwrap();
        assert!(dirs.config.exists());

        // idempotent
        dirs.ensure_exists().unwrap();
    }

    #[test]
    fn test_new_points_at_config_json() {
        let dirs = Directories::new();
        assert!(dirs.config.to_string_lossy().contains("chip"));
        assert!(dirs.config_file.to_string_lossy().ends_with("config.json"));
    }
}
