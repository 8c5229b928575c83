//! Init command - initialize configuration file.

use std::path::Path;

use solotrav::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();

    if write_default_config(&path)? {
        println!("Created configuration file: {}", path.display());
        println!();
        println!("Edit this file to customize SoloTrav settings.");
        println!("CLI arguments override config file values when specified.");
    } else {
        println!("Configuration file already exists: {}", path.display());
        println!("Use 'solotrav config set' to change settings.");
    }
    Ok(())
}

/// Write a default config file unless one exists. Returns whether it wrote.
fn write_default_config(path: &Path) -> Result<bool, CliError> {
    if path.exists() {
        return Ok(false);
    }
    ConfigFile::default().save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solotrav").join("config.ini");

        assert!(write_default_config(&path).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_existing_file_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        let contents = "; my settings\n[geofence]\nradius = 750\n";
        std::fs::write(&path, contents).unwrap();

        assert!(!write_default_config(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }
}
