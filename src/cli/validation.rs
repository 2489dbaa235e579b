//! CLI argument validation functions
//!
//! Custom value parsers for arguments that clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

/// Upper bound for interval and cooldown overrides (one day)
const MAX_SECONDS: u64 = 86_400;

/// Validate a whole number of seconds in `1..=86400`
pub fn validate_seconds(value: &str) -> Result<u64, String> {
    let secs: u64 = value.trim().parse().map_err(|_| {
        format!(
            "Expected a whole number of seconds between 1 and {}, got: '{}'",
            MAX_SECONDS, value
        )
    })?;

    if secs == 0 {
        return Err("Seconds must be greater than 0".to_string());
    }
    if secs > MAX_SECONDS {
        return Err(format!("Seconds cannot exceed {} (one day)", MAX_SECONDS));
    }

    Ok(secs)
}

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_validation_valid() {
        for value in ["1", "5", " 30 ", "86400"] {
            assert!(validate_seconds(value).is_ok(), "{} should be valid", value);
        }
        assert_eq!(validate_seconds("30").unwrap(), 30);
    }

    #[test]
    fn test_seconds_validation_invalid() {
        for value in ["0", "86401", "-1", "abc", "", "1.5"] {
            assert!(validate_seconds(value).is_err(), "'{}' should be invalid", value);
        }
    }

    #[test]
    fn test_config_file_path_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("seatwatch.toml");
        std::fs::write(&file, "").unwrap();

        assert!(validate_config_file_path(file.to_str().unwrap()).is_ok());
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(
            validate_config_file_path(dir.path().join("missing.toml").to_str().unwrap()).is_err()
        );
    }
}
