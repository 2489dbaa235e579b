//! Tests for the logger module

use std::io::Write;
use std::str::FromStr;

use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::*;
use crate::logger::writer::RotatingFileWriter;

fn file_config(dir: &TempDir, max_size: u64, max_files: usize) -> FileConfig {
    FileConfig {
        enabled: true,
        path: dir.path().join("logs").join("seatwatch.log"),
        append: true,
        format: LogFormat::Json,
        rotation: RotationConfig::new(max_size, max_files).unwrap(),
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_both_outputs_disabled() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig::default(),
            level: "info".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_directive_levels_are_valid() {
        for level in ["trace", "debug", "info", "warn", "error", "seatwatch=debug,warn"] {
            let config = LoggerConfig::default().with_level(level);
            assert!(config.validate().is_ok(), "Level {} should be valid", level);
        }
    }

    #[test]
    fn test_rotation_config_validation() {
        assert!(RotationConfig::new(1024, 5).is_ok());
        assert!(RotationConfig::new(0, 5).is_err());
        assert!(RotationConfig::new(1024, 0).is_err());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let file = FileConfig {
            enabled: true,
            path: std::path::PathBuf::new(),
            ..FileConfig::default()
        };
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("FULL").unwrap(), LogFormat::Full);
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert_eq!(LogFormat::Compact.as_str(), "compact");
    }
}

mod writer_tests {
    use super::*;

    #[test]
    fn test_writer_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 1024, 2);

        let writer = RotatingFileWriter::new(&config).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"first line\n").unwrap();
        }

        let contents = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(contents, "first line\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_rotates_and_keeps_max_files() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 16, 2);
        let writer = RotatingFileWriter::new(&config).unwrap();

        for line in ["aaaaaaaaaaaa\n", "bbbbbbbbbbbb\n", "cccccccccccc\n", "dddddddddddd\n"] {
            let mut guard = writer.make_writer();
            guard.write_all(line.as_bytes()).unwrap();
        }

        let base = config.path.clone();
        let rotated = |n: usize| {
            let mut name = base.as_os_str().to_owned();
            name.push(format!(".{}", n));
            std::path::PathBuf::from(name)
        };

        assert_eq!(std::fs::read_to_string(&base).unwrap(), "dddddddddddd\n");
        assert_eq!(
            std::fs::read_to_string(rotated(1)).unwrap(),
            "cccccccccccc\n"
        );
        assert_eq!(
            std::fs::read_to_string(rotated(2)).unwrap(),
            "bbbbbbbbbbbb\n"
        );
        assert!(!rotated(3).exists());
    }

    #[test]
    fn test_writer_truncates_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let mut config = file_config(&dir, 1024, 2);
        std::fs::create_dir_all(config.path.parent().unwrap()).unwrap();
        std::fs::write(&config.path, "stale\n").unwrap();
        config.append = false;

        let writer = RotatingFileWriter::new(&config).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"fresh\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "fresh\n");
    }
}
