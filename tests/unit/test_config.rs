//! Unit tests for the config module
//!
//! Tests cover:
//! - OverflowPolicy enum
//! - StageConfig defaults
//! - Loading from a TOML file

use static_fifo::config::{OverflowPolicy, StageConfig, OVERFLOW_ENV_VAR};
use std::io::Write;
use tempfile::NamedTempFile;

// ============================================================================
// OverflowPolicy Tests
// ============================================================================

mod overflow_policy_tests {
    use super::*;

    #[test]
    fn test_default_is_reject() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Reject);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", OverflowPolicy::Overwrite), "overwrite");
        assert_eq!(format!("{}", OverflowPolicy::Truncate), "truncate");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("REJECT".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Reject);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OverflowPolicy::Overwrite).unwrap();
        assert_eq!(json, "\"overwrite\"");
    }
}

// ============================================================================
// File Loading Tests
// ============================================================================

mod load_tests {
    use super::*;

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "overflow = \"truncate\"\nhigh_watermark = 0.9").unwrap();

        let config = StageConfig::load_with_override(file.path().to_str(), None).unwrap();
        assert_eq!(config.overflow, OverflowPolicy::Truncate);
        assert_eq!(config.high_watermark, 0.9);
        assert!(config.trace_events);
    }

    #[test]
    fn test_load_env_override_beats_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "overflow = \"truncate\"").unwrap();

        let config =
            StageConfig::load_with_override(file.path().to_str(), Some("overwrite")).unwrap();
        assert_eq!(config.overflow, OverflowPolicy::Overwrite);
    }

    #[test]
    fn test_load_bad_env_override_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "high_watermark = 0.5").unwrap();

        let err = StageConfig::load_with_override(file.path().to_str(), Some("spill")).unwrap_err();
        assert!(err.to_string().contains("STATIC_FIFO_OVERFLOW"));
    }

    #[test]
    fn test_load_reads_env_variable() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "overflow = \"reject\"").unwrap();

        std::env::set_var(OVERFLOW_ENV_VAR, "truncate");
        let result = StageConfig::load(file.path().to_str());
        std::env::remove_var(OVERFLOW_ENV_VAR);

        assert_eq!(result.unwrap().overflow, OverflowPolicy::Truncate);
    }

    #[test]
    fn test_load_missing_path_fails() {
        let err = StageConfig::load(Some("/nonexistent/static-fifo.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read stage config"));
    }

    #[test]
    fn test_load_malformed_toml_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "overflow = [").unwrap();

        let err = StageConfig::load(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse stage config"));
    }

    #[test]
    fn test_load_invalid_watermark_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "high_watermark = 2.0").unwrap();
        assert!(StageConfig::load(file.path().to_str()).is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = StageConfig {
            overflow: OverflowPolicy::Overwrite,
            high_watermark: 0.5,
            trace_events: false,
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed = StageConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
