//! Configuration Tests
//!
//! Environment-driven configuration and FAQ file loading.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::brain::DEFAULT_FALLBACK_KEY;
use crate::config::{load_knowledge_file, EngineConfig, LogFormat, DEFAULT_WELCOME_TEXT};
use crate::error::AppError;

const ALL_VARS: &[&str] = &[
    "FAQ_FALLBACK_KEY",
    "FAQ_KNOWLEDGE_PATH",
    "FAQ_WELCOME_TEXT",
    "FAQ_CLASSIFIER_TEMPERATURE",
    "FAQ_CLASSIFIER_TOP_K",
    "FAQ_CLASSIFIER_TOP_P",
    "LOG_FORMAT",
];

#[cfg(test)]
mod env_tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(ALL_VARS.to_vec(), || {
            let config = EngineConfig::from_env().expect("defaults are valid");
            assert_eq!(config.fallback_key, DEFAULT_FALLBACK_KEY);
            assert_eq!(config.knowledge_path, PathBuf::from("data/faq.json"));
            assert_eq!(config.welcome_text, DEFAULT_WELCOME_TEXT);
            assert_eq!(config.classifier.top_k, 3);
            assert_eq!(config.log_format, LogFormat::Pretty);
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            vec![
                ("FAQ_FALLBACK_KEY", Some("home")),
                ("FAQ_KNOWLEDGE_PATH", Some("/srv/faq.json")),
                ("FAQ_CLASSIFIER_TEMPERATURE", Some("0.5")),
                ("FAQ_CLASSIFIER_TOP_K", Some(" 5 ")),
                ("LOG_FORMAT", Some("JSON")),
            ],
            || {
                let config = EngineConfig::from_env().unwrap();
                assert_eq!(config.fallback_key, "home");
                assert_eq!(config.knowledge_path, PathBuf::from("/srv/faq.json"));
                assert!((config.classifier.temperature - 0.5).abs() < f32::EPSILON);
                assert_eq!(config.classifier.top_k, 5);
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        temp_env::with_var("FAQ_CLASSIFIER_TOP_K", Some("three"), || {
            let err = EngineConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().contains("FAQ_CLASSIFIER_TOP_K"));
        });
    }

    #[test]
    fn test_blank_fallback_is_config_error() {
        temp_env::with_var("FAQ_FALLBACK_KEY", Some("  "), || {
            assert!(matches!(EngineConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_unknown_log_format() {
        temp_env::with_var("LOG_FORMAT", Some("xml"), || {
            assert!(matches!(EngineConfig::from_env(), Err(AppError::Config(_))));
        });
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[test]
    fn test_load_knowledge_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "home": {{ "response": "hi" }}, "claim": {{ "response": "go" }} }}"#)
            .unwrap();

        let kb = load_knowledge_file(file.path()).unwrap();
        assert_eq!(kb.len(), 2);
        assert!(kb.contains("claim"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_knowledge_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_validation_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_knowledge_file(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
