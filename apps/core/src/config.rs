//! Engine configuration from environment variables.
//!
//! | Variable                     | Default                     |
//! |------------------------------|-----------------------------|
//! | `FAQ_FALLBACK_KEY`           | `กลับหน้าเริ่มต้น`              |
//! | `FAQ_KNOWLEDGE_PATH`         | `data/faq.json`             |
//! | `FAQ_WELCOME_TEXT`           | built-in greeting           |
//! | `FAQ_CLASSIFIER_TEMPERATURE` | `0.25`                      |
//! | `FAQ_CLASSIFIER_TOP_K`       | `3`                         |
//! | `FAQ_CLASSIFIER_TOP_P`       | `0.3`                       |
//! | `LOG_FORMAT`                 | `pretty` (or `json`)        |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::brain::classifier::ClassifierRequest;
use crate::brain::knowledge::KnowledgeBase;
use crate::brain::resolver::DEFAULT_FALLBACK_KEY;
use crate::error::AppError;

const DEFAULT_KNOWLEDGE_PATH: &str = "data/faq.json";

/// Greeting used when the fallback topic has no text of its own.
pub const DEFAULT_WELCOME_TEXT: &str =
    "ไรโน่ยินดีให้คำปรึกษาครับ กรุณาเลือกหัวข้อที่ต้องการให้ช่วยเหลือได้เลยครับ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown LOG_FORMAT '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub fallback_key: String,
    pub knowledge_path: PathBuf,
    pub welcome_text: String,
    pub classifier: ClassifierRequest,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_key: DEFAULT_FALLBACK_KEY.to_string(),
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
            classifier: ClassifierRequest::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl EngineConfig {
    /// Read the configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let fallback_key = env::var("FAQ_FALLBACK_KEY").unwrap_or(defaults.fallback_key);
        if fallback_key.trim().is_empty() {
            return Err(AppError::Config("FAQ_FALLBACK_KEY must not be empty".to_string()));
        }

        let knowledge_path = env::var("FAQ_KNOWLEDGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.knowledge_path);
        let welcome_text = env::var("FAQ_WELCOME_TEXT").unwrap_or(defaults.welcome_text);

        let classifier = ClassifierRequest {
            temperature: parse_var("FAQ_CLASSIFIER_TEMPERATURE", defaults.classifier.temperature)?,
            top_k: parse_var("FAQ_CLASSIFIER_TOP_K", defaults.classifier.top_k)?,
            top_p: parse_var("FAQ_CLASSIFIER_TOP_P", defaults.classifier.top_p)?,
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.log_format,
        };

        Ok(Self {
            fallback_key,
            knowledge_path,
            welcome_text,
            classifier,
            log_format,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {} '{}': {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

/// Read and parse the FAQ document from disk.
pub fn load_knowledge_file(path: &Path) -> Result<KnowledgeBase, AppError> {
    let raw = fs::read_to_string(path)?;
    let knowledge = KnowledgeBase::from_json_str(&raw)?;
    info!(path = %path.display(), topics = knowledge.len(), "Loaded FAQ document");
    Ok(knowledge)
}
