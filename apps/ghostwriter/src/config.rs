use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::learning::reviewer::{DEFAULT_INFREQUENT_BELOW, DEFAULT_LONG_SENTENCE_FACTOR};
use crate::learning::trigger::{DEFAULT_MIN_FINAL_DOCUMENTS, DEFAULT_MIN_TOTAL_WORDS};
use crate::learning::{ReviewSettings, TriggerPolicy};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Draft generation is disabled when absent.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub docs_dir: PathBuf,
    pub style_guide_path: PathBuf,
    pub trigger: TriggerPolicy,
    pub review: ReviewSettings,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openai_model: env_or("OPENAI_MODEL", crate::llm_client::DEFAULT_MODEL),
            docs_dir: PathBuf::from(env_or("DOCS_DIR", "docs")),
            style_guide_path: PathBuf::from(env_or("STYLE_GUIDE_PATH", "style_guide.txt")),
            trigger: TriggerPolicy {
                min_final_documents: parse_env(
                    "LEARNING_MIN_FINAL_DOCS",
                    DEFAULT_MIN_FINAL_DOCUMENTS,
                )?,
                min_total_words: parse_env("LEARNING_MIN_TOTAL_WORDS", DEFAULT_MIN_TOTAL_WORDS)?,
            },
            review: ReviewSettings {
                long_sentence_factor: parse_env(
                    "REVIEW_LONG_SENTENCE_FACTOR",
                    DEFAULT_LONG_SENTENCE_FACTOR,
                )?,
                infrequent_below: parse_env("REVIEW_INFREQUENT_BELOW", DEFAULT_INFREQUENT_BELOW)?,
            },
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("GHOSTWRITER_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_value_reads_and_rejects() {
        let value: f64 =
            parse_value("REVIEW_LONG_SENTENCE_FACTOR", Some(" 2.5 ".to_string()), 1.5).unwrap();
        assert_eq!(value, 2.5);

        let err = parse_value::<usize>("LEARNING_MIN_TOTAL_WORDS", Some("lots".to_string()), 10)
            .unwrap_err();
        assert!(err.to_string().contains("LEARNING_MIN_TOTAL_WORDS"));
    }

    #[test]
    fn test_parse_value_defaults_when_absent() {
        let value: u16 = parse_value("PORT", None, 8080).unwrap();
        assert_eq!(value, 8080);
    }
}
