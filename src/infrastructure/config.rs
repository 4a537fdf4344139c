use crate::domain::error::TranslateError;
use crate::domain::model::{
    GuardrailMode, SchemaDescription, SchemaKind, TranslateOptions, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub mode: GuardrailMode,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    pub http_proxy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SchemaConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub kind: SchemaKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
            http_proxy: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GuardrailMode::default(),
            backend: BackendConfig::default(),
            schema: SchemaConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

impl Config {
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            model: self.backend.model.clone(),
            temperature: self.backend.temperature,
            timeout: Duration::from_secs(self.backend.timeout_secs),
            mode: self.mode,
        }
    }

    /// Resolve the schema: the configured file if any, the built-in mapping otherwise.
    pub fn load_schema(&self) -> Result<SchemaDescription, TranslateError> {
        match self.schema.path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => read_schema(Path::new(path), self.schema.kind),
            None => Ok(SchemaDescription::builtin()),
        }
    }
}

pub fn read_schema(path: &Path, kind: SchemaKind) -> Result<SchemaDescription, TranslateError> {
    let text = fs::read_to_string(path).map_err(|e| {
        TranslateError::Configuration(format!(
            "Cannot read schema file {}: {}",
            path.display(),
            e
        ))
    })?;
    if text.trim().is_empty() {
        return Err(TranslateError::Configuration(format!(
            "Schema file {} is empty",
            path.display()
        )));
    }
    Ok(SchemaDescription::new(kind, text))
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nl2sparql").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn load_config() -> Result<Config, TranslateError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                TranslateError::Configuration(format!("Failed to read {}: {}", path.display(), e))
            })?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), TranslateError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TranslateError::Configuration(format!("Failed to create config dir: {}", e))
            })?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample).map_err(|e| {
            TranslateError::Configuration(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(&path, toml_content).map_err(|e| {
            TranslateError::Configuration(format!("Failed to write config file: {}", e))
        })?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(TranslateError::Configuration(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.backend.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.mode, GuardrailMode::Lenient);
    }

    #[test]
    fn test_translate_options_follow_config() {
        let config = parse_config(
            r#"
mode = "strict"

[backend]
model = "mistralai/mistral-small"
temperature = 0.2
timeout_secs = 5
"#,
        )
        .unwrap();
        let options = config.translate_options();

        assert_eq!(options.model, "mistralai/mistral-small");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.mode, GuardrailMode::Strict);
        assert!((options.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_schema_defaults_to_builtin_mapping() {
        let schema = Config::default().load_schema().unwrap();
        assert_eq!(schema.kind(), SchemaKind::Mapping);
        assert!(schema.text().contains("rr:TriplesMap"));
    }

    #[test]
    fn test_schema_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PREFIX schema: <http://schema.org/>\nschema:GasStation").unwrap();

        let mut config = Config::default();
        config.schema.path = Some(file.path().display().to_string());
        config.schema.kind = SchemaKind::Vocabulary;

        let schema = config.load_schema().unwrap();
        assert_eq!(schema.kind(), SchemaKind::Vocabulary);
        assert!(schema.text().contains("schema:GasStation"));
    }

    #[test]
    fn test_missing_schema_file_is_configuration_error() {
        let err = read_schema(Path::new("/nonexistent/vocab.txt"), SchemaKind::Vocabulary)
            .unwrap_err();
        assert!(matches!(err, TranslateError::Configuration(_)));
    }

    #[test]
    fn test_sample_round_trips_through_toml() {
        let sample = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(sample.contains("[backend]"));
        assert_eq!(parse_config(&sample).unwrap(), Config::default());
    }
}
