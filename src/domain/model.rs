use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Fuel station / commune RML mapping shipped with the binary.
pub const BUILTIN_MAPPING: &str = include_str!("../../assets/mapping.ttl");

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// 描述文本的种类决定提示词的引导语
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    #[default]
    Mapping,
    Vocabulary,
}

/// Read-only description of the vocabulary the model may use.
///
/// Cloning only bumps a reference count, so one value can back any number of
/// concurrent translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescription {
    kind: SchemaKind,
    text: Arc<str>,
}

impl SchemaDescription {
    pub fn new(kind: SchemaKind, text: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn mapping(text: impl Into<Arc<str>>) -> Self {
        Self::new(SchemaKind::Mapping, text)
    }

    pub fn vocabulary(text: impl Into<Arc<str>>) -> Self {
        Self::new(SchemaKind::Vocabulary, text)
    }

    pub fn builtin() -> Self {
        Self::mapping(BUILTIN_MAPPING)
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// 守卫策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuardrailMode {
    /// Strip surrounding fences and accept.
    #[default]
    Lenient,
    /// Strip surrounding fences, refuse any fence left inside.
    Strict,
    /// Refuse any fence in the raw response.
    Reject,
}

impl FromStr for GuardrailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown guardrail mode '{}' (expected lenient, strict or reject)",
                other
            )),
        }
    }
}

impl fmt::Display for GuardrailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
            Self::Reject => "reject",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslateOptions {
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub mode: GuardrailMode,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mode: GuardrailMode::default(),
        }
    }
}

/// Schema and question for a single call. Never stored.
#[derive(Debug, Clone)]
pub struct TranslationRequest<'a> {
    pub schema: &'a SchemaDescription,
    pub question: &'a str,
}

// 成功翻译的结果 (用于 --json 输出)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Translation {
    pub question: String,
    pub model: String,
    pub query: String,
}
