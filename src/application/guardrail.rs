// Keyword-level checks on model output. No SPARQL parsing happens here.
use crate::domain::error::TranslateError;
use crate::domain::model::GuardrailMode;

const FENCE: &str = "```";

/// Keywords that turn a query into something other than a read.
pub const DISALLOWED_KEYWORDS: [&str; 5] = ["INSERT", "DELETE", "CONSTRUCT", "ASK", "DESCRIBE"];

/// Words a query can open with; never mistaken for a fence language tag.
const QUERY_OPENERS: [&str; 8] = [
    "SELECT", "PREFIX", "BASE", "ASK", "CONSTRUCT", "DESCRIBE", "INSERT", "DELETE",
];

fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
        && !QUERY_OPENERS.iter().any(|k| tag.eq_ignore_ascii_case(k))
}

/// Remove a surrounding code fence, e.g. "```sparql\n...\n```".
///
/// The word right after the opening marker is dropped as a language tag only
/// when whitespace follows it and it is not a query keyword, which covers
/// both "```sparql\n..." and the one-line "```sparql SELECT ...```". The
/// opening and closing markers are handled independently, so a response that
/// only carries one of them is still cleaned up. Anything inside the body is
/// left alone.
pub fn strip_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.find(char::is_whitespace) {
            Some(end) if is_language_tag(&rest[..end]) => &rest[end..],
            _ => rest,
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Normalize and validate a raw model response.
///
/// Checks run in a fixed order: fence refusal (reject mode), SELECT presence,
/// disallowed keywords, residual fences (strict mode). The first failure wins.
pub fn check_response(raw: &str, mode: GuardrailMode) -> Result<String, TranslateError> {
    let raw = raw.trim();

    if mode == GuardrailMode::Reject && raw.contains(FENCE) {
        return Err(TranslateError::UnexpectedMarkup {
            raw: raw.to_string(),
        });
    }

    let normalized = match mode {
        GuardrailMode::Reject => raw,
        GuardrailMode::Lenient | GuardrailMode::Strict => strip_fences(raw),
    };
    let upper = normalized.to_uppercase();

    if !upper.contains("SELECT") {
        return Err(TranslateError::NotASelectQuery {
            raw: raw.to_string(),
        });
    }

    if let Some(keyword) = DISALLOWED_KEYWORDS.iter().find(|k| upper.contains(*k)) {
        return Err(TranslateError::DisallowedOperation {
            keyword: keyword.to_string(),
            raw: raw.to_string(),
        });
    }

    if mode == GuardrailMode::Strict && normalized.contains(FENCE) {
        return Err(TranslateError::UnexpectedMarkup {
            raw: raw.to_string(),
        });
    }

    Ok(normalized.to_string())
}
