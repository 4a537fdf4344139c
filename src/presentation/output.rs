use crate::domain::error::TranslateError;
use crate::domain::model::Translation;
use colored::Colorize;
use std::fmt::Write;

/// Stdout payload: the bare query, or the full translation as JSON.
pub fn format_translation(translation: &Translation, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(translation)
    } else {
        Ok(translation.query.clone())
    }
}

/// Stderr report for a failed translation, raw model output included.
pub fn format_error(err: &TranslateError) -> String {
    let mut output = String::new();
    let label = match err {
        TranslateError::Configuration(_) => "configuration",
        TranslateError::EmptyQuestion => "input",
        TranslateError::BackendUnavailable(_)
        | TranslateError::BackendError { .. }
        | TranslateError::MalformedResponse { .. } => "backend",
        TranslateError::NotASelectQuery { .. }
        | TranslateError::DisallowedOperation { .. }
        | TranslateError::UnexpectedMarkup { .. } => "guardrail",
    };

    // Display already carries the raw text; keep the headline on one line.
    let text = err.to_string();
    let (headline, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));
    writeln!(output, "{} {}", format!("✘ [{}]", label).red().bold(), headline.red()).ok();
    for line in rest.lines() {
        writeln!(output, "  {}", line.bright_black()).ok();
    }
    output
}
