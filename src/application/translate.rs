use crate::application::guardrail::check_response;
use crate::application::prompt::build_messages;
use crate::domain::error::TranslateError;
use crate::domain::model::{SchemaDescription, TranslateOptions, Translation, TranslationRequest};
use crate::domain::traits::CompletionBackend;
use std::sync::Arc;
use tracing::{debug, warn};

/// One-shot question to SPARQL SELECT transform.
///
/// Builds the prompt, makes exactly one backend call bounded by
/// `options.timeout`, and runs the guardrails on the reply. Nothing is
/// retried.
pub async fn translate(
    backend: &dyn CompletionBackend,
    question: &str,
    schema: &SchemaDescription,
    options: &TranslateOptions,
) -> Result<String, TranslateError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(TranslateError::EmptyQuestion);
    }

    let request = TranslationRequest { schema, question };
    let messages = build_messages(&request);
    debug!(
        "Built prompt ({} bytes) for model {}",
        messages[1].content.len(),
        options.model
    );

    let raw = tokio::time::timeout(options.timeout, backend.complete(&messages, options))
        .await
        .map_err(|_| {
            TranslateError::BackendUnavailable(format!(
                "no response within {}s",
                options.timeout.as_secs_f32()
            ))
        })??;

    check_response(&raw, options.mode).inspect_err(|e| warn!("Rejected model output: {}", e))
}

/// Translator bound to one backend, schema and option set.
#[derive(Clone)]
pub struct QueryTranslator {
    backend: Arc<dyn CompletionBackend>,
    schema: SchemaDescription,
    options: TranslateOptions,
}

impl QueryTranslator {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        schema: SchemaDescription,
        options: TranslateOptions,
    ) -> Self {
        Self {
            backend,
            schema,
            options,
        }
    }

    pub fn schema(&self) -> &SchemaDescription {
        &self.schema
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    pub async fn translate(&self, question: &str) -> Result<Translation, TranslateError> {
        let query = translate(self.backend.as_ref(), question, &self.schema, &self.options).await?;
        Ok(Translation {
            question: question.trim().to_string(),
            model: self.options.model.clone(),
            query,
        })
    }
}
