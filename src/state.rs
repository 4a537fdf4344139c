use crate::application::translate::QueryTranslator;
use crate::domain::error::TranslateError;
use crate::domain::model::{SchemaDescription, SchemaKind, TranslateOptions};
use crate::infrastructure::config::{read_schema, Config};
use crate::infrastructure::network::OpenRouterBackend;
use crate::interfaces::cli::Cli;
use std::sync::Arc;
use std::time::Duration;

/// Resolved configuration for one process run: config file plus CLI overrides.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub schema: SchemaDescription,
    pub options: TranslateOptions,
}

impl AppState {
    pub fn new(config: Config, cli: &Cli) -> Result<Self, TranslateError> {
        let schema = match &cli.schema {
            Some(path) => {
                let kind = if cli.vocabulary {
                    SchemaKind::Vocabulary
                } else {
                    SchemaKind::Mapping
                };
                read_schema(path, kind)?
            }
            None => config.load_schema()?,
        };

        let mut options = config.translate_options();
        if let Some(model) = &cli.model {
            options.model = model.clone();
        }
        if let Some(secs) = cli.timeout {
            options.timeout = Duration::from_secs(secs);
        }
        if let Some(mode) = cli.mode {
            options.mode = mode;
        }

        Ok(Self {
            config,
            schema,
            options,
        })
    }

    /// Wire the HTTP backend. Fails here, not mid-call, when the key is missing.
    pub fn translator(&self) -> Result<QueryTranslator, TranslateError> {
        let backend = OpenRouterBackend::from_config(&self.config.backend)?;
        Ok(QueryTranslator::new(
            Arc::new(backend),
            self.schema.clone(),
            self.options.clone(),
        ))
    }
}
