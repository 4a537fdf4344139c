//! Natural-language to SPARQL SELECT translation over a fixed RDF mapping,
//! plus the small dataset slicing tools that prepare the mapping's inputs.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::translate::{translate, QueryTranslator};
pub use domain::error::{DatasetError, TranslateError};
pub use domain::model::{
    ChatMessage, GuardrailMode, SchemaDescription, SchemaKind, TranslateOptions, Translation,
};
pub use domain::traits::CompletionBackend;
