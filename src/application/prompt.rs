use crate::domain::model::{ChatMessage, SchemaKind, TranslationRequest};

pub const SYSTEM_INSTRUCTION: &str =
    "You output ONLY a SPARQL SELECT query. No markdown. No backticks. No explanations.";

fn framing(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Mapping => {
            "This is mapping.ttl. When executed it generates an RDF graph (output.ttl).\n\
             You must query the generated RDF output by generating a SPARQL SELECT query."
        }
        SchemaKind::Vocabulary => {
            "These are the only prefixes, classes and properties present in the RDF graph.\n\
             You must query that graph by generating a SPARQL SELECT query using only this vocabulary."
        }
    }
}

/// Render the user prompt: schema verbatim, framing, instruction, question.
pub fn build_prompt(request: &TranslationRequest<'_>) -> String {
    format!(
        "{}\n\n{}\nReturn only the SPARQL query with the needed prefixes.\nQuestion:\n\"\"\"{}\"\"\"",
        request.schema.text().trim(),
        framing(request.schema.kind()),
        request.question
    )
    .trim()
    .to_string()
}

pub fn build_messages(request: &TranslationRequest<'_>) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(build_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SchemaDescription;

    #[test]
    fn test_prompt_embeds_schema_then_question() {
        let schema = SchemaDescription::builtin();
        let request = TranslationRequest {
            schema: &schema,
            question: "List stations selling E85 fuel and their commune",
        };
        let prompt = build_prompt(&request);

        assert!(prompt.starts_with("@prefix rdf:"));
        assert!(prompt.contains("<#StationsMap> a rr:TriplesMap"));
        assert!(prompt.contains("This is mapping.ttl."));
        assert!(prompt.ends_with("\"\"\"List stations selling E85 fuel and their commune\"\"\""));

        let schema_at = prompt.find("<#CommunesMap>").unwrap();
        let question_at = prompt.find("Question:").unwrap();
        assert!(schema_at < question_at);
    }

    #[test]
    fn test_vocabulary_framing() {
        let schema = SchemaDescription::vocabulary("PREFIX schema: <http://schema.org/>\nschema:City");
        let request = TranslationRequest {
            schema: &schema,
            question: "cities?",
        };
        let prompt = build_prompt(&request);

        assert!(prompt.starts_with("PREFIX schema:"));
        assert!(prompt.contains("only this vocabulary"));
        assert!(!prompt.contains("mapping.ttl"));
    }

    #[test]
    fn test_two_message_exchange() {
        let schema = SchemaDescription::mapping("ex:a ex:b ex:c .");
        let request = TranslationRequest {
            schema: &schema,
            question: "q",
        };
        let messages = build_messages(&request);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, build_prompt(&request));
    }
}
