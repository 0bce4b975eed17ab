use std::sync::Arc;

use crate::{
    pkg::internal::{ai::client::Client, records::spec::ResumeRecord},
    prelude::{Error, Result},
};

const PARSE_PROMPT: &str = r#"You are a resume parser. Extract the resume below into JSON with these fields:
- name
- email
- phone
- education: list of {institution, degree, start, end}
- experience: list of {company, position, start, end, summary}
- skills: list of strings

you will output only valid JSON, never markdown, never text explanations.
Always ensure the output is syntactically valid JSON.
Do not add comments, trailing commas, or extra whitespace."#;

pub fn build_prompt(text: &str) -> String {
    format!("{}\n\nRESUME:\n{}", PARSE_PROMPT, text)
}

pub fn decode_record(raw: &str) -> Result<ResumeRecord> {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(cleaned)
        .map_err(|e| Error::Parse(format!("completion does not fit the record shape: {}", e)))
}

#[async_trait::async_trait]
pub trait ParseOps {
    async fn parse_resume(&self, text: &str) -> Result<ResumeRecord>;
}

#[async_trait::async_trait]
impl ParseOps for Arc<Client> {
    async fn parse_resume(&self, text: &str) -> Result<ResumeRecord> {
        let response = self.chat_completion(&build_prompt(text)).await?;
        tracing::debug!("model response: \n {}", &response);
        decode_record(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_the_resume_text_after_the_delimiter() {
        let prompt = build_prompt("Ann Example\nRust developer");
        assert!(prompt.ends_with("RESUME:\nAnn Example\nRust developer"));
        for field in ["name", "email", "phone", "education", "experience", "skills"] {
            assert!(prompt.contains(field), "prompt is missing field {}", field);
        }
    }

    #[test]
    fn clean_json_decodes_into_a_record() {
        let record = decode_record(
            r#"{"name": "Ann", "email": "ann@example.com", "skills": ["Go", "SQL"]}"#,
        )
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("Ann"));
        assert_eq!(record.email.as_deref(), Some("ann@example.com"));
        assert_eq!(record.skills, vec!["Go", "SQL"]);
    }

    #[test]
    fn markdown_fences_are_stripped_before_decoding() {
        let record = decode_record("```json\n{\"name\": \"Ann\"}\n```").unwrap();
        assert_eq!(record.name.as_deref(), Some("Ann"));
    }

    #[test]
    fn missing_fields_decode_as_absent() {
        let record = decode_record("{}").unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.email, None);
        assert_eq!(record.phone, None);
        assert!(record.education.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
        assert_eq!(record.filename, "");
    }

    #[test]
    fn nested_entries_decode_with_partial_fields() {
        let record = decode_record(
            r#"{
                "education": [{"institution": "MIT", "degree": "BSc"}],
                "experience": [{"company": "Acme", "summary": "built things"}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.education[0].institution.as_deref(), Some("MIT"));
        assert_eq!(record.education[0].start, None);
        assert_eq!(record.experience[0].company.as_deref(), Some("Acme"));
        assert_eq!(record.experience[0].position, None);
    }

    #[test]
    fn non_json_completion_is_a_parse_error() {
        let err = decode_record("Sure! Here is the parsed resume:").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn wrong_shape_completion_is_a_parse_error() {
        let err = decode_record(r#"{"education": "MIT"}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
