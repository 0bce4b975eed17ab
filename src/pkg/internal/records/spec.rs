use serde::{Deserialize, Serialize};

/// The structured output of one parsed resume. Only ever constructed by
/// decoding the completion service's JSON; a field the model omits stays
/// absent rather than being fabricated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ResumeRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_a_placeholder() {
        let record = ResumeRecord::default();
        assert_eq!(record.display_name(), "<unknown>");
        let named = ResumeRecord {
            name: Some("Ann".into()),
            ..ResumeRecord::default()
        };
        assert_eq!(named.display_name(), "Ann");
    }

    #[test]
    fn null_fields_decode_as_absent() {
        let record: ResumeRecord =
            serde_json::from_str(r#"{"name": null, "skills": ["Rust"]}"#).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.skills, vec!["Rust"]);
    }
}
