use serde::{Deserialize, Serialize};

/// Structured resume fields as submitted by the builder form.
/// Every section is free text; line breaks inside a section are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub experiences: String,
}

impl ResumeDocument {
    /// Section titles paired with their content, in print order.
    pub fn sections(&self) -> [(&'static str, &str); 4] {
        [
            ("Summary", self.summary.as_str()),
            ("Skills", self.skills.as_str()),
            ("Education", self.education.as_str()),
            ("Experience", self.experiences.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_in_print_order() {
        let doc = ResumeDocument {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            summary: "s".to_string(),
            skills: "k".to_string(),
            education: "e".to_string(),
            experiences: "x".to_string(),
        };
        let titles: Vec<&str> = doc.sections().iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["Summary", "Skills", "Education", "Experience"]);
        assert_eq!(doc.sections()[3].1, "x");
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert!(doc.summary.is_empty());
        assert!(doc.experiences.is_empty());
    }
}
