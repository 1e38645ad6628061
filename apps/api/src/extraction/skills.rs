//! Skill Tagger: fixed-vocabulary, case-insensitive substring matching.
//!
//! Matching is plain containment on the lower-cased text, with no tokenization
//! and no word boundaries, so `"javascript"` also yields `java`. Callers
//! depend on this output; it is part of the contract.

/// Default vocabulary, in output order.
pub const DEFAULT_SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "pandas",
    "tensorflow",
    "react",
    "django",
    "flask",
];

#[derive(Debug, Clone)]
pub struct SkillTagger {
    vocabulary: Vec<String>,
}

impl Default for SkillTagger {
    fn default() -> Self {
        Self::with_vocabulary(DEFAULT_SKILL_VOCABULARY.iter().copied())
    }
}

impl SkillTagger {
    /// Terms are lower-cased once here so `tag` only lower-cases the input text.
    pub fn with_vocabulary<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns every vocabulary term found in `text`, in vocabulary order.
    pub fn tag(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

/// Tags `text` against the default vocabulary.
pub fn tag_skills(text: &str) -> Vec<String> {
    SkillTagger::default().tag(text)
}
