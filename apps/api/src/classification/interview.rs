//! Interview answers as classifier input.
//!
//! Written answers (or transcripts produced elsewhere) are combined into a
//! single text and sent through the same job-fit pipeline as resumes.

/// Default interview question bank, in presentation order.
pub const INTERVIEW_QUESTIONS: &[&str] = &[
    "Tell me about yourself.",
    "What are your strengths and weaknesses?",
    "Why do you want to work in this role?",
    "Describe a challenging project you worked on.",
    "Where do you see yourself in 5 years?",
];

/// Joins answers with single spaces. Blank answers keep their slot in the
/// join; only the outer whitespace of the result is trimmed.
pub fn combine_answers<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Appends user-selected skills to extracted resume text.
pub fn combine_with_skills<S: AsRef<str>>(text: &str, skills: &[S]) -> String {
    let skills = skills.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(" ");
    format!("{text} {skills}").trim().to_string()
}
