use crate::models::SessionContentKind;

pub const NAMES_PROMPT: &str = "Extract the list of student names from this image. Return ONLY the names, one per line. Do not include numbers, grades, dates, or headers. Just the First and Last names.";

pub const GRADES_PROMPT: &str = "Analyze this image of a grade sheet (handwritten or printed).
Extract the student names and their scores for Term 1, Term 2, and Term 3 (if available).
If a note is missing, use 0.";

/// Build the free-text prompt for a session topic
pub fn build_session_prompt(topic: &str, kind: SessionContentKind) -> String {
    match kind {
        SessionContentKind::Description => format!(
            "Create a short, engaging description for a physical education session about \"{}\". Include 3 key learning objectives. Keep it under 150 words.",
            topic
        ),
        SessionContentKind::Quiz => format!(
            "Create 3 multiple choice exam questions for a PE class session about \"{}\". Include the correct answer. Format as simple text.",
            topic
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_differ_and_quote_topic() {
        let description = build_session_prompt("Basketball dribbling", SessionContentKind::Description);
        let quiz = build_session_prompt("Basketball dribbling", SessionContentKind::Quiz);

        assert_ne!(description, quiz);
        assert!(description.contains("\"Basketball dribbling\""));
        assert!(quiz.contains("\"Basketball dribbling\""));
        assert!(description.contains("3 key learning objectives"));
        assert!(quiz.contains("multiple choice"));
    }
}
