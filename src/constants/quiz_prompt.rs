pub const QUIZ_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Renders the instruction sent to the generator. Deterministic in its inputs.
pub fn build_quiz_prompt(topic: &str, question_count: usize, option_count: usize) -> String {
    format!(
        r#"You are generating a multiple-choice quiz in STRICT JSON ONLY (no markdown, no backticks).

Requirements:
- The quiz must have EXACTLY {question_count} questions.
- Each question must have:
  - "question": string
  - "options": an array of EXACTLY {option_count} answer choices (no more, no fewer).
  - "correct_answer": a string that MUST be one of the elements in "options".

Rules:
- If you are unsure about distractor answers, invent plausible incorrect options, but always return exactly {option_count} options.
- Do NOT include explanations.
- The top-level JSON must be:
  {{
    "questions": [
      {{
        "question": "...",
        "options": ["...", "...", "...", "..."],
        "correct_answer": "..."
      }},
      ...
    ]
  }}

The quiz topic is: {topic}."#
    )
}

/// Short description stored alongside the quiz record.
pub fn quiz_metadata_prompt(topic: &str) -> String {
    format!("This is a quiz about {topic}.")
}
