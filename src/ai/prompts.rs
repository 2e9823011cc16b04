// src/ai/prompts.rs

//! Prompt templates sent to the language model.

pub fn quiz_prompt(topic: &str, level: &str, num_questions: u32) -> String {
    format!(
        r#"You are an expert quiz generator.
Generate {num_questions} multiple choice questions on the topic: "{topic}"
for a student at the {level} level.
Format as JSON like this, with 0-based indexing for the correct answer:
{{
  "quiz": [
    {{
      "id": 1,
      "question": "Which of the following is NOT a JavaScript data type?",
      "options": ["String", "Boolean", "Float", "Object"],
      "correctAnswer": 2,
      "explanation": "JavaScript has a Number type (integers and floating-point), not a separate Float type."
    }}
  ]
}}
Return the quiz in VALID JSON format, with all field names and strings enclosed in double quotes."#
    )
}

pub fn explanation_prompt(topic: &str, level: &str) -> String {
    format!(
        r#"Explain the topic "{topic}" in a simple and clear way suitable for a student in {level}.
Keep the explanation short, easy to understand, and focused."#
    )
}

/// Single-pass summary of a whole document.
pub fn summary_prompt(text: &str, language: &str) -> String {
    format!(
        r#"You are a helpful assistant. Summarize the following content in {language} language.
Keep the summary clear, concise, and ~300 words.

Content:
{text}
"#
    )
}

/// Map step of the map-reduce chain, run once per chunk.
pub fn chunk_summary_prompt(text: &str) -> String {
    format!("Please summarize the below text:\n\n{text}\n\nSummary:\n")
}

/// Reduce step over the joined chunk summaries.
pub fn combine_prompt(text: &str, language: &str) -> String {
    format!(
        r#"Provide the final summary with important points.
Add a Title, intro, and present the summary as numbered points in {language}.

Content:
{text}
"#
    )
}
