//! Repairs loosely-followed generator output into a [`QuizDocument`].
//!
//! Every returned question has exactly `option_count` distinct options and
//! its `correct_answer` is one of them. Options are trimmed, the correct
//! answer is kept exactly as generated.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    errors::PipelineError,
    models::domain::{QuestionRecord, QuizDocument},
    services::fallback::placeholder_option,
};

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x1F]+").expect("CONTROL_CHARS is a valid regex pattern")
});

/// Result of reading generator text, before any fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Valid(QuizDocument),
    Malformed(String),
}

impl ParseOutcome {
    pub fn into_result(self) -> Result<QuizDocument, PipelineError> {
        match self {
            ParseOutcome::Valid(document) => Ok(document),
            ParseOutcome::Malformed(reason) => Err(PipelineError::MalformedDocument(reason)),
        }
    }
}

pub fn normalize(raw_text: &str, option_count: usize) -> Result<QuizDocument, PipelineError> {
    parse(raw_text, option_count).into_result()
}

pub fn parse(raw_text: &str, option_count: usize) -> ParseOutcome {
    let option_count = option_count.max(1);

    let value = match extract_object(raw_text) {
        Ok(value) => value,
        Err(reason) => return ParseOutcome::Malformed(reason),
    };

    let entries = match value.get("questions").and_then(Value::as_array) {
        Some(entries) => entries,
        None => {
            return ParseOutcome::Malformed(
                "top-level 'questions' field is missing or not an array".into(),
            )
        }
    };

    if entries.is_empty() {
        return ParseOutcome::Malformed("'questions' array is empty".into());
    }

    let questions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| repair_question(entry, index, option_count))
        .collect();

    ParseOutcome::Valid(QuizDocument::new(questions))
}

/// Reads the quiz object out of generator text. Only fences wrapping the
/// whole answer are removed; text before the object and anything after its
/// closing brace is ignored.
fn extract_object(raw_text: &str) -> Result<Value, String> {
    let cleaned = CONTROL_CHARS.replace_all(strip_fences(raw_text), " ");

    let mut first_error = None;
    for (start, _) in cleaned.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&cleaned[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) if value.get("questions").is_some() => return Ok(value),
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| format!("invalid JSON: {e}"));
            }
            None => {}
        }
    }

    Err(first_error.unwrap_or_else(|| "no quiz object found in generated text".to_string()))
}

fn strip_fences(raw_text: &str) -> &str {
    let mut body = raw_text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn repair_question(entry: &Value, index: usize, option_count: usize) -> QuestionRecord {
    let text = entry
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let mut options = clean_options(entry.get("options"));

    let correct = entry
        .get("correct_answer")
        .and_then(Value::as_str)
        .filter(|answer| !answer.is_empty())
        .map(str::to_string);

    if let Some(answer) = &correct {
        if !options.contains(answer) {
            log::debug!("Question {}: correct answer missing from options, inserting it", index + 1);
            options.insert(0, answer.clone());
        }
    }

    dedup_in_order(&mut options);

    if options.len() > option_count {
        log::debug!(
            "Question {}: truncating {} options to {}",
            index + 1,
            options.len(),
            option_count
        );
        options.truncate(option_count);
    }

    pad_with_placeholders(&mut options, option_count, index);

    let correct_answer = match correct {
        Some(answer) => {
            if !options.contains(&answer) {
                if let Some(first) = options.first_mut() {
                    *first = answer.clone();
                }
            }
            answer
        }
        None => {
            log::warn!("Question {} has no usable correct answer, using its first option", index + 1);
            options.first().cloned().unwrap_or_default()
        }
    };

    QuestionRecord {
        text,
        options,
        correct_answer,
    }
}

fn clean_options(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn dedup_in_order(options: &mut Vec<String>) {
    let mut seen = HashSet::new();
    options.retain(|option| seen.insert(option.clone()));
}

fn pad_with_placeholders(options: &mut Vec<String>, option_count: usize, question_index: usize) {
    let mut position = options.len();
    while options.len() < option_count {
        let placeholder = placeholder_option(position, question_index);
        if !options.contains(&placeholder) {
            options.push(placeholder);
        }
        position += 1;
    }
}
