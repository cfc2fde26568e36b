use crate::models::domain::{QuestionRecord, QuizDocument};

/// Spreadsheet-style position label: `0 -> A`, `25 -> Z`, `26 -> AA`.
pub fn option_label(position: usize) -> String {
    let mut remaining = position;
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (remaining % 26) as u8));
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }
    letters.iter().rev().collect()
}

pub fn placeholder_option(position: usize, question_index: usize) -> String {
    format!(
        "Placeholder option {} for question {}",
        option_label(position),
        question_index + 1
    )
}

/// Builds a quiz of the requested shape out of labelled placeholders, with
/// the first option of every question marked correct. Never fails; an
/// `option_count` of zero is treated as one.
pub fn synthesize(topic: &str, question_count: usize, option_count: usize) -> QuizDocument {
    let option_count = option_count.max(1);

    let questions = (0..question_count)
        .map(|index| {
            let options: Vec<String> = (0..option_count)
                .map(|position| placeholder_option(position, index))
                .collect();
            let correct_answer = options[0].clone();

            QuestionRecord {
                text: format!("Placeholder question {} about {}", index + 1, topic),
                options,
                correct_answer,
            }
        })
        .collect();

    log::info!(
        "Synthesized placeholder quiz about '{}' with {} questions x {} options",
        topic,
        question_count,
        option_count
    );

    QuizDocument::new(questions)
}
