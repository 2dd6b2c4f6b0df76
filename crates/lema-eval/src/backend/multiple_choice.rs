//! Multiple-choice documents and their MMLU-style prompts

use serde_json::Value;

use crate::hub::Row;

const CHOICE_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoiceDoc {
    pub question: String,
    pub choices: Vec<String>,
    /// Index of the correct choice
    pub answer: usize,
    pub subject: Option<String>,
}

impl MultipleChoiceDoc {
    /// Parse `question`, `choices`, `answer` (index or letter) and optional `subject`
    pub fn from_row(row: &Row) -> Result<Self, String> {
        let question = row
            .get("question")
            .and_then(Value::as_str)
            .ok_or("missing 'question' field")?
            .to_string();

        let choices = row
            .get("choices")
            .and_then(Value::as_array)
            .ok_or("missing 'choices' field")?
            .iter()
            .map(|choice| match choice {
                Value::String(text) => Ok(text.clone()),
                Value::Number(number) => Ok(number.to_string()),
                other => Err(format!("unsupported choice value {}", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if choices.len() < 2 || choices.len() > CHOICE_LABELS.len() {
            return Err(format!(
                "expected between 2 and {} choices, found {}",
                CHOICE_LABELS.len(),
                choices.len()
            ));
        }

        let answer = match row.get("answer") {
            Some(Value::Number(number)) => number
                .as_u64()
                .map(|n| n as usize)
                .ok_or_else(|| format!("invalid answer index {}", number))?,
            Some(Value::String(label)) => parse_answer_label(label)?,
            _ => return Err("missing 'answer' field".to_string()),
        };

        if answer >= choices.len() {
            return Err(format!(
                "answer index {} out of range for {} choices",
                answer,
                choices.len()
            ));
        }

        let subject = row
            .get("subject")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            question,
            choices,
            answer,
            subject,
        })
    }

    /// Question followed by lettered choices, ending in `Answer:`
    pub fn prompt(&self) -> String {
        let mut prompt = self.question.trim().to_string();
        for (label, choice) in CHOICE_LABELS.chars().zip(&self.choices) {
            prompt.push_str(&format!("\n{}. {}", label, choice));
        }
        prompt.push_str("\nAnswer:");
        prompt
    }

    /// Continuations scored for each choice: ` A`, ` B`, ...
    pub fn continuations(&self) -> Vec<String> {
        CHOICE_LABELS
            .chars()
            .take(self.choices.len())
            .map(|label| format!(" {}", label))
            .collect()
    }
}

/// Task description placed before every prompt of a subject
pub fn description(subject: &str) -> String {
    format!(
        "The following are multiple choice questions (with answers) about {}.\n\n",
        subject.replace('_', " ")
    )
}

fn parse_answer_label(label: &str) -> Result<usize, String> {
    let label = label.trim();
    if let Ok(index) = label.parse::<usize>() {
        return Ok(index);
    }
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => CHOICE_LABELS
            .find(c.to_ascii_uppercase())
            .ok_or_else(|| format!("invalid answer label '{}'", label)),
        _ => Err(format!("invalid answer label '{}'", label)),
    }
}
