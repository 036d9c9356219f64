use std::fmt;

use crate::models::{Choice, Item, Question, QuestionSetDocument};

/// Where inside the item list a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 0-based index into the document's item list.
    pub item: usize,
    /// Set when the question lives inside a bank's pool.
    pub in_bank: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.in_bank {
            Some(inner) => write!(f, "item {}, bank question {}", self.item + 1, inner + 1),
            None => write!(f, "item {}", self.item + 1),
        }
    }
}

/// A malformed document. Validation is all-or-nothing: the first problem
/// rejects the document before any attempt can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingSubject,
    ZeroTimeLimit,
    NoQuestions,
    EmptyQuestionText { location: Location },
    NoOptions { location: Location },
    /// `correctAnswer` points at an absent option. Never raised for E,
    /// which stays valid as "none of the above" even with no content.
    MissingCorrectOption { location: Location, answer: Choice },
    ZeroSelectCount { item: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "question set name is empty"),
            ValidationError::MissingSubject => write!(f, "subject is empty"),
            ValidationError::ZeroTimeLimit => write!(f, "time limit must be at least 1 minute"),
            ValidationError::NoQuestions => write!(f, "question set contains no questions"),
            ValidationError::EmptyQuestionText { location } => {
                write!(f, "{location}: question text is empty")
            }
            ValidationError::NoOptions { location } => {
                write!(f, "{location}: question has no answer options")
            }
            ValidationError::MissingCorrectOption { location, answer } => {
                write!(f, "{location}: correct answer {answer} has no content")
            }
            ValidationError::ZeroSelectCount { item } => {
                write!(f, "item {}: bank must select at least 1 question", item + 1)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks a loaded document before an attempt may start.
pub fn validate_document(document: &QuestionSetDocument) -> Result<(), ValidationError> {
    if document.metadata.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if document.metadata.subject.trim().is_empty() {
        return Err(ValidationError::MissingSubject);
    }
    if document.metadata.time_limit < 1 {
        return Err(ValidationError::ZeroTimeLimit);
    }
    if document.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    for (index, item) in document.questions.iter().enumerate() {
        match item {
            Item::Question(question) => {
                validate_question(question, Location { item: index, in_bank: None })?;
            }
            Item::Bank(bank) => {
                if bank.questions_to_select < 1 {
                    return Err(ValidationError::ZeroSelectCount { item: index });
                }
                for (inner, question) in bank.questions.iter().enumerate() {
                    validate_question(question, Location { item: index, in_bank: Some(inner) })?;
                }
            }
        }
    }

    Ok(())
}

fn validate_question(question: &Question, location: Location) -> Result<(), ValidationError> {
    if question.question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestionText { location });
    }
    if question.present_choices().is_empty() {
        return Err(ValidationError::NoOptions { location });
    }
    if question.correct_answer != Choice::E && question.option_text(question.correct_answer).is_none() {
        return Err(ValidationError::MissingCorrectOption {
            location,
            answer: question.correct_answer,
        });
    }
    Ok(())
}
