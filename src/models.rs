use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::names;

/// The five fixed answer-choice labels. `E` is conventionally reserved for
/// an explicit "None of the above" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    pub const ALL: [Choice; 5] = [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    pub fn as_str(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
            Choice::E => "E",
        }
    }

    /// Case-insensitive parse of user input such as `"a"` or `" B "`.
    pub fn parse(input: &str) -> Option<Choice> {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Choice::A),
            "B" => Some(Choice::B),
            "C" => Some(Choice::C),
            "D" => Some(Choice::D),
            "E" => Some(Choice::E),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque identifier; any stable JSON value, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    /// May embed math markup and literal line breaks; passed through as-is.
    pub question: String,
    /// Label-to-content map. A missing key or whitespace-only value is an
    /// absent choice; a question need not use all five labels.
    pub options: BTreeMap<Choice, String>,
    pub correct_answer: Choice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    /// Content for a label, or `None` when the choice is absent.
    pub fn option_text(&self, choice: Choice) -> Option<&str> {
        self.options
            .get(&choice)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    pub fn present_choices(&self) -> Vec<Choice> {
        Choice::ALL
            .into_iter()
            .filter(|choice| self.option_text(*choice).is_some())
            .collect()
    }
}

/// Discriminator for bank items. Its absence in JSON marks a plain question,
/// which is how documents written before banks existed still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum BankTag {
    #[serde(rename = "questionBank")]
    QuestionBank,
}

/// A named pool of interchangeable questions from which a fixed number are
/// drawn per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    #[serde(rename = "type")]
    tag: BankTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: String,
    pub questions_to_select: usize,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(name: impl Into<String>, questions_to_select: usize, questions: Vec<Question>) -> Self {
        QuestionBank {
            tag: BankTag::QuestionBank,
            id: None,
            name: name.into(),
            questions_to_select,
            questions,
        }
    }
}

/// One entry of a document's ordered item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Bank(QuestionBank),
    Question(Question),
}

impl Item {
    /// How many questions this item is declared to contribute to an attempt.
    /// Banks count for `questionsToSelect`, not their pool size.
    pub fn weight(&self) -> usize {
        match self {
            Item::Question(_) => 1,
            Item::Bank(bank) => bank.questions_to_select,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    /// Minutes.
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
    #[serde(default)]
    pub allow_answer_change: bool,
    /// Item-weighted count, stamped on export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

fn default_time_limit() -> u32 {
    names::DEFAULT_TIME_LIMIT_MINUTES
}

/// The complete authored artifact: metadata plus an ordered list of
/// questions and/or question banks. Item order is administration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSetDocument {
    pub metadata: Metadata,
    pub questions: Vec<Item>,
}

impl QuestionSetDocument {
    pub fn from_path(path: &Path) -> Result<QuestionSetDocument> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
        let document = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("{} is not a valid question set", path.display()))?;
        Ok(document)
    }

    /// Pre-expansion question count: one per fixed question plus
    /// `questionsToSelect` per bank.
    pub fn total_questions(&self) -> usize {
        self.questions.iter().map(Item::weight).sum()
    }

    /// Copy with export metadata stamped, matching what the creator writes
    /// when a set is downloaded. Questions missing an id get a fresh one.
    pub fn export(&self) -> QuestionSetDocument {
        let mut document = self.clone();
        document.metadata.total_questions = Some(self.total_questions());
        document.metadata.created_at = Some(Utc::now());
        document.metadata.version = Some(names::FORMAT_VERSION.to_string());

        for item in &mut document.questions {
            match item {
                Item::Question(question) => ensure_id(&mut question.id),
                Item::Bank(bank) => {
                    ensure_id(&mut bank.id);
                    for question in &mut bank.questions {
                        ensure_id(&mut question.id);
                    }
                }
            }
        }

        document
    }
}

fn ensure_id(id: &mut Option<serde_json::Value>) {
    if id.is_none() {
        *id = Some(serde_json::Value::String(Ulid::new().to_string()));
    }
}
