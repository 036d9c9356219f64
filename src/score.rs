use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Choice, Question};

/// Sparse answers for one attempt: 0-based question index to selected label.
/// A missing entry means unanswered.
pub type AnswerMap = BTreeMap<usize, Choice>;

/// Scoring report for a submitted attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub total: usize,
    pub score_percent: u32,
    pub detailed: Vec<QuestionResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    /// 1-based, in administration order.
    pub question_number: usize,
    /// `None` marks an unanswered question.
    pub user_answer: Option<Choice>,
    pub correct_answer: Choice,
    pub is_correct: bool,
    pub was_answered: bool,
}

/// Scores an attempt. Pure: the same inputs always produce the same report.
///
/// A zero-length question list is an upstream precondition violation
/// (validation requires at least one question); it is guarded to a 0% score
/// rather than dividing by zero.
pub fn score(questions: &[Question], answers: &AnswerMap) -> Report {
    let mut correct = 0;
    let mut incorrect = 0;
    let mut detailed = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let user_answer = answers.get(&index).copied();
        let is_correct = user_answer == Some(question.correct_answer);

        match user_answer {
            Some(_) if is_correct => correct += 1,
            Some(_) => incorrect += 1,
            None => {}
        }

        detailed.push(QuestionResult {
            question_number: index + 1,
            user_answer,
            correct_answer: question.correct_answer,
            is_correct,
            was_answered: user_answer.is_some(),
        });
    }

    let total = questions.len();
    let score_percent = if total == 0 {
        0
    } else {
        (correct as f64 * 100.0 / total as f64).round() as u32
    };

    Report {
        correct,
        incorrect,
        unanswered: total - correct - incorrect,
        total,
        score_percent,
        detailed,
    }
}
