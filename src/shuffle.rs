use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Choice, Question};
use crate::names;

/// Randomizes which label holds which answer content, per question, keeping
/// `correctAnswer` pointed at the original correct content. Identity when
/// `enabled` is false.
pub fn shuffle_choices<R: Rng>(questions: Vec<Question>, enabled: bool, rng: &mut R) -> Vec<Question> {
    if !enabled {
        return questions;
    }
    questions
        .into_iter()
        .map(|question| shuffle_question(question, rng))
        .collect()
}

fn shuffle_question<R: Rng>(question: Question, rng: &mut R) -> Question {
    // E-correct questions are structurally fixed: permuting them would break
    // the positional meaning of "none of the above".
    if question.correct_answer == Choice::E {
        return question;
    }

    // Only A-D content moves; E keeps its slot even when it has content.
    let movable: Vec<Choice> = names::MOVABLE_CHOICES
        .into_iter()
        .filter(|choice| question.option_text(*choice).is_some())
        .collect();
    if movable.len() < 2 {
        return question;
    }

    let original_correct = question.options.get(&question.correct_answer).cloned();

    let mut contents: Vec<String> = movable
        .iter()
        .map(|choice| question.options[choice].clone())
        .collect();
    contents.shuffle(rng);

    let mut options = question.options.clone();
    for (label, content) in movable.iter().zip(contents) {
        options.insert(*label, content);
    }

    // The correct answer is wherever the original correct text ended up.
    // With duplicate option text the lowest matching label wins.
    let correct_answer = original_correct
        .and_then(|text| movable.iter().copied().find(|choice| options[choice] == text))
        .unwrap_or(question.correct_answer);

    Question {
        options,
        correct_answer,
        ..question
    }
}
