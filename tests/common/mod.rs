#![allow(dead_code)]

use scantron::models::{
    Choice, Item, Metadata, Question, QuestionBank, QuestionSetDocument,
};

pub fn question(text: &str, options: &[(Choice, &str)], correct: Choice) -> Question {
    Question {
        id: None,
        question: text.to_string(),
        options: options
            .iter()
            .map(|(choice, content)| (*choice, content.to_string()))
            .collect(),
        correct_answer: correct,
        created_at: None,
    }
}

/// A question with four distinct options, correct answer at `correct`.
pub fn four_option_question(n: usize, correct: Choice) -> Question {
    let options = [
        (Choice::A, format!("Option A{n}")),
        (Choice::B, format!("Option B{n}")),
        (Choice::C, format!("Option C{n}")),
        (Choice::D, format!("Option D{n}")),
    ];
    Question {
        id: None,
        question: format!("Question {n}"),
        options: options.into_iter().collect(),
        correct_answer: correct,
        created_at: None,
    }
}

pub fn make_pool(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| four_option_question(i + 1, Choice::A))
        .collect()
}

pub fn bank(name: &str, questions_to_select: usize, pool: Vec<Question>) -> Item {
    Item::Bank(QuestionBank::new(name, questions_to_select, pool))
}

pub fn metadata() -> Metadata {
    Metadata {
        name: "Practice Set".to_string(),
        subject: "Math".to_string(),
        time_limit: 30,
        allow_answer_change: true,
        total_questions: None,
        created_at: None,
        version: None,
    }
}

pub fn document(items: Vec<Item>) -> QuestionSetDocument {
    QuestionSetDocument {
        metadata: metadata(),
        questions: items,
    }
}
