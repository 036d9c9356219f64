use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::expand::expand_items;
use crate::models::{Choice, Question, QuestionSetDocument};
use crate::score::{score, AnswerMap, Report};
use crate::shuffle::shuffle_choices;

/// Run-time options chosen when a test is started.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub shuffle_choices: bool,
    /// Fixed randomization seed; a random one is drawn when absent.
    pub seed: Option<u64>,
}

/// Why an answer write was refused. Recoverable: the stored answers are
/// unchanged and the attempt continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerRejected {
    /// The document disallows answer changes and this index is already set.
    ChangeNotAllowed { index: usize },
    OutOfRange { index: usize, total: usize },
    AlreadySubmitted,
}

impl fmt::Display for AnswerRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerRejected::ChangeNotAllowed { index } => {
                write!(f, "answer changes are not allowed (question {})", index + 1)
            }
            AnswerRejected::OutOfRange { index, total } => {
                write!(f, "question index {index} is out of range (total {total})")
            }
            AnswerRejected::AlreadySubmitted => write!(f, "the test has already been submitted"),
        }
    }
}

impl std::error::Error for AnswerRejected {}

/// One timed test run: a freshly randomized question sequence fixed at
/// start, the answers collected against it, and the report once submitted.
///
/// There is no shared state between attempts. A retake is a new `start`
/// from the pristine document and always re-randomizes.
pub struct Attempt {
    questions: Vec<Question>,
    answers: AnswerMap,
    allow_answer_change: bool,
    time_limit_minutes: u32,
    seed: u64,
    started_at: DateTime<Utc>,
    report: Option<Report>,
}

impl Attempt {
    /// Expands and (optionally) shuffles the document into this attempt's
    /// fixed question sequence and starts the clock.
    pub fn start(document: &QuestionSetDocument, options: RunOptions) -> Attempt {
        let seed = options.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let expanded = expand_items(&document.questions, &mut rng);
        let questions = shuffle_choices(expanded, options.shuffle_choices, &mut rng);

        tracing::info!(
            "attempt started: {} questions, seed={seed}, shuffle_choices={}",
            questions.len(),
            options.shuffle_choices
        );

        Attempt {
            questions,
            answers: AnswerMap::new(),
            allow_answer_change: document.metadata.allow_answer_change,
            time_limit_minutes: document.metadata.time_limit,
            seed,
            started_at: Utc::now(),
            report: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answer(&self, index: usize) -> Option<Choice> {
        self.answers.get(&index).copied()
    }

    /// The seed this attempt's expansion and shuffle were drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the external countdown should trigger auto-submit.
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at + Duration::minutes(i64::from(self.time_limit_minutes))
    }

    pub fn is_submitted(&self) -> bool {
        self.report.is_some()
    }

    /// Records (or, when allowed, overwrites) the answer for a question.
    pub fn record_answer(&mut self, index: usize, choice: Choice) -> Result<(), AnswerRejected> {
        if self.report.is_some() {
            return Err(AnswerRejected::AlreadySubmitted);
        }
        if index >= self.questions.len() {
            return Err(AnswerRejected::OutOfRange {
                index,
                total: self.questions.len(),
            });
        }
        if !self.allow_answer_change && self.answers.contains_key(&index) {
            return Err(AnswerRejected::ChangeNotAllowed { index });
        }
        self.answers.insert(index, choice);
        Ok(())
    }

    /// Freezes answers and scores the attempt. User submission and timer
    /// expiry both land here; repeated calls return the same report.
    pub fn submit(&mut self) -> &Report {
        let questions = &self.questions;
        let answers = &self.answers;
        self.report.get_or_insert_with(|| {
            let report = score(questions, answers);
            tracing::info!(
                "attempt submitted: {}/{} correct ({}%)",
                report.correct,
                report.total,
                report.score_percent
            );
            report
        })
    }
}
