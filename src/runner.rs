use std::io::{BufRead, Write};

use chrono::Utc;
use color_eyre::Result;

use crate::attempt::{AnswerRejected, Attempt, RunOptions};
use crate::models::{Choice, Question, QuestionSetDocument};
use crate::names;
use crate::score::Report;

/// Administers one attempt over a line-based terminal.
///
/// Per question: `A`-`E` answers, a blank line skips, `q` jumps to
/// submission. The deadline is checked before every prompt and expiry
/// auto-submits, the same transition as a user submit. Input and output are
/// abstract so tests can script a whole session.
pub fn run_attempt<R: BufRead, W: Write>(
    document: &QuestionSetDocument,
    options: RunOptions,
    input: &mut R,
    output: &mut W,
) -> Result<Report> {
    let mut attempt = Attempt::start(document, options);
    let total = attempt.questions().len();

    writeln!(output, "{} - {}", document.metadata.name, document.metadata.subject)?;
    writeln!(
        output,
        "{total} questions • {} minutes • {}",
        document.metadata.time_limit,
        if document.metadata.allow_answer_change {
            "answer changes allowed"
        } else {
            "no answer changes"
        }
    )?;

    let mut index = 0;
    loop {
        if Utc::now() >= attempt.deadline() {
            writeln!(output)?;
            writeln!(output, "Time is up, submitting the test.")?;
            break;
        }

        if index >= total {
            let answered = attempt.answers().len();
            if answered == total {
                break;
            }
            write!(
                output,
                "You have only answered {answered} out of {total} questions. Submit anyway? [y/N] "
            )?;
            output.flush()?;
            let Some(line) = read_line(input)? else { break };
            if line.trim().eq_ignore_ascii_case("y") {
                break;
            }
            // Walk the remaining questions again, starting at the first
            // unanswered one.
            index = (0..total)
                .find(|i| attempt.answer(*i).is_none())
                .unwrap_or(total);
            continue;
        }

        print_question(output, index, total, &attempt.questions()[index], attempt.answer(index))?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else { break };
        let entry = line.trim();

        if entry.is_empty() {
            index += 1;
            continue;
        }
        if entry.eq_ignore_ascii_case("q") {
            index = total;
            continue;
        }
        match Choice::parse(entry) {
            Some(choice) => {
                match attempt.record_answer(index, choice) {
                    Ok(()) => {}
                    Err(AnswerRejected::ChangeNotAllowed { .. }) => {
                        writeln!(output, "Answer changes are not allowed for this test.")?;
                    }
                    Err(other) => {
                        tracing::warn!("answer rejected: {other}");
                        writeln!(output, "{other}")?;
                    }
                }
                index += 1;
            }
            None => {
                writeln!(output, "Enter A-E, a blank line to skip, or q to submit.")?;
            }
        }
    }

    Ok(attempt.submit().clone())
}

fn print_question<W: Write>(
    output: &mut W,
    index: usize,
    total: usize,
    question: &Question,
    current: Option<Choice>,
) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Q{}/{total}: {}", index + 1, question.question)?;
    for choice in Choice::ALL {
        if let Some(text) = question.option_text(choice) {
            writeln!(output, "  {choice}) {text}")?;
        }
    }
    // E is always selectable, even when the author gave it no content.
    if question.option_text(Choice::E).is_none() {
        writeln!(output, "  E) {}", names::NONE_OF_THE_ABOVE)?;
    }
    if let Some(current) = current {
        writeln!(output, "  current answer: {current}")?;
    }
    Ok(())
}

/// Renders the results table the way the results screen lays it out.
pub fn print_report<W: Write>(output: &mut W, report: &Report) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Score: {}%", report.score_percent)?;
    writeln!(
        output,
        "Correct: {}  Incorrect: {}  Unanswered: {}",
        report.correct, report.incorrect, report.unanswered
    )?;
    writeln!(output)?;
    writeln!(output, "{:<6} {:<14} {:<9} Result", "#", "Your answer", "Correct")?;
    for item in &report.detailed {
        let user_answer = item
            .user_answer
            .map(|choice| choice.to_string())
            .unwrap_or_else(|| "-".to_string());
        let outcome = if item.is_correct {
            "correct"
        } else if item.was_answered {
            "incorrect"
        } else {
            "not answered"
        };
        writeln!(
            output,
            "Q{:<5} {:<14} {:<9} {outcome}",
            item.question_number, user_answer, item.correct_answer
        )?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
