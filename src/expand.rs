use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Item, Question};

/// Resolves a document's item list into the concrete question sequence for
/// one attempt.
///
/// Fixed questions pass through in place. Each bank contributes
/// `min(questionsToSelect, pool size)` questions drawn uniformly at random
/// without replacement, in draw order, at the bank's position. A full
/// shuffle of a working copy truncated to the selection count makes every
/// ordered subset equally likely; the source pool is never touched.
pub fn expand_items<R: Rng>(items: &[Item], rng: &mut R) -> Vec<Question> {
    let mut expanded = Vec::new();

    for item in items {
        match item {
            Item::Question(question) => expanded.push(question.clone()),
            Item::Bank(bank) => {
                let mut pool = bank.questions.clone();
                pool.shuffle(rng);
                // Oversized selection counts clamp to the pool; stale
                // authoring data must not keep a test from starting.
                pool.truncate(bank.questions_to_select);
                tracing::debug!(
                    "bank '{}' contributed {} of {} questions",
                    bank.name,
                    pool.len(),
                    bank.questions.len()
                );
                expanded.append(&mut pool);
            }
        }
    }

    expanded
}
