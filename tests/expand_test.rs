mod common;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{bank, four_option_question, make_pool};
use scantron::expand::expand_items;
use scantron::models::{Choice, Item};

#[test]
fn cardinality_is_item_weighted() {
    let items = vec![
        Item::Question(four_option_question(1, Choice::A)),
        bank("Bank 1", 2, make_pool(5)),
        Item::Question(four_option_question(2, Choice::B)),
        bank("Oversized", 5, make_pool(3)),
        bank("Empty", 2, Vec::new()),
    ];
    let mut rng = StdRng::seed_from_u64(7);

    let expanded = expand_items(&items, &mut rng);

    // 1 + 2 + 1 + min(5, 3) + min(2, 0)
    assert_eq!(expanded.len(), 7);
}

#[test]
fn fixed_questions_keep_their_positions() {
    let opener = four_option_question(100, Choice::C);
    let closer = four_option_question(200, Choice::D);
    let items = vec![
        Item::Question(opener.clone()),
        bank("Middle", 2, make_pool(4)),
        Item::Question(closer.clone()),
    ];
    let mut rng = StdRng::seed_from_u64(3);

    let expanded = expand_items(&items, &mut rng);

    assert_eq!(expanded.len(), 4);
    assert_eq!(expanded[0], opener);
    assert_eq!(expanded[3], closer);
}

#[test]
fn bank_sampling_is_without_replacement() {
    let pool = make_pool(6);
    let pool_texts: HashSet<String> = pool.iter().map(|q| q.question.clone()).collect();
    let items = vec![bank("Bank", 4, pool)];

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let expanded = expand_items(&items, &mut rng);

        assert_eq!(expanded.len(), 4);
        let selected: HashSet<String> = expanded.iter().map(|q| q.question.clone()).collect();
        assert_eq!(selected.len(), 4, "seed {seed} drew a duplicate");
        assert!(selected.is_subset(&pool_texts), "seed {seed} drew outside the pool");
    }
}

#[test]
fn single_draws_are_roughly_uniform() {
    let items = vec![bank("Bank", 1, make_pool(5))];
    let trials = 5000;
    let mut counts = [0u32; 5];

    for seed in 0..trials {
        let mut rng = StdRng::seed_from_u64(seed);
        let expanded = expand_items(&items, &mut rng);
        let text = &expanded[0].question;
        let n: usize = text
            .strip_prefix("Question ")
            .and_then(|s| s.parse().ok())
            .expect("pool question text");
        counts[n - 1] += 1;
    }

    // Expected 1000 per question; the binomial sd is about 28, so these
    // bounds fail with negligible probability.
    for (i, count) in counts.iter().enumerate() {
        assert!(
            (800..=1200).contains(count),
            "question {} drawn {count} times out of {trials}",
            i + 1
        );
    }
}

#[test]
fn same_seed_reproduces_the_expansion() {
    let items = vec![bank("Bank", 3, make_pool(8))];

    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);

    assert_eq!(expand_items(&items, &mut rng_a), expand_items(&items, &mut rng_b));
}

#[test]
fn different_seeds_vary_the_selection() {
    let items = vec![bank("Bank", 3, make_pool(10))];

    let baseline = expand_items(&items, &mut StdRng::seed_from_u64(0));
    let varied = (1..20).any(|seed| {
        expand_items(&items, &mut StdRng::seed_from_u64(seed)) != baseline
    });

    assert!(varied, "20 seeds produced identical selections");
}

#[test]
fn source_items_are_not_mutated() {
    let items = vec![bank("Bank", 2, make_pool(6))];
    let before = items.clone();
    let mut rng = StdRng::seed_from_u64(11);

    expand_items(&items, &mut rng);

    assert_eq!(items, before);
}
