use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wordfreq_core::{
    aggregate, normalize_text, partition, rank_words, ChunkCounter, FilteredWordCounter,
    FrequencyTable, PartialCount, StopWords, TableSummary, WordFilter,
};

fn init_logging() {
    wordfreq_logging::initialize_for_tests();
}

fn count_sequentially(text: &str, n: usize) -> (FrequencyTable, u64) {
    let counter = FilteredWordCounter::default();
    let normalized = normalize_text(text);
    let partials: Vec<PartialCount> = partition(&normalized, n)
        .unwrap()
        .iter()
        .map(|chunk| counter.count(&chunk.text))
        .collect();
    let pairs = partials.iter().map(PartialCount::pairs).sum();
    (aggregate(partials), pairs)
}

#[test]
fn cat_sat_on_the_mat() {
    init_logging();
    let (table, pairs) = count_sequentially("The cat sat on the mat. The cat ran.", 1);
    let expected: FrequencyTable = [("cat", 2), ("sat", 1), ("mat", 1), ("ran", 1)]
        .into_iter()
        .collect();
    assert_eq!(table, expected);
    assert_eq!(pairs, 5);
}

#[test]
fn empty_text_gives_empty_table() {
    let (table, pairs) = count_sequentially("", 4);
    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
    assert_eq!(pairs, 0);
}

#[test]
fn more_workers_than_words_counts_every_word() {
    let (table, _) = count_sequentially("rabbit watch pocket", 10);
    let expected: FrequencyTable = [("rabbit", 1), ("watch", 1), ("pocket", 1)]
        .into_iter()
        .collect();
    assert_eq!(table, expected);
}

#[test]
fn counter_emits_one_pair_per_eligible_occurrence() {
    let counter = FilteredWordCounter::default();
    let pairs = counter.emit_pairs("the queen the queen said off with his head");
    assert_eq!(
        pairs,
        vec![
            ("queen", 1),
            ("queen", 1),
            ("said", 1),
            ("off", 1),
            ("his", 1),
            ("head", 1)
        ]
    );

    let partial = counter.count("the queen the queen said off with his head");
    assert_eq!(partial.pairs(), 6);
    assert_eq!(partial.get("queen"), Some(2));
    assert_eq!(partial.get("the"), None);
    assert_eq!(partial.unique_words(), 5);
}

#[test]
fn custom_filter_is_respected() {
    let filter = WordFilter::new(5, Arc::new(StopWords::default()));
    let counter = FilteredWordCounter::new(filter);
    let partial = counter.count("the alice alice rabbit hole tea");
    assert_eq!(partial.get("alice"), Some(2));
    assert_eq!(partial.get("rabbit"), Some(1));
    assert_eq!(partial.get("hole"), None);
    assert_eq!(partial.get("the"), None);
    assert_eq!(partial.pairs(), 3);
}

#[test]
fn count_folds_the_emitted_pairs() {
    let counter = FilteredWordCounter::default();
    let chunk = "queen hearts tarts queen knave tarts queen";
    let emitted = counter.emit_pairs(chunk);
    let partial = counter.count(chunk);
    assert_eq!(partial.pairs(), emitted.len() as u64);
    for (word, _) in &emitted {
        let expected = emitted.iter().filter(|(w, _)| w == word).count() as u64;
        assert_eq!(partial.get(word), Some(expected));
    }
    assert_eq!(partial.get("queen"), Some(3));
}

#[test]
fn ranking_orders_by_count_then_word() {
    let table: FrequencyTable = [("tea", 3), ("hatter", 5), ("march", 3), ("hare", 1)]
        .into_iter()
        .collect();
    let ranked = rank_words(&table, 3);
    let rows: Vec<_> = ranked
        .iter()
        .map(|r| (r.rank, r.word.as_str(), r.count))
        .collect();
    assert_eq!(rows, vec![(1, "hatter", 5), (2, "march", 3), (3, "tea", 3)]);

    assert_eq!(rank_words(&table, 100).len(), 4);
    assert!(rank_words(&FrequencyTable::new(), 5).is_empty());
}

#[test]
fn summary_counts_singletons() {
    let table: FrequencyTable = [("tea", 3), ("hatter", 1), ("hare", 1)]
        .into_iter()
        .collect();
    let summary = TableSummary::of(&table);
    assert_eq!(summary.unique_words, 3);
    assert_eq!(summary.total_words, 5);
    assert_eq!(summary.singletons, 2);
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "the", "cat", "sat", "on", "mat", "Rabbit", "hole", "tea,", "a", "queen.", "of",
            "hearts", "42", "was", "alice",
        ]),
        0..120,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn table_sum_equals_emitted_pairs(text in text_strategy(), n in 1usize..9) {
        let (table, pairs) = count_sequentially(&text, n);
        prop_assert_eq!(table.total(), pairs);
    }

    #[test]
    fn filtered_words_never_appear(text in text_strategy(), n in 1usize..9) {
        let (table, _) = count_sequentially(&text, n);
        let stop_words = StopWords::english();
        for (word, count) in table.iter() {
            prop_assert!(word.chars().count() >= 3);
            prop_assert!(!stop_words.contains(word));
            prop_assert!(count > 0);
        }
    }

    #[test]
    fn chunk_count_does_not_change_the_table(text in text_strategy(), n in 1usize..9) {
        let (single, _) = count_sequentially(&text, 1);
        let (many, _) = count_sequentially(&text, n);
        prop_assert_eq!(single, many);
    }

    #[test]
    fn aggregation_ignores_arrival_order(
        (text, order) in text_strategy().prop_flat_map(|text| {
            let order = Just((0..6usize).collect::<Vec<_>>()).prop_shuffle();
            (Just(text), order)
        })
    ) {
        let counter = FilteredWordCounter::default();
        let normalized = normalize_text(&text);
        let partials: Vec<PartialCount> = partition(&normalized, 6)
            .unwrap()
            .iter()
            .map(|chunk| counter.count(&chunk.text))
            .collect();

        let in_order = aggregate(partials.clone());
        let shuffled = aggregate(order.iter().map(|&idx| partials[idx].clone()));
        prop_assert_eq!(in_order, shuffled);
    }
}
