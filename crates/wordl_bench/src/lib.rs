//! Benchmark utilities.

use wordl_core::{CategoryWord, FtsIndex, Record, RecordId};

const CATEGORIES: [&str; 8] = [
    "animals", "food", "colors", "places", "tools", "music", "sports", "weather",
];

const SYLLABLES: [&str; 12] = [
    "ka", "to", "mi", "ra", "su", "ne", "lo", "pi", "da", "ve", "zu", "ho",
];

/// Deterministic pseudo-word for index `i`.
pub fn word(i: usize) -> String {
    let mut n = i;
    let mut out = String::new();
    loop {
        out.push_str(SYLLABLES[n % SYLLABLES.len()]);
        n /= SYLLABLES.len();
        if n == 0 {
            break;
        }
    }
    out
}

/// Generates `count` unsaved category words.
pub fn category_words(count: usize) -> Vec<CategoryWord> {
    (0..count)
        .map(|i| CategoryWord::new(CATEGORIES[i % CATEGORIES.len()], word(i)))
        .collect()
}

/// Builds an index over `count` category words with ids 1..=count.
pub fn populated_index(count: usize) -> FtsIndex {
    let mut index = FtsIndex::default();
    for (i, record) in category_words(count).into_iter().enumerate() {
        let id = RecordId::new(i as i64 + 1);
        index.index_fields(id, &record.search_fields());
    }
    index
}
