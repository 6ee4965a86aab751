//! Property-based test generators using proptest.
//!
//! Provides strategies for records, query strings, and operation
//! sequences against a sync service.

use proptest::prelude::*;
use wordl_core::CategoryWord;

/// Strategy for lowercase words that survive tokenization unchanged.
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,12}").expect("Invalid regex")
}

/// Strategy for unsaved category words.
pub fn category_word_strategy() -> impl Strategy<Value = CategoryWord> {
    (word_strategy(), word_strategy()).prop_map(|(category, word)| CategoryWord::new(category, word))
}

/// Strategy for arbitrary query strings, including malformed ones.
pub fn query_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z \"*:+\\-]{0,24}").expect("Invalid regex"),
        (word_strategy(), word_strategy()).prop_map(|(a, b)| format!("{a} AND {b}")),
        (word_strategy(), word_strategy()).prop_map(|(a, b)| format!("word:{a}* -{b}")),
        any::<String>(),
    ]
}

/// A single step applied to a sync service.
///
/// `slot` picks among the records created so far, modulo their count.
#[derive(Debug, Clone)]
pub enum SyncOp {
    /// Create a new record.
    Create(CategoryWord),
    /// Replace a previously created record's fields.
    Update {
        /// Which created record to update.
        slot: usize,
        /// New field values (id is filled in by the runner).
        record: CategoryWord,
    },
    /// Delete a previously created record.
    Delete {
        /// Which created record to delete.
        slot: usize,
    },
}

/// Strategy for a single operation.
pub fn sync_op_strategy() -> impl Strategy<Value = SyncOp> {
    prop_oneof![
        3 => category_word_strategy().prop_map(SyncOp::Create),
        2 => (any::<usize>(), category_word_strategy())
            .prop_map(|(slot, record)| SyncOp::Update { slot, record }),
        1 => any::<usize>().prop_map(|slot| SyncOp::Delete { slot }),
    ]
}

/// Strategy for a sequence of operations.
pub fn sync_ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<SyncOp>> {
    prop::collection::vec(sync_op_strategy(), 1..=max_len)
}
