//! Query-string translation.
//!
//! Admin clients send free-text query strings in the Lucene `query_string`
//! style. This module parses the subset the admin UI uses into a
//! [`SearchQuery`] and evaluates it against an [`FtsIndex`].
//!
//! Supported syntax:
//!
//! | Input            | Meaning                                   |
//! |------------------|-------------------------------------------|
//! | `cat dog`        | either term (default operator is OR)      |
//! | `word:cat`       | term restricted to one field              |
//! | `ca*`            | prefix                                    |
//! | `"big cat"`      | every token of the phrase                 |
//! | `+cat` / `-cat`  | required / excluded                       |
//! | `a AND b`        | both required                             |
//! | `a OR b`         | either                                    |
//! | `NOT a`          | excluded                                  |
//! | `*`              | every document                            |
//!
//! Phrases match on token presence only; the index keeps no positions.

use super::fts::{FtsIndex, TokenizerConfig};
use crate::error::{IndexError, IndexResult};
use crate::types::RecordId;
use std::collections::HashSet;

/// How a clause takes part in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// Must match.
    Must,
    /// Contributes matches when no clause is required.
    Should,
    /// Must not match.
    MustNot,
}

/// What a clause matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Every indexed document.
    All,
    /// Documents containing every token; the last token may be a prefix.
    Tokens {
        /// Normalized tokens.
        tokens: Vec<String>,
        /// Whether the last token is matched as a prefix.
        prefix: bool,
    },
}

/// A single parsed clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Participation.
    pub occur: Occur,
    /// Field restriction.
    pub field: Option<String>,
    /// Match target.
    pub matcher: Matcher,
}

/// A parsed query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    clauses: Vec<Clause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Not,
}

enum Lexeme {
    Operator(Operator),
    Clause(String),
}

impl SearchQuery {
    /// Parses a query string using the index's tokenizer.
    ///
    /// An empty or blank query parses to a query with no clauses, which
    /// matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MalformedQuery`] for unterminated quotes,
    /// dangling operators, and clauses with nothing to match.
    pub fn parse(input: &str, tokenizer: &TokenizerConfig) -> IndexResult<Self> {
        let lexemes = lex(input)?;
        let mut clauses: Vec<Clause> = Vec::new();
        let mut pending: Option<Operator> = None;

        for lexeme in lexemes {
            match lexeme {
                Lexeme::Operator(op) => {
                    match (pending, op) {
                        (None, Operator::Not) => {}
                        (None, _) if clauses.is_empty() => {
                            return Err(IndexError::malformed_query(format!(
                                "query cannot start with {op:?}"
                            )));
                        }
                        (Some(Operator::And | Operator::Or), Operator::Not) => {}
                        (Some(prev), _) => {
                            return Err(IndexError::malformed_query(format!(
                                "{op:?} cannot follow {prev:?}"
                            )));
                        }
                        (None, _) => {}
                    }
                    if op == Operator::And {
                        if let Some(last) = clauses.last_mut() {
                            if last.occur == Occur::Should {
                                last.occur = Occur::Must;
                            }
                        }
                    }
                    // `a AND NOT b` keeps the NOT as the pending operator.
                    pending = Some(op);
                }
                Lexeme::Clause(raw) => {
                    let mut clause = parse_clause(&raw, tokenizer)?;
                    match pending.take() {
                        Some(Operator::Not) => clause.occur = Occur::MustNot,
                        Some(Operator::And) if clause.occur == Occur::Should => {
                            clause.occur = Occur::Must;
                        }
                        _ => {}
                    }
                    clauses.push(clause);
                }
            }
        }

        if let Some(op) = pending {
            return Err(IndexError::malformed_query(format!(
                "query cannot end with {op:?}"
            )));
        }

        Ok(Self { clauses })
    }

    /// Returns the parsed clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the ids of matching records.
    pub fn evaluate(&self, index: &FtsIndex) -> HashSet<RecordId> {
        if self.clauses.is_empty() {
            return HashSet::new();
        }

        let mut musts = self
            .clauses
            .iter()
            .filter(|c| c.occur == Occur::Must)
            .map(|c| matches(c, index));
        let shoulds: Vec<_> = self
            .clauses
            .iter()
            .filter(|c| c.occur == Occur::Should)
            .collect();

        let mut results = match musts.next() {
            Some(first) => musts.fold(first, |acc, set| &acc & &set),
            None if !shoulds.is_empty() => shoulds
                .iter()
                .flat_map(|c| matches(c, index))
                .collect(),
            None => index.all_ids(),
        };

        for clause in self.clauses.iter().filter(|c| c.occur == Occur::MustNot) {
            for id in matches(clause, index) {
                results.remove(&id);
            }
        }

        results
    }
}

fn matches(clause: &Clause, index: &FtsIndex) -> HashSet<RecordId> {
    let field = clause.field.as_deref();
    match &clause.matcher {
        Matcher::All => index.all_ids(),
        Matcher::Tokens { tokens, prefix } => {
            let last = tokens.len().saturating_sub(1);
            let mut sets = tokens.iter().enumerate().map(|(i, token)| {
                if *prefix && i == last {
                    index.lookup_prefix(field, token)
                } else {
                    index.lookup(field, token)
                }
            });
            match sets.next() {
                Some(first) => sets.fold(first, |acc, set| &acc & &set),
                None => HashSet::new(),
            }
        }
    }
}

/// Splits the input into operators and raw clauses, keeping quoted
/// sections together.
fn lex(input: &str) -> IndexResult<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut raw = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            chars.next();
            raw.push(c);
            if c == '"' {
                let mut closed = false;
                for q in chars.by_ref() {
                    raw.push(q);
                    if q == '"' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(IndexError::malformed_query("unterminated quote"));
                }
            }
        }

        let lexeme = match raw.as_str() {
            "AND" | "&&" => Lexeme::Operator(Operator::And),
            "OR" | "||" => Lexeme::Operator(Operator::Or),
            "NOT" | "!" => Lexeme::Operator(Operator::Not),
            _ => Lexeme::Clause(raw),
        };
        lexemes.push(lexeme);
    }

    Ok(lexemes)
}

fn parse_clause(raw: &str, tokenizer: &TokenizerConfig) -> IndexResult<Clause> {
    let (occur, rest) = match raw.as_bytes().first() {
        Some(b'+') => (Occur::Must, &raw[1..]),
        Some(b'-') => (Occur::MustNot, &raw[1..]),
        _ => (Occur::Should, raw),
    };

    let (field, value) = match rest.split_once(':') {
        Some((field, value)) if !field.is_empty() && !field.contains('"') => {
            (Some(field.to_string()), value)
        }
        _ => (None, rest),
    };

    if value.is_empty() {
        return Err(IndexError::malformed_query(format!(
            "nothing to match in `{raw}`"
        )));
    }

    let matcher = if value == "*" {
        Matcher::All
    } else if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Matcher::Tokens {
            tokens: tokenizer.tokenize(&value[1..value.len() - 1]),
            prefix: false,
        }
    } else if let Some(stem) = value.strip_suffix('*') {
        Matcher::Tokens {
            tokens: tokenizer.tokenize(stem),
            prefix: true,
        }
    } else {
        Matcher::Tokens {
            tokens: tokenizer.tokenize(value),
            prefix: false,
        }
    };

    Ok(Clause {
        occur,
        field,
        matcher,
    })
}
