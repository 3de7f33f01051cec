//! # seqtrie
//!
//! A sequence-keyed trie with a bidirectional cursor and a
//! k-nearest-neighbor classifier on top.
//!
//! ## Features
//!
//! - **Generic keys**: any forward-iterable sequence of `Ord` elements
//!   (strings, vectors, custom feature streams)
//! - **Prefix-aware storage**: every prefix of a stored key has its own
//!   data slot; lookups on missing keys resolve to defaults, never errors
//! - **Bidirectional cursor**: depth-first pre-order traversal, forward and
//!   backward, with in-place mutation of the current node's data
//! - **Scoring protocol**: fold-style comparison of a query sequence
//!   against every trie path of equal length
//! - **k-NN classification**: label-frequency maps in the trie plus
//!   single-best or k-best majority voting
//!
//! ## Example
//!
//! ```rust
//! use seqtrie::{KnnClassifier, Trie};
//!
//! let mut trie: Trie<char, i32> = Trie::new();
//! trie.insert("test".chars(), 42);
//! trie.insert("trie".chars(), 1);
//!
//! assert_eq!(*trie.entry("test".chars()), 42);
//! assert!(trie.match_prefix("tr".chars()).matched);
//!
//! let mut knn: KnnClassifier<char, &str> = KnnClassifier::new();
//! knn.learn("rust".chars(), "lang");
//! knn.learn("ruby".chars(), "lang");
//! assert_eq!(knn.classify("rusk".chars()), Some("lang"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod knn;
pub mod score;
pub mod trie;

pub use cursor::{Cursor, CursorError};
pub use knn::{KnnClassifier, LabelCounts};
pub use score::{OverlapScore, Score};
pub use trie::{MatchResult, Trie};

#[cfg(test)]
mod proptests;
