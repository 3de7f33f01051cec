//! k-nearest-neighbor classifier over learned feature sequences.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::score::OverlapScore;
use crate::trie::Trie;

/// Occurrence count per label, stored at each learned trie node.
///
/// A `BTreeMap` keeps labels in key order, which fixes the majority-vote
/// tie-break: among equal counts the lowest label wins.
pub type LabelCounts<L> = BTreeMap<L, u32>;

/// A k-nearest-neighbor classifier storing labeled feature sequences in a
/// [`Trie`] of label-frequency maps.
///
/// [`KnnClassifier::learn`] counts how often a label was seen for an exact
/// feature sequence; classification scores the query against every learned
/// sequence *of the same length* with [`OverlapScore`] and takes a majority
/// vote over the best-scoring neighbors.
///
/// # Example
///
/// ```
/// use seqtrie::KnnClassifier;
///
/// let mut knn: KnnClassifier<i32, &str> = KnnClassifier::new();
/// knn.learn([1, 2, 3], "low");
/// knn.learn([7, 8, 9], "high");
///
/// assert_eq!(knn.classify([1, 2, 4]), Some("low"));
/// ```
pub struct KnnClassifier<E, L> {
    trie: Trie<E, LabelCounts<L>>,
}

impl<E, L> KnnClassifier<E, L>
where
    E: Ord + Clone,
    L: Ord + Clone,
{
    /// Create a classifier with no learned sequences.
    pub fn new() -> Self {
        KnnClassifier { trie: Trie::new() }
    }

    /// Record one observation of `label` for the exact sequence `features`.
    ///
    /// Looks up or creates the node for `features` and increments the
    /// label's count there (from zero for a label never seen at that node).
    pub fn learn<K>(&mut self, features: K, label: L)
    where
        K: IntoIterator<Item = E>,
    {
        *self.trie.entry(features).entry(label).or_insert(0) += 1;
    }

    /// Classify by the single best-scoring learned sequence.
    ///
    /// Scores `features` against every learned sequence of the same length
    /// and keeps the first-seen map with the strictly highest overlap; a
    /// query overlapping nothing (or of a length never learned) yields
    /// `None`. Ties on the vote go to the lowest label.
    pub fn classify<K>(&self, features: K) -> Option<L>
    where
        K: IntoIterator<Item = E>,
    {
        let mut best_score = 0;
        let mut best: Option<LabelCounts<L>> = None;

        self.trie.compare(features, &OverlapScore, |score, counts| {
            if score > best_score {
                best_score = score;
                best = Some(counts.clone());
            }
        });

        best.as_ref().and_then(Self::majority_vote)
    }

    /// Classify by majority vote over the `k` best-scoring neighbors.
    ///
    /// The k best `(score, label-counts)` pairs are retained in an ordered
    /// set (score ties ordered by the maps' own ordering, duplicates
    /// collapsing as in any set); once full, a candidate is admitted only if
    /// it beats the current minimum, which is then evicted. The retained
    /// maps' counts are summed and the vote is taken from the union, with
    /// the same tie-break as [`KnnClassifier::classify`].
    pub fn classify_k<K>(&self, features: K, k: usize) -> Option<L>
    where
        K: IntoIterator<Item = E>,
    {
        let mut best: BTreeSet<(u32, LabelCounts<L>)> = BTreeSet::new();

        self.trie.compare(features, &OverlapScore, |score, counts| {
            if best.len() < k {
                best.insert((score, counts.clone()));
            } else if best.first().is_some_and(|(lowest, _)| score > *lowest) {
                best.insert((score, counts.clone()));
                if best.len() > k {
                    best.pop_first();
                }
            }
        });

        let mut union: LabelCounts<L> = LabelCounts::new();
        for (_, counts) in &best {
            for (label, count) in counts {
                *union.entry(label.clone()).or_insert(0) += count;
            }
        }

        Self::majority_vote(&union)
    }

    /// The label with the highest count; equal counts resolve to the lowest
    /// label (the first maximum in key order). `None` for an empty map.
    fn majority_vote(counts: &LabelCounts<L>) -> Option<L> {
        let mut best: Option<(&L, u32)> = None;
        for (label, &count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label.clone())
    }
}

impl<E, L> Default for KnnClassifier<E, L>
where
    E: Ord + Clone,
    L: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, L> fmt::Debug for KnnClassifier<E, L>
where
    E: fmt::Debug,
    L: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnnClassifier")
            .field("trie", &self.trie)
            .finish()
    }
}
