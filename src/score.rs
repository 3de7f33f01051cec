//! Scoring protocol for comparing a query sequence against trie paths.

/// A fold-style scoring capability over sequence elements.
///
/// [`Trie::compare`](crate::Trie::compare) starts from [`Score::init`] and
/// folds [`Score::step`] over aligned element pairs: the accumulated value,
/// one element of the query pattern and the corresponding element of a trie
/// path produce the next value.
pub trait Score<E> {
    /// The accumulated score type.
    type Value;

    /// The identity/starting score.
    fn init(&self) -> Self::Value;

    /// Combine the accumulated score with one aligned element pair.
    fn step(&self, acc: Self::Value, pattern: &E, path: &E) -> Self::Value;
}

/// Counts positions at which the pattern and the path agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScore;

impl<E: PartialEq> Score<E> for OverlapScore {
    type Value = u32;

    fn init(&self) -> u32 {
        0
    }

    fn step(&self, acc: u32, pattern: &E, path: &E) -> u32 {
        acc + u32::from(pattern == path)
    }
}
