//! Arena-backed trie keyed by element sequences.
//!
//! Every node on the path from the root to a stored key corresponds to some
//! prefix of that key (including the empty prefix at the root) and carries
//! its own data slot. The structure does not record which prefixes were
//! inserted explicitly; callers who need that distinction must layer a
//! presence flag into the stored data themselves.

use std::fmt;

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::score::Score;

/// A 32-bit index of a node in the trie's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The root node. Always present, never removed.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn new(idx: usize) -> Self {
        debug_assert!(idx < u32::MAX as usize);
        NodeId(idx as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Inline capacity of a node's edge list. Most nodes in sequence data have
/// low fan-out, so small edge lists avoid a heap allocation entirely.
const EDGE_INLINE: usize = 4;

#[derive(Clone)]
struct Node<E, D> {
    data: D,
    /// Outgoing edges, sorted ascending by element and duplicate-free.
    edges: SmallVec<[(E, NodeId); EDGE_INLINE]>,
}

impl<E, D: Default> Node<E, D> {
    fn new() -> Self {
        Node {
            data: D::default(),
            edges: SmallVec::new(),
        }
    }
}

/// Result of [`Trie::match_prefix`].
///
/// `data` always refers to the node of the longest matched prefix, which is
/// the root when not even the first element matched.
#[derive(Debug)]
pub struct MatchResult<'a, D> {
    /// Whether the entire queried sequence was consumed.
    pub matched: bool,
    /// Data at the last successfully matched prefix node.
    pub data: &'a D,
}

/// A key-value store for keys that are sequences of elements (e.g. a string
/// or a vector), efficient for overlapping keys.
///
/// Nodes live in an arena (`Vec`) and reference children via 32-bit indices;
/// cloning is a full deep copy and nothing is ever shared between tries.
/// Keys only need to be iterable front-to-back; elements need `Ord` (edges
/// are kept sorted for binary search) and `Clone`; data needs `Default`.
///
/// Missing keys are never errors: mutating lookups create default data along
/// the way, and [`Trie::match_prefix`] reports the longest matched prefix.
///
/// Insertion may reorder a node's edge list, so positional state held
/// outside the trie (a [`Cursor`]) is invalidated by it; the cursor borrows
/// the trie mutably, which makes that rule enforceable at compile time.
/// The trie has no interior mutability; share it across threads behind
/// external synchronization if mutation is required.
///
/// # Example
///
/// ```
/// use seqtrie::Trie;
///
/// let mut trie: Trie<char, i32> = Trie::new();
/// trie.insert("test".chars(), 42);
///
/// assert_eq!(*trie.entry("test".chars()), 42);
/// assert!(trie.match_prefix("te".chars()).matched);
/// ```
#[derive(Clone)]
pub struct Trie<E, D> {
    nodes: Vec<Node<E, D>>,
}

impl<E, D> Trie<E, D>
where
    E: Ord + Clone,
    D: Default,
{
    /// Create an empty trie holding only the root node.
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::new()],
        }
    }

    /// `true` if nothing has been inserted (the root has no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes[NodeId::ROOT.index()].edges.is_empty()
    }

    /// Drop every node and reset the root's data to its default.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new());
    }

    /// Insert `value` at `key`, creating missing edges with default data.
    ///
    /// Only the final node's data is overwritten; intermediate prefix nodes
    /// keep whatever data they already had. An empty key sets the root's
    /// data.
    pub fn insert<K>(&mut self, key: K, value: D)
    where
        K: IntoIterator<Item = E>,
    {
        let node = self.insert_path(key);
        self.nodes[node.index()].data = value;
    }

    /// Insert `key`, replacing the data of **every node visited, including
    /// the root,** with `update(data)`.
    ///
    /// This is the standard way to accumulate information over all prefixes
    /// of a key, e.g. counting how many stored keys pass through each
    /// prefix.
    pub fn insert_with<K, F>(&mut self, key: K, mut update: F)
    where
        K: IntoIterator<Item = E>,
        F: FnMut(D) -> D,
    {
        let mut node = NodeId::ROOT;
        self.replace_data(node, &mut update);
        for elem in key {
            node = self.edge_or_insert(node, elem);
            self.replace_data(node, &mut update);
        }
    }

    /// Mutable access to the data at `key`, creating missing edges with
    /// default data along the way. Never fails.
    pub fn entry<K>(&mut self, key: K) -> &mut D
    where
        K: IntoIterator<Item = E>,
    {
        let node = self.insert_path(key);
        &mut self.nodes[node.index()].data
    }

    /// Follow existing edges only, never creating nodes.
    ///
    /// Returns `matched == true` if the entire sequence was consumable; in
    /// either case the returned data is that of the longest matched prefix
    /// node (the root for an immediate mismatch, with `matched == true` only
    /// if the sequence was empty).
    pub fn match_prefix<K>(&self, key: K) -> MatchResult<'_, D>
    where
        K: IntoIterator<Item = E>,
    {
        let mut node = NodeId::ROOT;
        for elem in key {
            match self.find_edge(node, &elem) {
                Some(child) => node = child,
                None => {
                    return MatchResult {
                        matched: false,
                        data: &self.nodes[node.index()].data,
                    }
                }
            }
        }
        MatchResult {
            matched: true,
            data: &self.nodes[node.index()].data,
        }
    }

    /// Depth-first pre-order walk invoking `visitor(element, data)` once per
    /// edge traversed. The root's own data is never visited.
    ///
    /// The visitor returns `true` to continue into the node's children and
    /// `false` to skip the subtree; the walk then continues with the next
    /// sibling or ancestor.
    pub fn each_elem<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&E, &mut D) -> bool,
    {
        self.each_elem_at(NodeId::ROOT, &mut visitor);
    }

    fn each_elem_at<F>(&mut self, node: NodeId, visitor: &mut F)
    where
        F: FnMut(&E, &mut D) -> bool,
    {
        for pos in 0..self.nodes[node.index()].edges.len() {
            let (elem, child) = self.nodes[node.index()].edges[pos].clone();
            if visitor(&elem, &mut self.nodes[child.index()].data) {
                self.each_elem_at(child, visitor);
            }
        }
    }

    /// Depth-first pre-order walk invoking `visitor(key_so_far, data)` for
    /// every node, including the root (with an empty key).
    ///
    /// Same early-stop contract as [`Trie::each_elem`]: returning `false`
    /// skips the subtree below the visited node.
    pub fn each<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&[E], &mut D) -> bool,
    {
        let mut key = Vec::new();
        self.each_at(NodeId::ROOT, &mut key, &mut visitor);
    }

    fn each_at<F>(&mut self, node: NodeId, key: &mut Vec<E>, visitor: &mut F)
    where
        F: FnMut(&[E], &mut D) -> bool,
    {
        if !visitor(key, &mut self.nodes[node.index()].data) {
            return;
        }
        for pos in 0..self.nodes[node.index()].edges.len() {
            let (elem, child) = self.nodes[node.index()].edges[pos].clone();
            key.push(elem);
            self.each_at(child, key, visitor);
            key.pop();
        }
    }

    /// Score `pattern` against every trie path of exactly the same length.
    ///
    /// The score is folded with [`Score::step`] over aligned elements
    /// (`pattern[i]` against the path's i-th edge element), starting from
    /// [`Score::init`]. For each path of the pattern's exact length,
    /// `sink(final_score, data)` is invoked exactly once. Shorter paths
    /// never reach the cutoff and longer paths are never descended into; an
    /// empty pattern produces no calls at all.
    pub fn compare<K, S, F>(&self, pattern: K, score: &S, mut sink: F)
    where
        K: IntoIterator<Item = E>,
        S: Score<E>,
        S::Value: Clone,
        F: FnMut(S::Value, &D),
    {
        let pattern: Vec<E> = pattern.into_iter().collect();
        self.compare_at(NodeId::ROOT, &pattern, score.init(), score, &mut sink);
    }

    fn compare_at<S, F>(&self, node: NodeId, rest: &[E], acc: S::Value, score: &S, sink: &mut F)
    where
        S: Score<E>,
        S::Value: Clone,
        F: FnMut(S::Value, &D),
    {
        let Some((head, tail)) = rest.split_first() else {
            return;
        };
        for (elem, child) in &self.nodes[node.index()].edges {
            let acc = score.step(acc.clone(), head, elem);
            if tail.is_empty() {
                sink(acc, &self.nodes[child.index()].data);
            } else {
                self.compare_at(*child, tail, acc, score, sink);
            }
        }
    }

    /// A cursor in the rewound state, one position before the first node in
    /// pre-order. The cursor borrows the trie mutably for its lifetime.
    pub fn cursor(&mut self) -> Cursor<'_, E, D> {
        Cursor::new(self)
    }

    /// A cursor in the end state, one position past the last node in
    /// pre-order.
    pub fn cursor_at_end(&mut self) -> Cursor<'_, E, D> {
        let mut cursor = Cursor::new(self);
        cursor.to_end();
        cursor
    }

    fn insert_path<K>(&mut self, key: K) -> NodeId
    where
        K: IntoIterator<Item = E>,
    {
        let mut node = NodeId::ROOT;
        for elem in key {
            node = self.edge_or_insert(node, elem);
        }
        node
    }

    fn replace_data<F>(&mut self, node: NodeId, update: &mut F)
    where
        F: FnMut(D) -> D,
    {
        let slot = &mut self.nodes[node.index()].data;
        *slot = update(std::mem::take(slot));
    }

    fn edge_or_insert(&mut self, node: NodeId, elem: E) -> NodeId {
        self.edge_or_insert_pos(node, elem).0
    }

    /// Binary-search `node`'s sorted edge list for `elem`, inserting a new
    /// child with default data at the sort position when absent. Returns the
    /// child and its position within the edge list.
    pub(crate) fn edge_or_insert_pos(&mut self, node: NodeId, elem: E) -> (NodeId, usize) {
        let found = self.nodes[node.index()]
            .edges
            .binary_search_by(|(e, _)| e.cmp(&elem));
        match found {
            Ok(pos) => (self.nodes[node.index()].edges[pos].1, pos),
            Err(pos) => {
                let child = NodeId::new(self.nodes.len());
                self.nodes.push(Node::new());
                self.nodes[node.index()].edges.insert(pos, (elem, child));
                (child, pos)
            }
        }
    }

    fn find_edge(&self, node: NodeId, elem: &E) -> Option<NodeId> {
        let edges = &self.nodes[node.index()].edges;
        edges
            .binary_search_by(|(e, _)| e.cmp(elem))
            .ok()
            .map(|pos| edges[pos].1)
    }

    // Accessors for the cursor's positional navigation.

    pub(crate) fn edge_count(&self, node: NodeId) -> usize {
        self.nodes[node.index()].edges.len()
    }

    pub(crate) fn edge_at(&self, node: NodeId, pos: usize) -> (&E, NodeId) {
        let (elem, child) = &self.nodes[node.index()].edges[pos];
        (elem, *child)
    }

    pub(crate) fn node_data(&self, node: NodeId) -> &D {
        &self.nodes[node.index()].data
    }

    pub(crate) fn node_data_mut(&mut self, node: NodeId) -> &mut D {
        &mut self.nodes[node.index()].data
    }
}

impl<E, D> Default for Trie<E, D>
where
    E: Ord + Clone,
    D: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, D> fmt::Debug for Trie<E, D>
where
    E: fmt::Debug,
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn walk<'a, E: fmt::Debug, D: fmt::Debug>(
            trie: &'a Trie<E, D>,
            node: NodeId,
            key: &mut Vec<&'a E>,
            map: &mut fmt::DebugMap<'_, '_>,
        ) {
            map.entry(&*key, &trie.nodes[node.index()].data);
            for (elem, child) in &trie.nodes[node.index()].edges {
                key.push(elem);
                walk(trie, *child, key, map);
                key.pop();
            }
        }

        let mut map = f.debug_map();
        walk(self, NodeId::ROOT, &mut Vec::new(), &mut map);
        map.finish()
    }
}
