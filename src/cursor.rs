//! Bidirectional depth-first pre-order cursor over a [`Trie`].

use smallvec::SmallVec;
use thiserror::Error;

use crate::trie::{NodeId, Trie};

/// Precondition violations of cursor navigation and dereferencing.
///
/// Not-found conditions in the trie itself are ordinary values, never
/// errors; these variants only cover misuse of the cursor's position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor is at the end position, one past the last node in
    /// pre-order; there is no node to read or write there.
    #[error("cursor is at the end position")]
    AtEnd,
    /// The cursor is already rewound; there is nothing before the root.
    #[error("cursor is already at the begin position")]
    AtBegin,
}

/// One level of the cursor's path: a position within `parent`'s edge list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PathEntry {
    parent: NodeId,
    pos: usize,
}

/// Inline capacity of the path stack; one entry per key element, so this
/// covers short keys without allocating.
const PATH_INLINE: usize = 8;

/// A bidirectional cursor walking every node of a [`Trie`] in depth-first
/// pre-order, represented as a stack of per-level edge positions.
///
/// Three states exist:
///
/// - *rewound* (empty stack): one position before the first node; reading
///   data here yields the root's own data slot;
/// - *positioned* (non-empty stack): the top entry names the current node;
/// - *end*: one position past the last node in pre-order.
///
/// The cursor borrows the trie mutably for its whole lifetime, so the trie
/// cannot be restructured underneath it; the only mutations possible while
/// a cursor is live are through the cursor itself, and those keep the path
/// stack valid. Data written through [`Cursor::data_mut`] lands directly in
/// the underlying trie.
pub struct Cursor<'t, E, D> {
    trie: &'t mut Trie<E, D>,
    path: SmallVec<[PathEntry; PATH_INLINE]>,
}

impl<'t, E, D> Cursor<'t, E, D>
where
    E: Ord + Clone,
    D: Default,
{
    pub(crate) fn new(trie: &'t mut Trie<E, D>) -> Self {
        Cursor {
            trie,
            path: SmallVec::new(),
        }
    }

    /// `true` in the rewound state, one position before the first node.
    pub fn at_begin(&self) -> bool {
        self.path.is_empty()
    }

    /// `true` in the end state, one position past the last node.
    pub fn at_end(&self) -> bool {
        self.path.len() == 1
            && self.path[0].parent == NodeId::ROOT
            && self.path[0].pos == self.trie.edge_count(NodeId::ROOT)
    }

    /// Number of levels below the root, i.e. the current key's length.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Jump straight to the end state.
    pub fn to_end(&mut self) {
        self.path.clear();
        self.path.push(PathEntry {
            parent: NodeId::ROOT,
            pos: self.trie.edge_count(NodeId::ROOT),
        });
    }

    /// Move to the next node in pre-order. A no-op in the end state.
    ///
    /// From the rewound state this lands on the root's first child (or
    /// directly on end if the trie is empty); from an internal node it
    /// descends to the first child; from a leaf it climbs until a next
    /// sibling exists, reaching end after the last node.
    pub fn advance(&mut self) {
        if self.at_begin() {
            // Lands on the end marker when the root is childless.
            self.path.push(PathEntry {
                parent: NodeId::ROOT,
                pos: 0,
            });
            return;
        }
        if self.at_end() {
            return;
        }

        let node = self.current();
        if self.trie.edge_count(node) > 0 {
            self.path.push(PathEntry { parent: node, pos: 0 });
            return;
        }

        let Some(mut top) = self.path.pop() else {
            return;
        };
        top.pos += 1;
        while top.pos == self.trie.edge_count(top.parent) {
            match self.path.pop() {
                Some(mut up) => {
                    up.pos += 1;
                    top = up;
                }
                // The root level is exhausted: `top` is the end marker.
                None => break,
            }
        }
        self.path.push(top);
    }

    /// Move to the previous node in pre-order.
    ///
    /// From the end state this lands on the last node; from a node that is
    /// not its parent's first child it moves to the previous sibling's
    /// right-most descendant; from a first child it climbs one level,
    /// possibly reaching the rewound state. Retreating past the rewound
    /// state is a misuse and reported as [`CursorError::AtBegin`].
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        let mut top = self.path.pop().ok_or(CursorError::AtBegin)?;
        if top.pos == 0 {
            // First child: climbing one level is the whole step.
            return Ok(());
        }

        top.pos -= 1;
        self.path.push(top);

        // Descend to the right-most descendant of the previous sibling.
        let mut node = self.trie.edge_at(top.parent, top.pos).1;
        while self.trie.edge_count(node) > 0 {
            let pos = self.trie.edge_count(node) - 1;
            self.path.push(PathEntry { parent: node, pos });
            node = self.trie.edge_at(node, pos).1;
        }
        Ok(())
    }

    /// The key of the current node, reconstructed from the path's edge
    /// elements. Empty in the rewound state; an error in the end state.
    pub fn key(&self) -> Result<Vec<E>, CursorError> {
        if self.at_end() {
            return Err(CursorError::AtEnd);
        }
        Ok(self
            .path
            .iter()
            .map(|entry| self.trie.edge_at(entry.parent, entry.pos).0.clone())
            .collect())
    }

    /// The data at the current node (the root's data in the rewound state).
    pub fn data(&self) -> Result<&D, CursorError> {
        if self.at_end() {
            return Err(CursorError::AtEnd);
        }
        if self.at_begin() {
            return Ok(self.trie.node_data(NodeId::ROOT));
        }
        Ok(self.trie.node_data(self.current()))
    }

    /// Mutable access to the data at the current node; writes go straight
    /// into the underlying trie.
    pub fn data_mut(&mut self) -> Result<&mut D, CursorError> {
        if self.at_end() {
            return Err(CursorError::AtEnd);
        }
        if self.at_begin() {
            return Ok(self.trie.node_data_mut(NodeId::ROOT));
        }
        let node = self.current();
        Ok(self.trie.node_data_mut(node))
    }

    /// Insert `value` at `key` (from the root, creating missing edges) and
    /// leave the cursor positioned on the inserted node.
    ///
    /// A convenience rather than a core contract: the same effect is
    /// [`Trie::insert`] followed by navigating to the key. The path stack is
    /// rebuilt from scratch, so positions recorded before the call do not
    /// survive it.
    pub fn insert<K>(&mut self, key: K, value: D)
    where
        K: IntoIterator<Item = E>,
    {
        self.path.clear();
        let mut node = NodeId::ROOT;
        for elem in key {
            let (child, pos) = self.trie.edge_or_insert_pos(node, elem);
            self.path.push(PathEntry { parent: node, pos });
            node = child;
        }
        *self.trie.node_data_mut(node) = value;
    }

    /// The node named by the top of the path stack.
    ///
    /// Precondition: positioned state (neither rewound nor end).
    fn current(&self) -> NodeId {
        let top = self.path[self.path.len() - 1];
        self.trie.edge_at(top.parent, top.pos).1
    }
}
