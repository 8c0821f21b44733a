//! Bump arena for expression nodes.
//!
//! Nodes are served from a growable list of fixed-capacity blocks. A block
//! never reallocates, so a `NodeId` handed out once stays valid until the
//! arena itself is dropped; no node is ever individually freed. The arena
//! tracks how many nodes and roughly how many bytes it holds.
//!
//! The arena is single-threaded by design: allocation goes through interior
//! mutability and nothing here is synchronized. One arena per thread.

use std::cell::{Cell, RefCell};

use crate::node::{Node, NodeId};

/// Nodes per block before a new block is appended.
pub const DEFAULT_BLOCK_CAP: usize = 1024;

pub struct NodeArena {
    blocks: RefCell<Vec<Vec<Node>>>,
    block_cap: usize,
    count: Cell<usize>,
    bytes: Cell<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::with_block_capacity(DEFAULT_BLOCK_CAP)
    }

    pub fn with_block_capacity(block_cap: usize) -> Self {
        let block_cap = block_cap.max(1);
        NodeArena {
            blocks: RefCell::new(vec![Vec::with_capacity(block_cap)]),
            block_cap,
            count: Cell::new(0),
            bytes: Cell::new(0),
        }
    }

    /// Place `node` in the current block, growing by one block when full.
    pub(crate) fn alloc(&self, node: Node) -> NodeId {
        let mut blocks = self.blocks.borrow_mut();
        if blocks.last().map_or(true, |b| b.len() == self.block_cap) {
            blocks.push(Vec::with_capacity(self.block_cap));
        }
        let last = blocks.len() - 1;
        let slot = blocks[last].len();
        blocks[last].push(node);

        self.count.set(self.count.get() + 1);
        self.bytes.set(self.bytes.get() + std::mem::size_of::<Node>());
        NodeId((last * self.block_cap + slot) as u32)
    }

    /// Snapshot of the node behind `id`.
    ///
    /// Children are ids, so the clone is shallow and cheap. Nodes are never
    /// mutated after construction, so the snapshot never goes stale.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    pub fn node(&self, id: NodeId) -> Node {
        let blocks = self.blocks.borrow();
        blocks[id.index() / self.block_cap][id.index() % self.block_cap].clone()
    }

    /// How many nodes have been allocated.
    pub fn node_count(&self) -> usize {
        self.count.get()
    }

    /// Approximate bytes held. Only accounts for the node variants
    /// themselves, not their heap payloads (names, argument vectors).
    pub fn approx_bytes(&self) -> usize {
        self.bytes.get()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn ids_are_sequential() {
        let arena = NodeArena::new();
        let a = arena.alloc(Node::Number(1.0));
        let b = arena.alloc(Node::Number(2.0));
        assert_ne!(a, b);
        assert_eq!(arena.node_count(), 2);
    }

    #[test]
    fn nodes_survive_block_growth() {
        let arena = NodeArena::with_block_capacity(4);
        let first = arena.alloc(Node::Number(42.0));
        for i in 0..64 {
            arena.alloc(Node::Number(i as f64));
        }
        // The first node is still readable after many blocks were appended.
        assert_eq!(arena.node(first).as_number(), Some(42.0));
        assert_eq!(arena.node_count(), 65);
        assert!(arena.approx_bytes() >= 65 * std::mem::size_of::<Node>());
    }
}
