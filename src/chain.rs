//! Chain storage for separate chaining: a fixed arena of reusable nodes and
//! the per-slot singly-linked chains that borrow from it.
//!
//! Nodes live in one [`NodePool`] owned by the table and are addressed by
//! index handle. The pool is a LIFO freelist; every handle is held by either
//! the pool or exactly one chain, never both. Chains insert at the head, so
//! rendering a chain lists keys most-recent-first.

use log::warn;

use crate::metrics::Metrics;

#[derive(Debug, Clone)]
struct ChainNode {
    key: i32,
    next: Option<u32>,
}

/// Fixed-capacity LIFO pool of chain nodes, shared by all chains of one
/// table.
///
/// Allocation never happens after construction: an insert that finds the
/// pool empty is dropped. LIFO order is a cache-friendly default; the order
/// itself does not matter for correctness.
#[derive(Debug)]
pub struct NodePool {
    nodes: Vec<ChainNode>,
    free: Vec<u32>,
}

impl NodePool {
    /// Preallocates `count` nodes, all free.
    pub fn with_capacity(count: usize) -> Self {
        let nodes = vec![ChainNode { key: 0, next: None }; count];
        let free = (0..count as u32).collect();
        Self { nodes, free }
    }

    /// Number of free nodes currently held by the pool.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// True when no free node is available.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Total nodes in the arena, free or chained.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Takes a free node handle, or `None` when the pool is exhausted.
    pub fn pop(&mut self) -> Option<u32> {
        self.free.pop()
    }

    /// Returns a handle to the pool. The handle must have come from
    /// [`NodePool::pop`] on this pool and must no longer be linked anywhere.
    pub fn push(&mut self, handle: u32) {
        debug_assert!(!self.free.contains(&handle), "handle pushed twice");
        self.nodes[handle as usize].next = None;
        self.free.push(handle);
    }
}

/// A singly-linked chain of keys stored at one table slot.
///
/// Holds only a head handle; all node storage belongs to the table's
/// [`NodePool`], which every operation takes as an explicit argument.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    head: Option<u32>,
}

impl Chain {
    /// Creates an empty chain.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Inserts `key` at the head of the chain, reusing a node from `pool`.
    ///
    /// The walk over the existing chain counts one comparison per node (the
    /// traversal cost is modeled even though head insertion does not compare
    /// keys), and a non-empty chain counts one undifferentiated collision.
    /// Returns false without touching the chain when the pool is exhausted.
    pub fn insert(&mut self, pool: &mut NodePool, key: i32, metrics: &mut Metrics) -> bool {
        let mut walked = false;
        let mut cur = self.head;
        while let Some(handle) = cur {
            metrics.add_comparison();
            walked = true;
            cur = pool.nodes[handle as usize].next;
        }
        if walked {
            metrics.add_collision();
        }

        let Some(handle) = pool.pop() else {
            warn!("no free nodes available for chaining; dropping key {key}");
            return false;
        };

        let node = &mut pool.nodes[handle as usize];
        node.key = key;
        node.next = self.head;
        debug_assert_ne!(node.next, Some(handle), "node must not link to itself");
        self.head = Some(handle);
        metrics.add_insertion();
        true
    }

    /// Searches the chain for `key`, counting one comparison per node.
    pub fn search(&self, pool: &NodePool, key: i32, metrics: &mut Metrics) -> bool {
        let mut cur = self.head;
        while let Some(handle) = cur {
            metrics.add_comparison();
            let node = &pool.nodes[handle as usize];
            if node.key == key {
                return true;
            }
            cur = node.next;
        }
        false
    }

    /// Same walk as [`Chain::search`], but touches no counter.
    pub fn lookup(&self, pool: &NodePool, key: i32) -> bool {
        self.keys(pool).any(|k| k == key)
    }

    /// Number of keys in the chain.
    pub fn len(&self, pool: &NodePool) -> usize {
        self.keys(pool).count()
    }

    /// True when the chain holds no keys.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns every node to the pool and empties the chain.
    pub fn clear(&mut self, pool: &mut NodePool) {
        let mut cur = self.head.take();
        while let Some(handle) = cur {
            cur = pool.nodes[handle as usize].next;
            pool.push(handle);
        }
    }

    /// Iterates the keys in head-to-tail order (most recently inserted
    /// first).
    pub fn keys<'p>(&self, pool: &'p NodePool) -> Keys<'p> {
        Keys {
            pool,
            cur: self.head,
        }
    }

    /// Renders the chain as `"k1 -> k2 -> ... -> None"`; an empty chain
    /// renders as `"None"`.
    pub fn render(&self, pool: &NodePool) -> String {
        let mut out = String::new();
        for key in self.keys(pool) {
            out.push_str(&key.to_string());
            out.push_str(" -> ");
        }
        out.push_str("None");
        out
    }
}

/// Iterator over a chain's keys in head-to-tail order.
pub struct Keys<'p> {
    pool: &'p NodePool,
    cur: Option<u32>,
}

impl Iterator for Keys<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let handle = self.cur?;
        let node = &self.pool.nodes[handle as usize];
        self.cur = node.next;
        Some(node.key)
    }
}
