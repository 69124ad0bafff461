//! The open list of the search: a min-priority queue over [Node]s that holds at most one node per
//! grid position.
//!
//! [BinaryHeap] cannot remove arbitrary elements, so decrease-key uses stale entries. The position
//! index records the sequence number of the live node for every queued position. A heap entry
//! whose sequence number no longer matches the index has been superseded by a better node and is
//! skipped when it surfaces.
use crate::error::SearchError;
use crate::node::Node;
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Number of stale heap entries tolerated on top of the live ones before the heap is rebuilt.
const STALE_SLACK: usize = 32;

struct SmallestCostHolder {
    node: Rc<Node>,
    seq: u64,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the best node. Nodes that tie on both f and g leave in
        // insertion order.
        other
            .node
            .cmp_cost(&self.node)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct Queued {
    seq: u64,
    node: Rc<Node>,
}

/// Min-priority container over nodes, unique per position, with insert-or-improve semantics.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestCostHolder>,
    index: FxHashMap<Point, Queued>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Queues `node` unless its position is already queued with an equal or better node. A
    /// strictly better node replaces the queued one. Returns whether `node` was queued.
    pub fn push(&mut self, node: Node) -> bool {
        let position = node.position();
        if let Some(queued) = self.index.get(&position) {
            if !node.is_better_than(&queued.node) {
                return false;
            }
            trace!(
                "Improving {} from f = {:.3} to f = {:.3}",
                position,
                queued.node.f(),
                node.f()
            );
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let node = Rc::new(node);
        self.index.insert(
            position,
            Queued {
                seq,
                node: node.clone(),
            },
        );
        self.heap.push(SmallestCostHolder { node, seq });
        if self.heap.len() > 2 * self.index.len() + STALE_SLACK {
            self.rebuild();
        }
        true
    }

    /// Removes and returns the best queued node.
    pub fn pop(&mut self) -> Result<Rc<Node>, SearchError> {
        while let Some(SmallestCostHolder { node, seq }) = self.heap.pop() {
            let position = node.position();
            match self.index.get(&position) {
                Some(queued) if queued.seq == seq => {
                    self.index.remove(&position);
                    return Ok(node);
                }
                // Superseded by a better node for the same position.
                _ => continue,
            }
        }
        if self.index.is_empty() {
            Err(SearchError::EmptyFrontier)
        } else {
            Err(SearchError::InconsistentFrontier)
        }
    }

    /// The node [pop](Self::pop) would return next, without removing it.
    pub fn peek(&mut self) -> Option<&Rc<Node>> {
        while let Some(top) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek().map(|top| &top.node)
    }

    /// The node currently queued for `position`.
    pub fn get(&self, position: &Point) -> Option<&Rc<Node>> {
        self.index.get(position).map(|queued| &queued.node)
    }

    pub fn contains(&self, position: &Point) -> bool {
        self.index.contains_key(position)
    }

    /// Number of distinct positions currently queued.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The live queued nodes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Node>> {
        self.index.values().map(|queued| &queued.node)
    }

    fn is_live(&self, entry: &SmallestCostHolder) -> bool {
        self.index
            .get(&entry.node.position())
            .is_some_and(|queued| queued.seq == entry.seq)
    }

    /// Drops every stale entry by rebuilding the heap from the position index.
    fn rebuild(&mut self) {
        trace!(
            "Rebuilding frontier heap: {} entries, {} live",
            self.heap.len(),
            self.index.len()
        );
        self.heap = self
            .index
            .values()
            .map(|queued| SmallestCostHolder {
                node: queued.node.clone(),
                seq: queued.seq,
            })
            .collect();
    }

    #[cfg(test)]
    fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Empties the heap but keeps the index, leaving the two views out of sync.
    #[cfg(test)]
    pub(crate) fn clear_heap(&mut self) {
        self.heap.clear();
    }
}
