// src/autograd/graph.rs

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;

use crate::array;
use crate::autograd::function::FunctionNode;
use crate::error::NeuroGradError;
use crate::variable::Variable;

/// Identity of a function node, stable for as long as the `Rc` is alive.
pub(crate) type NodeId = *const FunctionNode;

struct Pending {
    priority: usize,
    seq: usize,
    node: Rc<FunctionNode>,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    // Max-heap on priority; equal priorities pop in insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending function nodes, popped highest priority first. A node is accepted
/// at most once per traversal.
pub(crate) struct Worklist {
    heap: BinaryHeap<Pending>,
    seen: HashSet<NodeId>,
    next_seq: usize,
}

impl Worklist {
    pub(crate) fn new() -> Self {
        Worklist {
            heap: BinaryHeap::new(),
            seen: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Enqueues `node` unless it has been enqueued before. Returns whether it
    /// was added.
    pub(crate) fn push(&mut self, node: Rc<FunctionNode>) -> bool {
        if !self.seen.insert(Rc::as_ptr(&node)) {
            return false;
        }
        self.heap.push(Pending {
            priority: node.priority(),
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
        true
    }

    pub(crate) fn pop(&mut self) -> Option<Rc<FunctionNode>> {
        self.heap.pop().map(|pending| pending.node)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Backward traversal starting at `root`. See [`Variable::backward`].
pub(crate) fn backward(root: &Variable, retain_gradients: bool) -> Result<(), NeuroGradError> {
    if root.grad().is_none() {
        let seed = array::ones_like(&root.data())?;
        root.set_grad(Some(seed));
    }

    let creator = match root.creator() {
        Some(creator) => creator,
        None => {
            log::debug!("backward() called on a leaf variable. Only the gradient was seeded.");
            return Ok(());
        }
    };

    let mut worklist = Worklist::new();
    worklist.push(creator);
    let mut processed = 0usize;

    while let Some(func) = worklist.pop() {
        log::trace!(
            "backward: '{}' (priority {}, {} pending)",
            func.name(),
            func.priority(),
            worklist.len()
        );
        let gys = func.output_grads()?;
        let gxs = func.backward(&gys)?;

        for (input, gx) in func.inputs().iter().zip(gxs) {
            input.accumulate_grad(gx)?;
            if let Some(input_creator) = input.creator() {
                worklist.push(input_creator);
            }
        }

        if !retain_gradients {
            for output in func.outputs().into_iter().flatten() {
                output.clear_gradient();
            }
        }
        processed += 1;
    }

    log::debug!("backward: processed {} function node(s)", processed);
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
