//! FIFO ready queue for the Round Robin family.

use std::collections::{HashSet, VecDeque};

/// Process indices awaiting dispatch, in FIFO order.
///
/// A parallel membership set rejects duplicate enqueueing, so a process can
/// be waiting at most once.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReadyQueue {
    order: VecDeque<usize>,
    members: HashSet<usize>,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `index` at the tail. Returns `false` if it was already queued.
    pub(crate) fn push(&mut self, index: usize) -> bool {
        if !self.members.insert(index) {
            return false;
        }
        self.order.push_back(index);
        true
    }

    /// Removes and returns the head.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let index = self.order.pop_front()?;
        self.members.remove(&index);
        Some(index)
    }

    /// Whether `index` is waiting.
    #[cfg(test)]
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Extend<usize> for ReadyQueue {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.push(index);
        }
    }
}
