//! Explicit search stack.
//!
//! The depth-first search never recurses natively. Pending decisions live in
//! one linear `entries` buffer and `frames` marks where each depth begins,
//! so the memory used is bounded by the number of items and popping a level
//! is a truncate.

/// End of the partial chain an item is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Side {
    /// After the current last item.
    Append,
    /// Before the current first item.
    Prepend,
}

/// Placing one unused item at one end of the partial chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Decision {
    pub item: usize,
    pub side: Side,
    /// Distance between the two newly adjacent endpoints.
    pub cost: f64,
}

impl Decision {
    #[inline]
    pub fn new(item: usize, side: Side, cost: f64) -> Self {
        Self { item, side, cost }
    }
}

/// One depth level of the search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Index into `entries` where this level's decisions begin.
    start: usize,
    /// Decision whose application opened this level; `None` at the root.
    applied: Option<Decision>,
    /// Partial loss before `applied` was placed.
    partial_before: f64,
}

/// A frame-structured LIFO stack of pending decisions.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchStack {
    entries: Vec<Decision>,
    frames: Vec<Frame>,
}

impl SearchStack {
    /// Creates a stack sized for `num_items` items.
    ///
    /// Each level holds at most two decisions per unused item.
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items.saturating_mul(num_items).saturating_mul(2)),
            frames: Vec::with_capacity(num_items.saturating_add(1)),
        }
    }

    /// Current depth (number of open frames).
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frames are open (search exhausted).
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Opens the root level.
    #[inline]
    pub fn push_root(&mut self) {
        self.frames.push(Frame {
            start: self.entries.len(),
            applied: None,
            partial_before: 0.0,
        });
    }

    /// Opens a level below `applied`.
    #[inline]
    pub fn push_frame(&mut self, applied: Decision, partial_before: f64) {
        self.frames.push(Frame {
            start: self.entries.len(),
            applied: Some(applied),
            partial_before,
        });
    }

    /// Closes the current level, discarding its pending decisions.
    ///
    /// Returns the decision that opened it together with the partial loss
    /// to restore, or `None` for the root (or an empty stack).
    #[inline]
    pub fn pop_frame(&mut self) -> Option<(Decision, f64)> {
        let frame = self.frames.pop()?;
        self.entries.truncate(frame.start);
        frame.applied.map(|d| (d, frame.partial_before))
    }

    /// Queues a decision on the current level.
    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    /// Queues decisions on the current level; the last one pops first.
    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Decision>,
    {
        self.entries.extend(iter);
    }

    /// Pops the next decision of the current level, if any remain.
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        let start = self.frames.last()?.start;
        if self.entries.len() > start {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Number of queued decisions across all levels.
    #[cfg(test)]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }
}
