//! An undo log for backtracking searches.
//!
//! Instead of cloning the whole search state before every guess, a search
//! records the previous value of each slot it overwrites. Rolling back to a
//! [`Checkpoint`] replays those records newest-first, which costs time
//! proportional to the number of changes made since the checkpoint.
//!
//! # Examples
//!
//! ```
//! use numberlink_core::UndoJournal;
//!
//! let mut values = vec![0; 4];
//! let mut journal = UndoJournal::new();
//!
//! let checkpoint = journal.checkpoint();
//! for (i, value) in [(1, 10), (2, 20), (1, 11)] {
//!     journal.record((i, values[i]));
//!     values[i] = value;
//! }
//! assert_eq!(values, [0, 11, 20, 0]);
//!
//! for (i, previous) in journal.rollback(checkpoint) {
//!     values[i] = previous;
//! }
//! assert_eq!(values, [0, 0, 0, 0]);
//! assert!(journal.is_empty());
//! ```

/// A position in an [`UndoJournal`] that can be rolled back to.
///
/// The default checkpoint is the start of the journal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

/// An append-only log of previous values.
///
/// The journal does not know how to restore an entry; [`UndoJournal::rollback`]
/// hands entries back to the owner of the journaled state in reverse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoJournal<E> {
    entries: Vec<E>,
}

impl<E> Default for UndoJournal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> UndoJournal<E> {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty journal with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the current position, to be passed to [`rollback`](Self::rollback).
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    /// Appends an entry describing a value about to be overwritten.
    pub fn record(&mut self, entry: E) {
        self.entries.push(entry);
    }

    /// Removes every entry recorded after `checkpoint`, newest first.
    ///
    /// The caller restores each yielded entry. Entries not consumed from the
    /// iterator are still removed when it is dropped. A checkpoint taken
    /// after the journal was rolled back further is treated as the current
    /// position.
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> impl Iterator<Item = E> {
        let start = checkpoint.0.min(self.entries.len());
        self.entries.drain(start..).rev()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded since the start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets all entries without restoring them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
