//! jangbu journal storage and the posting gate.
//!
//! [`JournalStore`] is the seam between the pure bookkeeping crates and
//! whatever holds the book: the engine derives entries, the validator
//! checks them, and a store keeps them. [`MemoryJournal`] is the only
//! backend here, an id-keyed in-memory map that serializes to JSON so a
//! book can be snapshotted and reloaded.
//!
//! [`post_entry`] is the one write path: it runs the full validation gate
//! and only then inserts a new entry or replaces the one the draft was
//! loaded from. A rejected entry leaves the store untouched.
//!
//! Stores are single-writer. Nothing here locks; callers that share a
//! store across threads wrap it themselves.
//!
//! # Examples
//!
//! ```
//! use jangbu_core::{JournalEntry, JournalLine, NaiveDate};
//! use jangbu_store::{post_entry, JournalStore, MemoryJournal};
//! use rust_decimal_macros::dec;
//!
//! let mut store = MemoryJournal::new();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let entry = JournalEntry::new(date)
//!     .with_line(JournalLine::debit("1020", dec!(11000)))
//!     .with_line(JournalLine::credit("4100", dec!(10000)))
//!     .with_line(JournalLine::credit("2100", dec!(1000)));
//!
//! let id = post_entry(&mut store, entry)?;
//! assert_eq!(id, 1);
//! assert_eq!(store.len(), 1);
//! # Ok::<(), jangbu_store::PostError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use jangbu_core::{EntryId, JournalEntry};
use jangbu_validate::{validate_entry, EntryError};

/// Errors from store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store holds no entry under the given id.
    #[error("no entry with id {0}")]
    UnknownEntry(EntryId),
}

/// Errors from the posting gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// The entry failed validation; nothing was stored.
    #[error(transparent)]
    Invalid(#[from] EntryError),

    /// The entry targeted an id the store does not hold.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Storage seam for posted journal entries.
///
/// Implementations assign ids on insert and hand back owned copies on
/// read, so report folds never borrow from the store.
pub trait JournalStore {
    /// All posted entries in ascending id order.
    fn entries(&self) -> Vec<JournalEntry>;

    /// The entry under `id`, if posted.
    fn get(&self, id: EntryId) -> Option<JournalEntry>;

    /// Store a new entry and return its assigned id.
    ///
    /// The stored copy carries the assigned id regardless of what the
    /// draft claimed.
    fn insert(&mut self, entry: JournalEntry) -> EntryId;

    /// Overwrite the entry under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntry`] when `id` was never assigned;
    /// replace never creates.
    fn replace(&mut self, id: EntryId, entry: JournalEntry) -> Result<(), StoreError>;

    /// Delete and return the entry under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntry`] when `id` is not present.
    fn remove(&mut self, id: EntryId) -> Result<JournalEntry, StoreError>;

    /// Number of posted entries.
    fn len(&self) -> usize;

    /// True when nothing has been posted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory journal keyed by entry id.
///
/// Ids are assigned from a monotonic counter starting at 1 and are never
/// reused, including after removals. The whole book round-trips through
/// serde, counter included, so a reloaded snapshot keeps assigning fresh
/// ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryJournal {
    entries: BTreeMap<EntryId, JournalEntry>,
    next_id: EntryId,
}

impl MemoryJournal {
    /// An empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalStore for MemoryJournal {
    fn entries(&self) -> Vec<JournalEntry> {
        self.entries.values().cloned().collect()
    }

    fn get(&self, id: EntryId) -> Option<JournalEntry> {
        self.entries.get(&id).cloned()
    }

    fn insert(&mut self, mut entry: JournalEntry) -> EntryId {
        let entry_id = self.next_id;
        self.next_id += 1;
        entry.id = Some(entry_id);
        tracing::debug!(entry_id, lines = entry.lines.len(), "Entry inserted");
        self.entries.insert(entry_id, entry);
        entry_id
    }

    fn replace(&mut self, id: EntryId, mut entry: JournalEntry) -> Result<(), StoreError> {
        if !self.entries.contains_key(&id) {
            return Err(StoreError::UnknownEntry(id));
        }
        entry.id = Some(id);
        tracing::debug!(entry_id = id, lines = entry.lines.len(), "Entry replaced");
        self.entries.insert(id, entry);
        Ok(())
    }

    fn remove(&mut self, id: EntryId) -> Result<JournalEntry, StoreError> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or(StoreError::UnknownEntry(id))?;
        tracing::debug!(entry_id = id, "Entry removed");
        Ok(entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Validate an entry and commit it to the store.
///
/// The full gate from `jangbu_validate` runs first; only a passing entry
/// touches the store. An entry with an id replaces the stored entry under
/// that id, which is how edit screens re-post a re-derived draft. An entry
/// without an id is inserted fresh.
///
/// # Errors
///
/// Returns [`PostError::Invalid`] when validation rejects the entry and
/// [`PostError::Store`] when the entry names an unknown id. Either way the
/// store is left exactly as it was.
pub fn post_entry<S>(store: &mut S, entry: JournalEntry) -> Result<EntryId, PostError>
where
    S: JournalStore + ?Sized,
{
    validate_entry(&entry)?;
    match entry.id {
        Some(id) => {
            store.replace(id, entry)?;
            Ok(id)
        }
        None => Ok(store.insert(entry)),
    }
}
