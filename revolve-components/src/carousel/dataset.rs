//! The tripled working sequence behind a looping carousel.

use std::{fmt, sync::Arc};

/// How many concatenated copies of the source list the working sequence
/// holds. Three copies leave a full list of slack on both sides of the
/// middle copy.
pub const COPIES: usize = 3;

/// Render key of one working-sequence slot.
///
/// The same source item appears once per copy, so the key carries both
/// coordinates. Keys are stable across re-derivations of the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Which copy the slot belongs to, `0..COPIES`.
    pub copy: usize,
    /// Index of the aliased source item.
    pub source: usize,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.copy, self.source)
    }
}

/// `COPIES × N` slots where slot `k` aliases source item `k mod N`.
///
/// The source list is shared, never cloned per copy.
///
/// ```
/// use revolve_components::carousel::WorkingSequence;
///
/// let sequence = WorkingSequence::build(vec!["a", "b"]);
/// assert_eq!(sequence.len(), 6);
/// assert_eq!(sequence.get(3), Some(&"b"));
/// assert_eq!(sequence.key(3).map(|k| k.to_string()), Some("1-1".to_string()));
/// ```
#[derive(Debug)]
pub struct WorkingSequence<T> {
    items: Arc<[T]>,
}

impl<T> Clone for WorkingSequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> WorkingSequence<T> {
    /// Derives the working sequence from the caller's items.
    pub fn build(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Number of source items, `N`.
    pub fn source_len(&self) -> usize {
        self.items.len()
    }

    /// Number of slots, `COPIES × N`.
    pub fn len(&self) -> usize {
        self.items.len() * COPIES
    }

    /// Returns `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The caller's items.
    pub fn source(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if `items` is the very list this sequence was built
    /// from.
    pub fn is_built_from(&self, items: &Arc<[T]>) -> bool {
        Arc::ptr_eq(&self.items, items)
    }

    /// The item shown in `slot`.
    pub fn get(&self, slot: usize) -> Option<&T> {
        let key = self.key(slot)?;
        self.items.get(key.source)
    }

    /// The render key of `slot`.
    pub fn key(&self, slot: usize) -> Option<SlotKey> {
        let n = self.items.len();
        if slot >= self.len() {
            return None;
        }
        Some(SlotKey {
            copy: slot / n,
            source: slot % n,
        })
    }

    /// Every slot in order with its render key.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        (0..COPIES).flat_map(move |copy| {
            self.items
                .iter()
                .enumerate()
                .map(move |(source, item)| (SlotKey { copy, source }, item))
        })
    }
}
