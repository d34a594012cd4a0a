/// An element with a stable integer identity, independent of its priority.
pub trait Slotted {
    fn slot(&self) -> usize;
}

/// Observes where the heap places its elements.
///
/// A heap reports every move, insertion and removal, which lets callers find
/// an element's current position after changing its priority from outside.
pub trait IndexMap<T> {
    /// Whether `index_of` answers lookups. If not, callers fall back to a linear scan.
    const TRACKS: bool;

    /// `value` now lives at `index`.
    fn moved(&mut self, value: &T, index: usize);

    /// `value` is no longer part of the heap.
    fn removed(&mut self, value: &T);

    /// Current heap index of the element with the given slot.
    fn index_of(&self, slot: usize) -> Option<usize>;
}

impl<T, M: IndexMap<T> + ?Sized> IndexMap<T> for &mut M {
    const TRACKS: bool = M::TRACKS;

    #[inline(always)]
    fn moved(&mut self, value: &T, index: usize) {
        (**self).moved(value, index)
    }

    #[inline(always)]
    fn removed(&mut self, value: &T) {
        (**self).removed(value)
    }

    #[inline(always)]
    fn index_of(&self, slot: usize) -> Option<usize> {
        (**self).index_of(slot)
    }
}

/// Tracks nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Untracked;

impl<T> IndexMap<T> for Untracked {
    const TRACKS: bool = false;

    #[inline(always)]
    fn moved(&mut self, _value: &T, _index: usize) {}

    #[inline(always)]
    fn removed(&mut self, _value: &T) {}

    #[inline(always)]
    fn index_of(&self, _slot: usize) -> Option<usize> {
        None
    }
}

/// Maps the slot of each element to its index in the heap.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    slot_to_heap_idx: Vec<usize>,
}

impl SlotIndex {
    const UNSET: usize = usize::MAX;

    /// Creates an empty map for slots in `0..capacity`. Grows on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        SlotIndex {
            slot_to_heap_idx: vec![Self::UNSET; capacity],
        }
    }

    /// Checks whether an element with the given slot is in the heap.
    pub fn contains(&self, slot: usize) -> bool {
        self.slot_to_heap_idx
            .get(slot)
            .is_some_and(|&idx| idx != Self::UNSET)
    }
}

impl<T: Slotted> IndexMap<T> for SlotIndex {
    const TRACKS: bool = true;

    fn moved(&mut self, value: &T, index: usize) {
        let slot = value.slot();
        if slot >= self.slot_to_heap_idx.len() {
            self.slot_to_heap_idx.resize(slot + 1, Self::UNSET);
        }
        self.slot_to_heap_idx[slot] = index;
    }

    fn removed(&mut self, value: &T) {
        if let Some(idx) = self.slot_to_heap_idx.get_mut(value.slot()) {
            *idx = Self::UNSET;
        }
    }

    fn index_of(&self, slot: usize) -> Option<usize> {
        match self.slot_to_heap_idx.get(slot) {
            Some(&idx) if idx != Self::UNSET => Some(idx),
            _ => None,
        }
    }
}
