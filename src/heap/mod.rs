//! Array-backed binary heaps.
//!
//! A heap is stored as a complete binary tree in a slice (see [`crate::index`]).
//! Only the first `length` elements of the slice belong to the heap, the rest
//! is left untouched, which is what lets [`crate::sort`] sort in place.
//!
//! The ordering rules live in the [`Variant`] implementations:
//! - [`Min`] / [`Max`]: every node beats both of its children.
//! - [`MinMax`]: nodes on even levels are minima of their subtree, nodes on odd levels maxima.

use std::marker::PhantomData;

use log::debug;

pub mod binary;
pub mod min_max;
pub mod positions;

pub use binary::{Max, Min, Ordered};
pub use min_max::MinMax;
pub use positions::{IndexMap, SlotIndex, Slotted, Untracked};

/// The direction in which an element can beat another.
pub trait Direction {
    const NAME: &'static str;

    /// Whether `candidate` is strictly more extreme than `reference`.
    fn exceeds<T: Ord>(candidate: &T, reference: &T) -> bool;
}

pub struct Smaller;
pub struct Larger;

impl Direction for Smaller {
    const NAME: &'static str = "min";

    #[inline(always)]
    fn exceeds<T: Ord>(candidate: &T, reference: &T) -> bool {
        candidate < reference
    }
}

impl Direction for Larger {
    const NAME: &'static str = "max";

    #[inline(always)]
    fn exceeds<T: Ord>(candidate: &T, reference: &T) -> bool {
        candidate > reference
    }
}

/// The ordering rules of a heap.
///
/// Every bubble operation exists in an iterative and a recursive form. Both
/// perform the same swaps in the same order.
pub trait Variant {
    const NAME: &'static str;

    /// The direction in which the root beats every other element.
    type Root: Direction;

    /// Moves the element at `idx` towards the root until it is in order. Returns its final index.
    fn bubble_up<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize) -> usize;

    fn bubble_up_recursive<T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> usize;

    /// Moves the element at `idx` towards the leaves until it is in order.
    fn bubble_down<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize);

    fn bubble_down_recursive<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize);

    /// Returns the first index in `values[..length]` that breaks the ordering rules.
    fn violation<T: Ord>(values: &[T], length: usize) -> Option<usize>;
}

/// Finds the most extreme element among `candidates` that is strictly more
/// extreme than `reference`.
///
/// Candidates outside of `values[..length]` are skipped. The candidates are
/// scanned in the given order and every strictly better candidate replaces the
/// reference, so the last replacement wins: among equally extreme candidates
/// the first one in scan order is reported.
pub fn find_index_of_extremum<T: Ord, D: Direction>(
    values: &[T],
    length: usize,
    candidates: &[usize],
    reference: &T,
) -> Option<usize> {
    let bound = length.min(values.len());

    let mut best = None;
    let mut best_value = reference;
    for &candidate in candidates {
        if candidate >= bound {
            continue;
        }
        if D::exceeds(&values[candidate], best_value) {
            best = Some(candidate);
            best_value = &values[candidate];
        }
    }
    best
}

/// The first `length` elements of a slice, viewed as a heap.
///
/// All swaps are reported to the index map `M`.
pub struct HeapView<'a, T, M = Untracked> {
    values: &'a mut [T],
    length: usize,
    positions: M,
}

impl<'a, T: Ord, M: IndexMap<T>> HeapView<'a, T, M> {
    pub fn new(values: &'a mut [T], length: usize, positions: M) -> Self {
        debug_assert!(
            length <= values.len(),
            "Logical length {} exceeds the backing array of length {}",
            length,
            values.len()
        );
        HeapView {
            values,
            length,
            positions,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Shrinks the logical length. Elements past it stay in the backing array.
    pub fn truncate(&mut self, length: usize) {
        self.length = self.length.min(length);
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> &T {
        debug_assert!(idx < self.length, "Index {} out of heap bounds", idx);
        &self.values[idx]
    }

    /// The heap part of the backing array.
    pub fn as_slice(&self) -> &[T] {
        &self.values[..self.length]
    }

    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.positions.moved(&self.values[a], a);
        self.positions.moved(&self.values[b], b);
    }

    /// See [`find_index_of_extremum`], with the element at `reference` as reference.
    #[inline(always)]
    pub fn extremum<D: Direction>(&self, candidates: &[usize], reference: usize) -> Option<usize> {
        find_index_of_extremum::<T, D>(
            &self.values[..],
            self.length,
            candidates,
            &self.values[reference],
        )
    }

    /// Bottom-up heapify: bubbles down every internal node, last one first.
    pub fn build_iteratively<V: Variant>(&mut self) {
        for idx in (0..self.length / 2).rev() {
            V::bubble_down(self, idx);
        }
    }

    /// Heapifies both subtrees of the root, then bubbles the root down.
    pub fn build_recursively<V: Variant>(&mut self) {
        self.build_subtree::<V>(0);
    }

    fn build_subtree<V: Variant>(&mut self, root: usize) {
        let left = crate::index::left_child(root);
        if left >= self.length {
            return; // Leaf
        }
        self.build_subtree::<V>(left);
        self.build_subtree::<V>(left + 1);
        V::bubble_down_recursive(self, root);
    }
}

/// Heapifies `values[..length]` in place using the iterative bottom-up build.
pub fn build_iteratively<V: Variant, T: Ord>(values: &mut [T], length: usize) {
    HeapView::new(values, length, Untracked).build_iteratively::<V>();
}

/// Heapifies `values[..length]` in place using the recursive build.
pub fn build_recursively<V: Variant, T: Ord>(values: &mut [T], length: usize) {
    HeapView::new(values, length, Untracked).build_recursively::<V>();
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    #[default]
    Iterative,
    Recursive,
}

/// A heap owning its elements.
pub struct Heap<T, V, M = Untracked> {
    values: Vec<T>,
    positions: M,
    _variant: PhantomData<V>,
}

pub type MinHeap<T, M = Untracked> = Heap<T, Min, M>;
pub type MaxHeap<T, M = Untracked> = Heap<T, Max, M>;
pub type MinMaxHeap<T, M = Untracked> = Heap<T, MinMax, M>;

impl<T: Ord, V: Variant> Heap<T, V, Untracked> {
    pub fn new() -> Self {
        Self::with_positions(Untracked)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Heap {
            values: Vec::with_capacity(capacity),
            positions: Untracked,
            _variant: PhantomData,
        }
    }

    /// Takes ownership of `values` and heapifies them.
    pub fn from_vec(values: Vec<T>, strategy: BuildStrategy) -> Self {
        Self::from_vec_with(values, Untracked, strategy)
    }
}

impl<T: Ord, V: Variant> Default for Heap<T, V, Untracked> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, V: Variant, M: IndexMap<T>> Heap<T, V, M> {
    pub fn with_positions(positions: M) -> Self {
        Heap {
            values: Vec::new(),
            positions,
            _variant: PhantomData,
        }
    }

    /// Takes ownership of `values`, registers them with `positions` and heapifies them.
    pub fn from_vec_with(values: Vec<T>, positions: M, strategy: BuildStrategy) -> Self {
        let mut heap = Heap {
            values,
            positions,
            _variant: PhantomData,
        };
        for (idx, value) in heap.values.iter().enumerate() {
            heap.positions.moved(value, idx);
        }
        heap.build(strategy);
        heap
    }

    /// Re-establishes the ordering rules over all elements.
    pub fn build(&mut self, strategy: BuildStrategy) {
        let mut view = self.view();
        match strategy {
            BuildStrategy::Iterative => view.build_iteratively::<V>(),
            BuildStrategy::Recursive => view.build_recursively::<V>(),
        }
        debug!(
            "Built {} heap of {} elements ({:?})",
            V::NAME,
            self.values.len(),
            strategy
        );
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn positions(&self) -> &M {
        &self.positions
    }

    pub fn clear(&mut self) {
        for value in &self.values {
            self.positions.removed(value);
        }
        self.values.clear();
    }

    /// Adds `value` behind the last element and bubbles it up.
    pub fn insert(&mut self, value: T) {
        let idx = self.values.len();
        self.positions.moved(&value, idx);
        self.values.push(value);
        V::bubble_up(&mut self.view(), idx);
    }

    /// The root, i.e. the most extreme element in the direction of `V::Root`.
    pub fn try_find_root(&self) -> Option<&T> {
        self.values.first()
    }

    /// Removes and returns the root, or `None` if the heap is empty.
    pub fn try_remove_root(&mut self) -> Option<T> {
        self.remove_at(0)
    }

    /// Index of the first element equal to `value`.
    pub fn find_linear_index(&self, value: &T) -> Option<usize> {
        self.find_linear_index_by(|v| v == value)
    }

    /// Index of the first element matching `predicate`.
    pub fn find_linear_index_by(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.values.iter().position(predicate)
    }

    /// Returns the first index breaking the ordering rules, if any.
    pub fn violation(&self) -> Option<usize> {
        V::violation(&self.values, self.values.len())
    }

    /// Moves the last element into `idx` and bubbles it down.
    /// Only valid for positions where the replacement can't need to move up.
    fn remove_at(&mut self, idx: usize) -> Option<T> {
        if idx >= self.values.len() {
            return None;
        }

        let last = self.values.len() - 1;
        let mut view = self.view();
        view.swap(idx, last);

        let removed = self.values.pop()?;
        self.positions.removed(&removed);

        if idx < self.values.len() {
            V::bubble_down(&mut self.view(), idx);
        }
        Some(removed)
    }

    fn view(&mut self) -> HeapView<'_, T, &mut M> {
        let length = self.values.len();
        HeapView::new(&mut self.values, length, &mut self.positions)
    }
}

impl<T: Ord + Slotted, V: Variant, M: IndexMap<T>> Heap<T, V, M> {
    /// Current index of the element with the given slot.
    ///
    /// Asks the index map if it tracks positions, otherwise scans the heap.
    pub fn locate(&self, slot: usize) -> Option<usize> {
        if M::TRACKS {
            self.positions.index_of(slot)
        } else {
            self.find_linear_index_by(|value| value.slot() == slot)
        }
    }
}

impl<T: Ord + std::fmt::Debug, V, M> std::fmt::Debug for Heap<T, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

/// Randomized helpers shared by the variant tests.
#[cfg(test)]
pub(crate) mod testing {
    use fastrand::Rng;

    pub fn random_values(rng: &mut Rng, len: usize) -> Vec<i32> {
        // Narrow range => plenty of duplicates
        (0..len).map(|_| rng.i32(-50..50)).collect()
    }

    /// Every (ancestor, descendant) pair of `values`.
    pub fn ancestor_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
        (1..len).flat_map(|descendant| {
            std::iter::successors(Some(descendant), |&idx| {
                (idx > 0).then(|| crate::index::parent(idx))
            })
            .skip(1)
            .map(move |ancestor| (ancestor, descendant))
        })
    }
}
