use std::marker::PhantomData;

use super::{Direction, Heap, HeapView, IndexMap, Larger, Smaller, Variant};
use crate::index;

/// Every node beats both of its children in direction `D`.
pub struct Ordered<D>(PhantomData<D>);

/// Every node is less than or equal to its children.
pub type Min = Ordered<Smaller>;
/// Every node is greater than or equal to its children.
pub type Max = Ordered<Larger>;

impl<D: Direction> Variant for Ordered<D> {
    const NAME: &'static str = D::NAME;

    type Root = D;

    fn bubble_up<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = index::parent(idx);
            if !D::exceeds(view.get(idx), view.get(parent)) {
                break; // Parent already beats the child
            }
            view.swap(idx, parent);
            idx = parent;
        }
        idx
    }

    fn bubble_up_recursive<T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> usize {
        if idx == 0 {
            return idx;
        }
        let parent = index::parent(idx);
        if !D::exceeds(view.get(idx), view.get(parent)) {
            return idx;
        }
        view.swap(idx, parent);
        Self::bubble_up_recursive(view, parent)
    }

    fn bubble_down<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, mut idx: usize) {
        // Swap with the best child as long as it beats the node
        while let Some(child) = view.extremum::<D>(&index::children(idx), idx) {
            view.swap(idx, child);
            idx = child;
        }
    }

    fn bubble_down_recursive<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize) {
        if let Some(child) = view.extremum::<D>(&index::children(idx), idx) {
            view.swap(idx, child);
            Self::bubble_down_recursive(view, child);
        }
    }

    fn violation<T: Ord>(values: &[T], length: usize) -> Option<usize> {
        let length = length.min(values.len());
        (1..length).find(|&idx| D::exceeds(&values[idx], &values[index::parent(idx)]))
    }
}

impl<T: Ord, D: Direction, M: IndexMap<T>> Heap<T, Ordered<D>, M> {
    /// Changes the element at `idx` in place and moves it to where it belongs.
    ///
    /// Covers both decrease-key and increase-key. `change` must not alter the element's slot.
    pub fn update(&mut self, idx: usize, change: impl FnOnce(&mut T)) {
        debug_assert!(idx < self.values.len(), "Index {} out of heap bounds", idx);

        change(&mut self.values[idx]);

        let mut view = self.view();
        if Ordered::<D>::bubble_up(&mut view, idx) == idx {
            Ordered::<D>::bubble_down(&mut view, idx);
        }
    }
}
