use super::{
    Direction, Heap, HeapView, IndexMap, Larger, Smaller, Variant, find_index_of_extremum,
};
use crate::index;

/// Nodes on even levels are less than or equal to all of their descendants,
/// nodes on odd levels greater than or equal to them.
///
/// The root holds the minimum, one of its children the maximum.
pub struct MinMax;

impl MinMax {
    /// Swaps `idx` with its grandparent as long as it beats it in direction `D`.
    fn bubble_up_grandparents<D: Direction, T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        mut idx: usize,
    ) -> usize {
        // 0, 1 and 2 have no grandparent
        while idx > 2 {
            let grandparent = index::grandparent(idx);
            if !D::exceeds(view.get(idx), view.get(grandparent)) {
                break;
            }
            view.swap(idx, grandparent);
            idx = grandparent;
        }
        idx
    }

    fn bubble_up_grandparents_recursive<D: Direction, T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> usize {
        if idx <= 2 {
            return idx;
        }
        let grandparent = index::grandparent(idx);
        if !D::exceeds(view.get(idx), view.get(grandparent)) {
            return idx;
        }
        view.swap(idx, grandparent);
        Self::bubble_up_grandparents_recursive::<D, T, M>(view, grandparent)
    }

    /// Decides whether the node at `idx` climbs through min or max levels.
    ///
    /// If it beats its parent (which sits on the opposite kind of level) the two
    /// are swapped first. Returns the start index and whether it climbs min levels.
    fn bubble_up_start<T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> (usize, bool) {
        let parent = index::parent(idx);
        let on_min_level = index::is_min_level(idx);

        let beats_parent = if on_min_level {
            Larger::exceeds(view.get(idx), view.get(parent))
        } else {
            Smaller::exceeds(view.get(idx), view.get(parent))
        };

        if beats_parent {
            view.swap(idx, parent);
            (parent, !on_min_level)
        } else {
            (idx, on_min_level)
        }
    }

    /// One step of bubbling down the node at `idx` on a level of kind `D`.
    ///
    /// Swaps the node with the most extreme of its children and grandchildren, if
    /// that one beats it. Returns the grandchild to continue from, if any.
    fn bubble_down_step<D: Direction, Opposite: Direction, T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> Option<usize> {
        let family = index::family(idx, view.len());
        let best = view.extremum::<D>(&family[..], idx)?;
        view.swap(idx, best);

        if best <= index::right_child(idx) {
            // The displaced node beats everything below the child it moved into
            return None;
        }

        // The displaced node may now beat its new parent, which sits on the opposite kind of level
        let parent = index::parent(best);
        if Opposite::exceeds(view.get(best), view.get(parent)) {
            view.swap(best, parent);
        }
        Some(best)
    }

    fn bubble_down_once<T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> Option<usize> {
        if index::is_min_level(idx) {
            Self::bubble_down_step::<Smaller, Larger, T, M>(view, idx)
        } else {
            Self::bubble_down_step::<Larger, Smaller, T, M>(view, idx)
        }
    }

    /// Whether `descendant` is in order relative to `ancestor`.
    fn in_order<T: Ord>(values: &[T], ancestor: usize, descendant: usize) -> bool {
        if index::is_min_level(ancestor) {
            values[ancestor] <= values[descendant]
        } else {
            values[ancestor] >= values[descendant]
        }
    }
}

impl Variant for MinMax {
    const NAME: &'static str = "min-max";

    type Root = Smaller;

    fn bubble_up<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize) -> usize {
        if idx == 0 {
            return idx;
        }
        match Self::bubble_up_start(view, idx) {
            (start, true) => Self::bubble_up_grandparents::<Smaller, T, M>(view, start),
            (start, false) => Self::bubble_up_grandparents::<Larger, T, M>(view, start),
        }
    }

    fn bubble_up_recursive<T: Ord, M: IndexMap<T>>(
        view: &mut HeapView<'_, T, M>,
        idx: usize,
    ) -> usize {
        if idx == 0 {
            return idx;
        }
        match Self::bubble_up_start(view, idx) {
            (start, true) => Self::bubble_up_grandparents_recursive::<Smaller, T, M>(view, start),
            (start, false) => Self::bubble_up_grandparents_recursive::<Larger, T, M>(view, start),
        }
    }

    fn bubble_down<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, mut idx: usize) {
        while let Some(next) = Self::bubble_down_once(view, idx) {
            idx = next;
        }
    }

    fn bubble_down_recursive<T: Ord, M: IndexMap<T>>(view: &mut HeapView<'_, T, M>, idx: usize) {
        if let Some(next) = Self::bubble_down_once(view, idx) {
            Self::bubble_down_recursive(view, next);
        }
    }

    fn violation<T: Ord>(values: &[T], length: usize) -> Option<usize> {
        let length = length.min(values.len());
        (1..length).find(|&idx| {
            let parent = index::parent(idx);
            !Self::in_order(values, parent, idx)
                || (parent > 0 && !Self::in_order(values, index::parent(parent), idx))
        })
    }
}

impl<T: Ord, M: IndexMap<T>> Heap<T, MinMax, M> {
    /// Index of the maximum: the root if it is alone or ties, else its larger child.
    fn max_index(&self) -> Option<usize> {
        let root = self.values.first()?;
        Some(
            find_index_of_extremum::<T, Larger>(&self.values, self.values.len(), &[1, 2], root)
                .unwrap_or(0),
        )
    }

    pub fn try_find_min(&self) -> Option<&T> {
        self.try_find_root()
    }

    pub fn try_find_max(&self) -> Option<&T> {
        self.max_index().map(|idx| &self.values[idx])
    }

    pub fn try_remove_min(&mut self) -> Option<T> {
        self.try_remove_root()
    }

    pub fn try_remove_max(&mut self) -> Option<T> {
        let idx = self.max_index()?;
        self.remove_at(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{
        BuildStrategy, MinMaxHeap, Untracked, build_iteratively, build_recursively,
        testing::{ancestor_pairs, random_values},
    };
    use fastrand::Rng;
    use itertools::Itertools;

    /// Checks the alternation against every descendant, not only parents and grandparents.
    fn assert_min_max(values: &[i32]) {
        for (ancestor, descendant) in ancestor_pairs(values.len()) {
            if index::is_min_level(ancestor) {
                assert!(
                    values[ancestor] <= values[descendant],
                    "min level values[{}] = {} > descendant values[{}] = {} in {:?}",
                    ancestor,
                    values[ancestor],
                    descendant,
                    values[descendant],
                    values
                );
            } else {
                assert!(
                    values[ancestor] >= values[descendant],
                    "max level values[{}] = {} < descendant values[{}] = {} in {:?}",
                    ancestor,
                    values[ancestor],
                    descendant,
                    values[descendant],
                    values
                );
            }
        }
        assert_eq!(MinMax::violation(values, values.len()), None);
    }

    #[test]
    fn test_build_known_array() {
        let mut values = vec![8, 71, 41, 31, 10, 11, 16, 46, 51, 31, 21, 13];
        build_iteratively::<MinMax, _>(&mut values, 12);
        assert_eq!(values[0], 8);
        assert_eq!(values[1].max(values[2]), 71);
        assert_min_max(&values);
    }

    #[test]
    fn test_violation_detects_grandparent() {
        // Parent relations hold, but 1 sits below the max level 9 under root 2
        let values = [2, 9, 8, 1];
        assert_eq!(MinMax::violation(&values, 4), Some(3));
        assert_eq!(MinMax::violation(&values, 3), None);
    }

    #[test]
    fn test_builds_on_level_boundaries() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        // Sizes ending on the last node of a level, the first node of the next level and in between
        let sizes = [0, 1, 2, 3, 4, 6, 7, 8, 14, 15, 16, 30, 31, 32, 63, 64, 65];
        for &len in sizes.iter().cycle().take(sizes.len() * 20) {
            let original = random_values(&mut rng, len);

            let mut iterative = original.clone();
            build_iteratively::<MinMax, _>(&mut iterative, len);
            assert_min_max(&iterative);

            let mut recursive = original.clone();
            build_recursively::<MinMax, _>(&mut recursive, len);
            assert_min_max(&recursive);
        }
    }

    #[test]
    fn test_builds_on_random_arrays() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        for _ in 0..300 {
            let len = rng.usize(0..200);
            let original = random_values(&mut rng, len);

            let mut iterative = original.clone();
            build_iteratively::<MinMax, _>(&mut iterative, len);
            assert_min_max(&iterative);

            let mut recursive = original.clone();
            build_recursively::<MinMax, _>(&mut recursive, len);
            assert_min_max(&recursive);

            assert_eq!(
                recursive.iter().sorted().collect_vec(),
                original.iter().sorted().collect_vec()
            );
        }
    }

    #[test]
    fn test_recursive_bubbles_match_iterative() {
        let mut rng = Rng::with_seed(11);

        for _ in 0..300 {
            let len = rng.usize(1..80);
            let original = random_values(&mut rng, len);

            // Bubble down from every internal node in both forms
            let mut iterative = original.clone();
            let mut recursive = original.clone();
            for idx in (0..len / 2).rev() {
                MinMax::bubble_down(&mut HeapView::new(&mut iterative, len, Untracked), idx);
                MinMax::bubble_down_recursive(
                    &mut HeapView::new(&mut recursive, len, Untracked),
                    idx,
                );
                assert_eq!(iterative, recursive);
            }

            // Append one value and bubble it up in both forms
            let value = rng.i32(-60..60);
            iterative.push(value);
            recursive.push(value);
            let last = len;
            let up_iterative =
                MinMax::bubble_up(&mut HeapView::new(&mut iterative, len + 1, Untracked), last);
            let up_recursive = MinMax::bubble_up_recursive(
                &mut HeapView::new(&mut recursive, len + 1, Untracked),
                last,
            );
            assert_eq!(up_iterative, up_recursive);
            assert_eq!(iterative, recursive);
            assert_min_max(&iterative);
        }
    }

    #[test]
    fn test_insert_on_level_boundaries() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        for _ in 0..50 {
            let mut heap: MinMaxHeap<i32> = MinMaxHeap::new();
            // Crosses the boundaries of the first six levels
            for n in 0..70 {
                heap.insert(rng.i32(-40..40));
                assert_eq!(heap.len(), n + 1);
                assert_min_max(heap.as_slice());
            }
        }
    }

    #[test]
    fn test_min_and_max_extraction() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        for _ in 0..100 {
            let len = rng.usize(0..120);
            let values = random_values(&mut rng, len);
            let sorted = values.iter().copied().sorted().collect_vec();

            let mut heap: MinMaxHeap<i32> =
                MinMaxHeap::from_vec(values.clone(), BuildStrategy::Recursive);
            assert_eq!(heap.try_find_min(), sorted.first());
            assert_eq!(heap.try_find_max(), sorted.last());

            let ascending = std::iter::from_fn(|| {
                let min = heap.try_remove_min();
                assert_min_max(heap.as_slice());
                min
            })
            .collect_vec();
            assert_eq!(ascending, sorted);
            assert_eq!(heap.try_remove_min(), None);

            let mut heap: MinMaxHeap<i32> = MinMaxHeap::from_vec(values, BuildStrategy::Iterative);
            let descending = std::iter::from_fn(|| {
                let max = heap.try_remove_max();
                assert_min_max(heap.as_slice());
                max
            })
            .collect_vec();
            assert_eq!(descending, sorted.iter().rev().copied().collect_vec());
            assert_eq!(heap.try_remove_max(), None);
            assert_eq!(heap.try_find_max(), None);
        }
    }

    #[test]
    fn test_alternating_extraction() {
        let mut heap: MinMaxHeap<i32> =
            MinMaxHeap::from_vec((1..=10).rev().collect(), BuildStrategy::Iterative);

        assert_eq!(heap.try_remove_max(), Some(10));
        assert_eq!(heap.try_remove_min(), Some(1));
        assert_eq!(heap.try_remove_max(), Some(9));
        assert_eq!(heap.try_remove_min(), Some(2));
        assert_min_max(heap.as_slice());
        assert_eq!(heap.len(), 6);

        let mut single: MinMaxHeap<i32> = MinMaxHeap::new();
        single.insert(5);
        assert_eq!(single.try_find_max(), Some(&5));
        assert_eq!(single.try_remove_max(), Some(5));
        assert!(single.is_empty());
    }
}
