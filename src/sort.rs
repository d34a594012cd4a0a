use crate::heap::{Direction, HeapView, Larger, Ordered, Smaller, Untracked, Variant};

/// Sorts `values` in ascending order in place using a max-heap.
pub fn sort<T: Ord>(values: &mut [T]) {
    sort_in_direction::<Larger, T>(values);
}

/// Sorts `values` in descending order in place using a min-heap.
pub fn sort_descending<T: Ord>(values: &mut [T]) {
    sort_in_direction::<Smaller, T>(values);
}

/// Repeatedly moves the root behind the heap's shrinking logical length.
fn sort_in_direction<D: Direction, T: Ord>(values: &mut [T]) {
    let len = values.len();
    let mut view = HeapView::new(values, len, Untracked);
    view.build_iteratively::<Ordered<D>>();

    for end in (1..len).rev() {
        view.swap(0, end);
        view.truncate(end);
        Ordered::<D>::bubble_down(&mut view, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastrand::Rng;
    use itertools::Itertools;

    #[test]
    fn test_sort() {
        let cases: Vec<Vec<i32>> = vec![
            vec![],
            vec![1],
            vec![2, 1],
            vec![3, 1, 2],
            vec![5, 5, 5, 5],
            vec![9, -3, 7, 0, 7, 2, -8, 4],
        ];

        for case in cases {
            let mut ascending = case.clone();
            sort(&mut ascending);
            assert_eq!(ascending, case.iter().copied().sorted().collect_vec());

            let mut descending = case.clone();
            sort_descending(&mut descending);
            assert_eq!(descending, case.iter().copied().sorted().rev().collect_vec());
        }
    }

    #[test]
    fn test_sort_random() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        for _ in 0..100 {
            let mut values = (0..rng.usize(0..300))
                .map(|_| rng.u16(..))
                .collect_vec();
            let expected = values.iter().copied().sorted().collect_vec();
            sort(&mut values);
            assert_eq!(values, expected);
        }
    }
}
