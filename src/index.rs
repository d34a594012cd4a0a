//! Index arithmetic for a complete binary tree stored in an array.
//!
//! ```text
//!                   0                  level 0 (min)
//!          1                 2         level 1 (max)
//!     3        4        5        6     level 2 (min)
//!   7   8    9  10   11  12   13  14   level 3 (max)
//! ```
//!
//! None of these functions check the result against a heap's logical length.

use stackvector::StackVec;

use crate::constants::MAX_FAMILY;

#[inline(always)]
pub fn left_child(idx: usize) -> usize {
    (idx << 1) + 1
}

#[inline(always)]
pub fn right_child(idx: usize) -> usize {
    (idx << 1) + 2
}

#[inline(always)]
pub fn parent(idx: usize) -> usize {
    debug_assert!(idx > 0, "The root has no parent");
    (idx - 1) >> 1
}

#[inline(always)]
pub fn grandparent(idx: usize) -> usize {
    parent(parent(idx))
}

/// Depth of the node, the root being on level 0.
#[inline(always)]
pub fn level(idx: usize) -> u32 {
    (idx + 1).ilog2()
}

/// Even levels hold minima in a min-max heap, odd levels maxima.
#[inline(always)]
pub fn is_min_level(idx: usize) -> bool {
    level(idx) & 1 == 0
}

#[inline(always)]
pub fn children(idx: usize) -> [usize; 2] {
    [left_child(idx), right_child(idx)]
}

/// Children followed by grandchildren of `idx`, restricted to indices below `length`.
pub fn family(idx: usize, length: usize) -> StackVec<[usize; MAX_FAMILY]> {
    let mut members = StackVec::new();

    let left = left_child(idx);
    for member in [left, left + 1] {
        if member < length {
            members.push(member);
        }
    }

    // Grandchildren are contiguous: 4i+3 ..= 4i+6
    let first_grandchild = left_child(left);
    for member in first_grandchild..first_grandchild + 4 {
        if member >= length {
            break;
        }
        members.push(member);
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_children() {
        let cases: Vec<(usize, usize, usize)> = vec![(0, 1, 2), (1, 3, 4), (2, 5, 6), (5, 11, 12)];

        for (idx, left, right) in cases {
            assert_eq!(left_child(idx), left, "left child of {}", idx);
            assert_eq!(right_child(idx), right, "right child of {}", idx);
            assert_eq!(parent(left), idx, "parent of {}", left);
            assert_eq!(parent(right), idx, "parent of {}", right);
        }

        assert_eq!(grandparent(3), 0);
        assert_eq!(grandparent(6), 0);
        assert_eq!(grandparent(7), 1);
        assert_eq!(grandparent(14), 2);
    }

    #[test]
    fn test_level_boundaries() {
        let cases: Vec<(usize, u32)> = vec![
            (0, 0),
            (1, 1),
            (2, 1),
            (3, 2),
            (6, 2),
            (7, 3),
            (14, 3),
            (15, 4),
            (30, 4),
            (31, 5),
        ];

        for (idx, expected) in cases {
            assert_eq!(level(idx), expected, "level of {}", idx);
            assert_eq!(is_min_level(idx), expected % 2 == 0, "level kind of {}", idx);
        }
    }

    #[test]
    fn test_family_respects_length() {
        assert_eq!(&family(0, 0)[..], &[] as &[usize]);
        assert_eq!(&family(0, 1)[..], &[] as &[usize]);
        assert_eq!(&family(0, 2)[..], &[1]);
        assert_eq!(&family(0, 3)[..], &[1, 2]);
        assert_eq!(&family(0, 5)[..], &[1, 2, 3, 4]);
        assert_eq!(&family(0, 7)[..], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&family(0, 100)[..], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&family(2, 12)[..], &[5, 6, 11]);
        assert_eq!(&family(3, 7)[..], &[] as &[usize]);
    }
}
