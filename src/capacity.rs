//! Growth policies for strings which have exceeded their available storage.

use core::fmt::Debug;

use crate::storage::utils::{MAX_CAPACITY, MIN_NON_ZERO_CAP};

/// Growth behavior for strings which have exceeded their available storage
pub(crate) trait Grow: Debug {
    /// Calculate the next capacity to request from the allocator
    fn next_capacity(prev: usize, minimum: usize) -> usize;
}

/// Growth behavior which never requests extra capacity
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity(_prev: usize, minimum: usize) -> usize {
        minimum
    }
}

/// Growth behavior which consistently doubles in size
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity(prev: usize, minimum: usize) -> usize {
        let preferred = if prev == 0 {
            MIN_NON_ZERO_CAP
        } else {
            prev.saturating_mul(2).min(MAX_CAPACITY)
        };
        preferred.max(minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_exact() {
        assert_eq!(GrowExact::next_capacity(0, 3), 3);
        assert_eq!(GrowExact::next_capacity(100, 101), 101);
    }

    #[test]
    fn grow_doubling() {
        assert_eq!(GrowDoubling::next_capacity(0, 1), MIN_NON_ZERO_CAP);
        assert_eq!(GrowDoubling::next_capacity(0, 20), 20);
        assert_eq!(GrowDoubling::next_capacity(8, 9), 16);
        assert_eq!(GrowDoubling::next_capacity(16, 100), 100);
    }

    #[test]
    fn grow_doubling_clamped() {
        let prev = MAX_CAPACITY / 2 + 1;
        assert_eq!(GrowDoubling::next_capacity(prev, prev + 1), MAX_CAPACITY);
        // an oversized request is passed through and rejected by the layout
        assert_eq!(
            GrowDoubling::next_capacity(MAX_CAPACITY, usize::MAX),
            usize::MAX
        );
    }
}
