//! Wrap-around index arithmetic over a fixed-size collection.
//!
//! [`IndexCycler`] is the only place that mutates a carousel's current index.
//! It knows nothing about items or rendering: it owns a length and an optional
//! position, and every operation answers with the new position.
//!
//! ## Empty Collections
//!
//! A cycler over zero items has no position. Every operation returns `None`
//! and leaves the cycler untouched, so callers never divide by zero or index
//! past the end:
//!
//! ```
//! use hotel_carousel::cycler::IndexCycler;
//!
//! let mut empty = IndexCycler::new(0);
//! assert_eq!(empty.advance(), None);
//!
//! let mut three = IndexCycler::new(3);
//! assert_eq!(three.retreat(), Some(2)); // 0 wraps to the end
//! ```

/// Index following `current` in a collection of `len` items, wrapping to 0.
///
/// Returns `None` when `len == 0`.
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((current % len + 1) % len)
}

/// Index preceding `current` in a collection of `len` items, wrapping to the end.
///
/// Returns `None` when `len == 0`.
pub fn prev_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((current % len + len - 1) % len)
}

/// Current position within a collection of known length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCycler {
    len: usize,
    current: Option<usize>,
}

impl IndexCycler {
    /// A cycler positioned on the first item, or with no position when `len == 0`.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: (len > 0).then_some(0),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current index, `None` only for an empty collection.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move forward one position, wrapping past the last item.
    pub fn advance(&mut self) -> Option<usize> {
        let next = next_index(self.current?, self.len)?;
        self.current = Some(next);
        Some(next)
    }

    /// Move back one position, wrapping before the first item.
    pub fn retreat(&mut self) -> Option<usize> {
        let prev = prev_index(self.current?, self.len)?;
        self.current = Some(prev);
        Some(prev)
    }

    /// Jump to `index` if it is in range.
    ///
    /// Out-of-range requests leave the position unchanged and return the
    /// existing current index.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if index < self.len {
            self.current = Some(index);
        }
        self.current
    }

    /// Distinct indices adjacent to the current one, previous before next.
    ///
    /// A single item has no neighbours; two items share one neighbour.
    pub fn neighbors(&self) -> Vec<usize> {
        let Some(current) = self.current else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(2);
        for candidate in [prev_index(current, self.len), next_index(current, self.len)]
            .into_iter()
            .flatten()
        {
            if candidate != current && !out.contains(&candidate) {
                out.push(candidate);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_to_zero() {
        assert_eq!(next_index(0, 3), Some(1));
        assert_eq!(next_index(2, 3), Some(0));
    }

    #[test]
    fn prev_wraps_to_end() {
        assert_eq!(prev_index(0, 3), Some(2));
        assert_eq!(prev_index(1, 3), Some(0));
    }

    #[test]
    fn zero_length_has_no_index() {
        assert_eq!(next_index(0, 0), None);
        assert_eq!(prev_index(0, 0), None);
    }

    #[test]
    fn single_item_stays_put() {
        assert_eq!(next_index(0, 1), Some(0));
        assert_eq!(prev_index(0, 1), Some(0));
    }

    #[test]
    fn next_and_prev_are_inverse_for_every_position() {
        for len in 1..=7 {
            for current in 0..len {
                let n = next_index(current, len).unwrap();
                assert_eq!(prev_index(n, len), Some(current), "len={len} current={current}");
                let p = prev_index(current, len).unwrap();
                assert_eq!(next_index(p, len), Some(current), "len={len} current={current}");
            }
        }
    }

    #[test]
    fn new_cycler_starts_at_zero() {
        let cycler = IndexCycler::new(4);
        assert_eq!(cycler.current(), Some(0));
        assert_eq!(cycler.len(), 4);
    }

    #[test]
    fn empty_cycler_is_inert() {
        let mut cycler = IndexCycler::new(0);
        assert!(cycler.is_empty());
        assert_eq!(cycler.advance(), None);
        assert_eq!(cycler.retreat(), None);
        assert_eq!(cycler.jump_to(0), None);
        assert_eq!(cycler.current(), None);
        assert!(cycler.neighbors().is_empty());
    }

    #[test]
    fn advance_cycles_through_all_items() {
        let mut cycler = IndexCycler::new(3);
        assert_eq!(cycler.advance(), Some(1));
        assert_eq!(cycler.advance(), Some(2));
        assert_eq!(cycler.advance(), Some(0));
    }

    #[test]
    fn retreat_from_start_wraps() {
        let mut cycler = IndexCycler::new(3);
        assert_eq!(cycler.retreat(), Some(2));
        assert_eq!(cycler.current(), Some(2));
    }

    #[test]
    fn jump_in_range() {
        let mut cycler = IndexCycler::new(5);
        assert_eq!(cycler.jump_to(3), Some(3));
        assert_eq!(cycler.current(), Some(3));
    }

    #[test]
    fn jump_out_of_range_keeps_current() {
        let mut cycler = IndexCycler::new(5);
        cycler.jump_to(2);
        assert_eq!(cycler.jump_to(5), Some(2));
        assert_eq!(cycler.jump_to(usize::MAX), Some(2));
        assert_eq!(cycler.current(), Some(2));
    }

    #[test]
    fn neighbors_of_middle_item() {
        let mut cycler = IndexCycler::new(5);
        cycler.jump_to(2);
        assert_eq!(cycler.neighbors(), vec![1, 3]);
    }

    #[test]
    fn neighbors_wrap_at_edges() {
        let cycler = IndexCycler::new(4);
        assert_eq!(cycler.neighbors(), vec![3, 1]);
    }

    #[test]
    fn neighbors_deduplicated_for_two_items() {
        let cycler = IndexCycler::new(2);
        assert_eq!(cycler.neighbors(), vec![1]);
    }

    #[test]
    fn single_item_has_no_neighbors() {
        let cycler = IndexCycler::new(1);
        assert!(cycler.neighbors().is_empty());
    }
}
