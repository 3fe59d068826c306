// SPDX-License-Identifier: MPL-2.0
//! Sibling order keys.
//!
//! Images inside an album are ordered by a sparse positive integer key. The
//! value `0` is reserved by the catalog for "not yet ordered" and is never a
//! valid position.

use std::fmt;

/// Sparse order key of an item within its parent collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OrderKey(u32);

impl OrderKey {
    /// The unassigned sentinel. A window holding it must be baked before reordering.
    pub const UNASSIGNED: OrderKey = OrderKey(0);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Key for a 0-based display position (`index + 1`).
    #[must_use]
    pub fn from_position(index: usize) -> Self {
        Self(u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1)))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for OrderKey {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that occupies a slot in an ordered sibling window.
pub trait Orderable {
    fn identity(&self) -> &str;
    fn order_key(&self) -> OrderKey;
}

/// Returns `true` when any key in the window is the unassigned sentinel.
pub fn needs_bake<T: Orderable>(window: &[T]) -> bool {
    window.iter().any(|item| !item.order_key().is_assigned())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slot(&'static str, u32);

    impl Orderable for Slot {
        fn identity(&self) -> &str {
            self.0
        }

        fn order_key(&self) -> OrderKey {
            OrderKey::new(self.1)
        }
    }

    #[test]
    fn zero_is_unassigned() {
        assert!(!OrderKey::UNASSIGNED.is_assigned());
        assert!(OrderKey::new(1).is_assigned());
        assert_eq!(OrderKey::default(), OrderKey::UNASSIGNED);
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(OrderKey::from_position(0), OrderKey::new(1));
        assert_eq!(OrderKey::from_position(9).value(), 10);
    }

    #[test]
    fn needs_bake_detects_any_sentinel() {
        assert!(!needs_bake::<Slot>(&[]));
        assert!(!needs_bake(&[Slot("a", 1), Slot("b", 5)]));
        assert!(needs_bake(&[Slot("a", 1), Slot("b", 0)]));
    }
}
