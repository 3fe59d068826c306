// SPDX-License-Identifier: MPL-2.0
//! Cursor navigation over an album's images.
//!
//! A [`CursorSequence`] is the item-indexed counterpart of a page listing:
//! the position is the index of the current identity inside an ordered list.
//! Navigation never wraps around.

use super::pagination::NavTargets;

/// Ordered list of sibling identities with a current cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorSequence {
    items: Vec<String>,
    current: Option<String>,
}

impl CursorSequence {
    /// Creates a sequence positioned on `current`.
    pub fn new<I, S>(items: I, current: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            current: Some(current.into()),
        }
    }

    /// Creates a sequence with no cursor set.
    pub fn unpositioned<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    /// Moves the cursor. Unknown identities are accepted and leave the
    /// sequence without a position.
    pub fn set_current(&mut self, identity: impl Into<String>) {
        self.current = Some(identity.into());
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.items.iter().any(|item| item == identity)
    }

    /// 0-based index of the cursor, or `None` when it is unset or unknown.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        let current = self.current.as_deref()?;
        self.items.iter().position(|item| item == current)
    }

    /// Computes the five navigation targets.
    ///
    /// Returns `None` when the cursor is not part of the sequence: an unknown
    /// identity yields no targets at all. `last`, when present, is always the
    /// final item.
    #[must_use]
    pub fn targets(&self) -> Option<NavTargets<String>> {
        let index = self.position()?;
        let last_index = self.items.len() - 1;
        let at_first = index == 0;
        let at_last = index == last_index;

        Some(NavTargets {
            first: (!at_first).then(|| self.items[0].clone()),
            previous: (!at_first).then(|| self.items[index - 1].clone()),
            current: self.items[index].clone(),
            next: (!at_last).then(|| self.items[index + 1].clone()),
            last: (!at_last).then(|| self.items[last_index].clone()),
            position: index + 1,
            total: self.items.len(),
        })
    }

    /// Identities of the items immediately before and after the cursor,
    /// used for speculative prefetching.
    #[must_use]
    pub fn adjacent(&self) -> Vec<&str> {
        self.neighbours(1)
    }

    /// Up to `count` identities on each side of the cursor, nearest first.
    #[must_use]
    pub fn neighbours(&self, count: usize) -> Vec<&str> {
        let Some(index) = self.position() else {
            return Vec::new();
        };

        let mut result = Vec::with_capacity(count * 2);
        for distance in 1..=count {
            if let Some(previous) = index.checked_sub(distance) {
                result.push(self.items[previous].as_str());
            }
            if let Some(next) = self.items.get(index + distance) {
                result.push(next.as_str());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(current: &str) -> CursorSequence {
        CursorSequence::new(["a", "b", "c", "d"], current)
    }

    #[test]
    fn first_item_has_no_backward_targets() {
        let targets = sequence("a").targets().expect("known cursor");
        assert_eq!(targets.first, None);
        assert_eq!(targets.previous, None);
        assert_eq!(targets.next.as_deref(), Some("b"));
        assert_eq!(targets.last.as_deref(), Some("d"));
        assert_eq!(targets.label(), "1 / 4");
    }

    #[test]
    fn last_item_has_no_forward_targets() {
        let targets = sequence("d").targets().expect("known cursor");
        assert_eq!(targets.first.as_deref(), Some("a"));
        assert_eq!(targets.previous.as_deref(), Some("c"));
        assert_eq!(targets.next, None);
        assert_eq!(targets.last, None);
        assert_eq!(targets.label(), "4 / 4");
    }

    #[test]
    fn last_is_fixed_target_not_next() {
        for current in ["a", "b", "c"] {
            let targets = sequence(current).targets().expect("known cursor");
            assert_eq!(targets.last.as_deref(), Some("d"));
        }
    }

    #[test]
    fn single_item_has_no_targets_but_current() {
        let targets = CursorSequence::new(["only"], "only")
            .targets()
            .expect("known cursor");
        assert_eq!(targets.current, "only");
        assert!(targets.first.is_none() && targets.previous.is_none());
        assert!(targets.next.is_none() && targets.last.is_none());
        assert_eq!(targets.label(), "1 / 1");
    }

    #[test]
    fn unknown_cursor_yields_nothing() {
        assert!(sequence("zzz").targets().is_none());
        assert!(CursorSequence::unpositioned(["a"]).targets().is_none());
        assert!(sequence("zzz").adjacent().is_empty());
    }

    #[test]
    fn no_wrap_around_at_edges() {
        assert_eq!(sequence("a").adjacent(), vec!["b"]);
        assert_eq!(sequence("d").adjacent(), vec!["c"]);
        assert_eq!(sequence("b").adjacent(), vec!["a", "c"]);
    }

    #[test]
    fn neighbours_are_nearest_first() {
        assert_eq!(sequence("b").neighbours(2), vec!["a", "c", "d"]);
    }
}
