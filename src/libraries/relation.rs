//! Many-to-many relation queried from both sides.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Pairs of `(L, R)` kept in insertion order on both sides
#[derive(Debug, Clone)]
pub struct SymmetricRelation<L, R> {
    left_to_right: FxHashMap<L, Vec<R>>,
    right_to_left: FxHashMap<R, Vec<L>>,
}

impl<L, R> Default for SymmetricRelation<L, R> {
    fn default() -> Self {
        Self {
            left_to_right: FxHashMap::default(),
            right_to_left: FxHashMap::default(),
        }
    }
}

impl<L, R> SymmetricRelation<L, R>
where
    L: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, left: L, right: R) {
        self.left_to_right.entry(left).or_default().push(right);
        self.right_to_left.entry(right).or_default().push(left);
    }

    /// Values related to `left`
    pub fn rights_of(&self, left: L) -> &[R] {
        self.left_to_right.get(&left).map(Vec::as_slice).unwrap_or_default()
    }

    /// Values related to `right`
    pub fn lefts_of(&self, right: R) -> &[L] {
        self.right_to_left.get(&right).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, left: L, right: R) -> bool {
        self.rights_of(left).contains(&right)
    }

    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }
}
