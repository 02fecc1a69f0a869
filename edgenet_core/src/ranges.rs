//! Vertical territory claimed by nets.
//!
//! Every net with at least one live node occupies the rows between its
//! topmost and bottommost node. New nets are placed outside all of these
//! spans, and a node may not step into a row claimed by another net.

use crate::net::NetId;
use serde::{Deserialize, Serialize};

/// Inclusive vertical extent `[top, bottom]` of a net's live nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Limits {
    /// Smallest row among live nodes
    pub top: i32,

    /// Largest row among live nodes
    pub bottom: i32,
}

impl Limits {
    /// Creates limits from two rows, in any order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            top: a.min(b),
            bottom: a.max(b),
        }
    }

    /// Vertical spread of the net.
    pub fn thickness(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns true if `row` lies within `[top, bottom]`.
    pub fn contains(&self, row: i32) -> bool {
        row >= self.top && row <= self.bottom
    }

    /// Widens the limits to include `row`.
    pub fn include(&mut self, row: i32) {
        self.top = self.top.min(row);
        self.bottom = self.bottom.max(row);
    }
}

/// Snapshot of every net's limits, tagged with the owning net.
///
/// Taken before each new net is placed and at the start of every tick.
/// It is never updated while a tick is running, so all nets of the tick
/// see the same territory regardless of execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedRanges {
    entries: Vec<(NetId, Limits)>,
}

impl OccupiedRanges {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the limits of `owner`.
    pub fn insert(&mut self, owner: NetId, limits: Limits) {
        self.entries.push((owner, limits));
    }

    /// Returns true if any net claims `row`.
    pub fn contains(&self, row: i32) -> bool {
        self.entries.iter().any(|(_, limits)| limits.contains(row))
    }

    /// Returns true if a net other than `owner` claims `row`.
    pub fn contains_foreign(&self, row: i32, owner: NetId) -> bool {
        self.entries
            .iter()
            .any(|(id, limits)| *id != owner && limits.contains(row))
    }

    /// Returns true if every row of `[lower, upper]` is claimed.
    ///
    /// An empty interval (`lower > upper`) counts as covered: there is
    /// nothing left to sample from it.
    pub fn covers(&self, lower: i32, upper: i32) -> bool {
        if lower > upper {
            return true;
        }
        let mut spans: Vec<Limits> = self.entries.iter().map(|(_, limits)| *limits).collect();
        spans.sort_by_key(|limits| limits.top);

        // First row not yet known to be covered
        let mut next = lower as i64;
        for span in spans {
            if span.top as i64 > next {
                break;
            }
            next = next.max(span.bottom as i64 + 1);
            if next > upper as i64 {
                return true;
            }
        }
        next > upper as i64
    }

    /// Iterates over `(owner, limits)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(NetId, Limits)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(NetId, Limits)> for OccupiedRanges {
    fn from_iter<I: IntoIterator<Item = (NetId, Limits)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(spans: &[(i32, i32)]) -> OccupiedRanges {
        spans
            .iter()
            .enumerate()
            .map(|(i, &(top, bottom))| (NetId(i as u64), Limits::new(top, bottom)))
            .collect()
    }

    #[test]
    fn test_limits_are_inclusive() {
        let limits = Limits::new(7, 3);
        assert_eq!(limits.top, 3);
        assert_eq!(limits.bottom, 7);
        assert_eq!(limits.thickness(), 4);
        assert!(limits.contains(3));
        assert!(limits.contains(7));
        assert!(!limits.contains(8));
    }

    #[test]
    fn test_contains_foreign_skips_owner() {
        let occupied = ranges(&[(10, 12), (20, 20)]);
        assert!(occupied.contains(11));
        assert!(!occupied.contains_foreign(11, NetId(0)));
        assert!(occupied.contains_foreign(11, NetId(1)));
        assert!(occupied.contains_foreign(20, NetId(0)));
    }

    #[test]
    fn test_covers_merges_overlapping_and_adjacent_spans() {
        let occupied = ranges(&[(5, 9), (0, 3), (4, 4), (8, 12)]);
        assert!(occupied.covers(0, 12));
        assert!(occupied.covers(2, 10));
        assert!(!occupied.covers(0, 13));
    }

    #[test]
    fn test_covers_detects_gap() {
        let occupied = ranges(&[(0, 3), (5, 9)]);
        assert!(!occupied.covers(0, 9));
        assert!(occupied.covers(5, 9));
    }

    #[test]
    fn test_empty_snapshot_covers_nothing() {
        let occupied = OccupiedRanges::new();
        assert!(!occupied.covers(0, 0));
        assert!(occupied.covers(1, 0));
        assert!(!occupied.contains(0));
    }
}
