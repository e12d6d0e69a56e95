/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The shipped slotframe layouts.
//!
//! | Layout | id | max nodes | cells | shape after the 3 beacons |
//! |---|---|---|---|---|
//! | [`test_layout`] | `0xBF` | 0 | 1 | `U` (fixture, no beacons) |
//! | [`minuscule`] | 6 | 5 | 11 | `S D U U D U U U` |
//! | [`tiny`] | 5 | 11 | 17 | `S D U×4 D U×7` |
//! | [`huge`] | 1 | 101 | 137 | 11 × `S D U×4 D U×5`, then `U U` |
//!
//! All production layouts use backoff exponents 5..=9, and their data-cell
//! channel offsets are a permutation of `0..n_data`.

use crate::cell::{Cell, CellRole};
use crate::schedule::Schedule;

const B: CellRole = CellRole::Beacon;
const S: CellRole = CellRole::Shared;
const D: CellRole = CellRole::Downlink;
const U: CellRole = CellRole::Uplink;

/// Backoff exponent bounds shared by every shipped layout.
pub const DEFAULT_BACKOFF: (u8, u8) = (5, 9);

pub const TEST_ID: u8 = 0xBF;
pub const MINUSCULE_ID: u8 = 6;
pub const TINY_ID: u8 = 5;
pub const HUGE_ID: u8 = 1;

fn build(id: u8, max_nodes: u8, table: &[(CellRole, u8)]) -> Schedule {
    let cells = table
        .iter()
        .map(|&(role, offset)| Cell::new(role, offset))
        .collect();
    Schedule::new(id, max_nodes, DEFAULT_BACKOFF, cells)
}

/// Single-cell layout used by tests only.  The channel offset is irrelevant.
pub fn test_layout() -> Schedule {
    build(TEST_ID, 0, &[(U, 0)])
}

/// 11 slots, up to 5 nodes.
pub fn minuscule() -> Schedule {
    #[rustfmt::skip]
    const CELLS: &[(CellRole, u8)] = &[
        (B, 0), (B, 1), (B, 2),
        (S, 6), (D, 3), (U, 5), (U, 1), (D, 4), (U, 0), (U, 7), (U, 2),
    ];
    build(MINUSCULE_ID, 5, CELLS)
}

/// 17 slots, up to 11 nodes.
pub fn tiny() -> Schedule {
    #[rustfmt::skip]
    const CELLS: &[(CellRole, u8)] = &[
        (B, 0), (B, 1), (B, 2),
        (S, 2), (D, 5), (U, 6), (U, 13), (U, 7), (U, 0),
                (D, 4), (U, 10), (U, 12), (U, 1), (U, 11), (U, 8), (U, 3), (U, 9),
    ];
    build(TINY_ID, 11, CELLS)
}

/// 137 slots, up to 101 nodes.
pub fn huge() -> Schedule {
    #[rustfmt::skip]
    const CELLS: &[(CellRole, u8)] = &[
        (B, 0), (B, 1), (B, 2),
        (S, 9),   (D, 30),  (U, 33),  (U, 91),  (U, 43),  (U, 13),
                  (D, 103), (U, 102), (U, 83),  (U, 90),  (U, 0),   (U, 92),
        (S, 11),  (D, 38),  (U, 59),  (U, 52),  (U, 114), (U, 31),
                  (D, 7),   (U, 63),  (U, 104), (U, 111), (U, 53),  (U, 22),
        (S, 130), (D, 26),  (U, 80),  (U, 3),   (U, 125), (U, 20),
                  (D, 65),  (U, 18),  (U, 96),  (U, 10),  (U, 37),  (U, 16),
        (S, 101), (D, 110), (U, 12),  (U, 15),  (U, 55),  (U, 100),
                  (D, 123), (U, 112), (U, 40),  (U, 2),   (U, 21),  (U, 4),
        (S, 47),  (D, 84),  (U, 58),  (U, 17),  (U, 60),  (U, 107),
                  (D, 49),  (U, 115), (U, 126), (U, 35),  (U, 36),  (U, 68),
        (S, 93),  (D, 124), (U, 79),  (U, 28),  (U, 14),  (U, 6),
                  (D, 72),  (U, 70),  (U, 86),  (U, 71),  (U, 81),  (U, 128),
        (S, 97),  (D, 131), (U, 45),  (U, 23),  (U, 50),  (U, 98),
                  (D, 106), (U, 118), (U, 77),  (U, 61),  (U, 8),   (U, 116),
        (S, 108), (D, 69),  (U, 119), (U, 82),  (U, 74),  (U, 89),
                  (D, 99),  (U, 56),  (U, 109), (U, 57),  (U, 46),  (U, 132),
        (S, 44),  (D, 34),  (U, 39),  (U, 19),  (U, 85),  (U, 1),
                  (D, 27),  (U, 41),  (U, 5),   (U, 29),  (U, 32),  (U, 54),
        (S, 25),  (D, 24),  (U, 120), (U, 64),  (U, 117), (U, 78),
                  (D, 94),  (U, 88),  (U, 127), (U, 48),  (U, 87),  (U, 42),
        (S, 75),  (D, 62),  (U, 51),  (U, 113), (U, 73),  (U, 67),
                  (D, 121), (U, 66),  (U, 122), (U, 76),  (U, 95),  (U, 133),
                  (U, 105), (U, 129),
    ];
    build(HUGE_ID, 101, CELLS)
}

/// Every shipped layout, in registration order.
pub fn all() -> Vec<Schedule> {
    vec![test_layout(), minuscule(), tiny(), huge()]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::diversity::is_offset_permutation;

    #[test]
    fn every_builtin_validates() {
        for s in all() {
            assert!(s.validate().is_ok(), "layout {:#04x} must validate", s.id);
        }
    }

    #[test]
    fn builtin_ids_are_distinct() {
        let mut ids: Vec<u8> = all().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn declared_lengths_match() {
        assert_eq!(test_layout().n_cells, 1);
        assert_eq!(minuscule().n_cells, 11);
        assert_eq!(tiny().n_cells, 17);
        assert_eq!(huge().n_cells, 137);
    }

    #[test]
    fn minuscule_role_counts() {
        let s = minuscule().summary();
        assert_eq!(
            (s.beacons, s.shared, s.downlinks, s.uplinks),
            (3, 1, 2, 5)
        );
    }

    #[test]
    fn tiny_role_counts() {
        let s = tiny().summary();
        assert_eq!(
            (s.beacons, s.shared, s.downlinks, s.uplinks),
            (3, 1, 2, 11)
        );
    }

    #[test]
    fn huge_role_counts_and_groups() {
        let h = huge();
        let s = h.summary();
        assert_eq!(
            (s.beacons, s.shared, s.downlinks, s.uplinks),
            (3, 11, 22, 101)
        );
        let groups = h.groups();
        assert_eq!(groups.len(), 11);
        // ten regular 12-cell groups, the last one carries the 2 extra uplinks
        assert!(groups[..10].iter().all(|g| g.len() == 12));
        assert_eq!(groups[10].len(), 14);
    }

    #[test]
    fn production_data_offsets_are_permutations() {
        for s in [minuscule(), tiny(), huge()] {
            assert!(
                is_offset_permutation(&s.data_offsets()),
                "layout {} data offsets should be a permutation",
                s.id
            );
        }
    }

    #[test]
    fn production_beacons_use_offsets_zero_to_two() {
        for s in [minuscule(), tiny(), huge()] {
            let offsets: Vec<u8> = s.cells[..3].iter().map(|c| c.channel_offset).collect();
            assert_eq!(offsets, vec![0, 1, 2]);
        }
    }
}
