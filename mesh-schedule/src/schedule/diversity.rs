/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Channel-offset diversity checks.
//!
//! Cells that may be active at logically overlapping times must sit on
//! different channel offsets, otherwise the hopping sequence maps them to
//! the same physical frequency.  The slotframe model uses two scopes:
//!
//! | Scope | Rule |
//! |---|---|
//! | Beacon prefix | pairwise-distinct offsets (`0..k` in every shipped table) |
//! | Each data group | pairwise-distinct offsets across Shared/Downlink/Uplink |
//!
//! The shipped production tables go further: all data-cell offsets together
//! form a permutation of `0..n_data`.  [`is_offset_permutation`] reports
//! that property; it is informative, not enforced.

use crate::cell::Cell;

/// Size of the channel-offset space (`u8`).
pub const OFFSET_SPACE: usize = 256;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find the first pair of cells that share a channel offset.
///
/// `cells` yields `(slot_index, cell)` pairs in slotframe order.  Returns
/// `Some((offset, first_slot, second_slot))` for the earliest collision,
/// `None` when all offsets are distinct.
pub fn first_reused_offset<'a, I>(cells: I) -> Option<(u8, usize, usize)>
where
    I: IntoIterator<Item = (usize, &'a Cell)>,
{
    let mut seen: [Option<usize>; OFFSET_SPACE] = [None; OFFSET_SPACE];
    for (slot, cell) in cells {
        let idx = usize::from(cell.channel_offset);
        match seen[idx] {
            Some(first) => return Some((cell.channel_offset, first, slot)),
            None => seen[idx] = Some(slot),
        }
    }
    None
}

/// `true` if `offsets` is a permutation of `0..offsets.len()`.
///
/// An empty slice is trivially a permutation.
pub fn is_offset_permutation(offsets: &[u8]) -> bool {
    if offsets.len() > OFFSET_SPACE {
        return false;
    }
    let mut seen = [false; OFFSET_SPACE];
    for &o in offsets {
        let idx = usize::from(o);
        if idx >= offsets.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────
