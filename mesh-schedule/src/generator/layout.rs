/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure layout helpers: uplink distribution and channel-offset assignment.
//!
//! Free functions rather than methods so they can be tested independently of
//! [`SlotframeGenerator`](super::SlotframeGenerator).

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::schedule::MIN_UPLINKS_PER_GROUP;

/// How data-cell channel offsets are chosen.
///
/// Both strategies hand out a permutation of `0..n_data`, so offsets are
/// distinct across the whole slotframe and therefore within every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStrategy {
    /// Offsets in slot order: `0, 1, 2, …`.
    Sequential,
    /// Deterministic pseudo-random permutation from `seed`.
    Shuffled { seed: u64 },
}

/// Seed used by [`OffsetStrategy::default`].
pub const DEFAULT_OFFSET_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

impl Default for OffsetStrategy {
    fn default() -> Self {
        OffsetStrategy::Shuffled {
            seed: DEFAULT_OFFSET_SEED,
        }
    }
}

/// Split `total` into `parts` runs whose sizes differ by at most one.
///
/// Earlier runs get the floor, later runs the extra cells
/// (`9 / 2 → [4, 5]`).  Returns an empty vector when `parts == 0`.
pub fn split_evenly(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let base = total / parts;
    let extra = total % parts;
    (0..parts)
        .map(|i| if i >= parts - extra { base + 1 } else { base })
        .collect()
}

/// Uplink count of each group, plus the uplinks trailing the last group.
///
/// * fewer nodes than `per_group`: one group sized for all nodes (never
///   below [`MIN_UPLINKS_PER_GROUP`]);
/// * otherwise `max_nodes / per_group` full groups.  A remainder of more
///   than half a group opens one more, smaller group; a smaller remainder
///   trails the last group (`11 / 9 → [9] + 2`, `17 / 9 → [9, 8]`).
pub fn group_uplinks(max_nodes: usize, per_group: usize) -> (Vec<usize>, usize) {
    let full = if per_group == 0 { 0 } else { max_nodes / per_group };
    if full == 0 {
        return (vec![max_nodes.max(MIN_UPLINKS_PER_GROUP)], 0);
    }

    let mut groups = vec![per_group; full];
    let remainder = max_nodes % per_group;
    if remainder * 2 > per_group && remainder >= MIN_UPLINKS_PER_GROUP {
        groups.push(remainder);
        return (groups, 0);
    }
    (groups, remainder)
}

/// Channel offsets for `n` data cells under `strategy`.
///
/// Returns `None` when `n` exceeds the `u8` offset space (256).
pub fn data_offsets(n: usize, strategy: OffsetStrategy) -> Option<Vec<u8>> {
    let mut offsets = (0..n)
        .map(|o| u8::try_from(o).ok())
        .collect::<Option<Vec<u8>>>()?;
    if let OffsetStrategy::Shuffled { seed } = strategy {
        let mut rng = SmallRng::seed_from_u64(seed);
        offsets.shuffle(&mut rng);
    }
    Some(offsets)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
