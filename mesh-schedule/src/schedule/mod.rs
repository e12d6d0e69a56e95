/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Slotframe schedules and their structural invariants.
//!
//! A [`Schedule`] is one named slotframe: an ordered list of [`Cell`]s that
//! recurs every slotframe period, plus the node capacity and the Shared-cell
//! backoff bounds.  The expected layout is:
//!
//! ```text
//! slot:  0   1   2 │ 3   4   5   6   7   8   9  10 │ 11 ...
//! role:  B   B   B │ S   D   U   U   D   U   U   U │ S  ...
//!        beacon    │ group 0                        │ group 1
//!        prefix    │ (1 S, ≥1 D, ≥2 U, distinct     │
//!                  │  channel offsets)              │
//! ```
//!
//! [`Schedule::validate`] checks every invariant that does not depend on a
//! catalog; id uniqueness is checked by
//! [`Catalog::validate`](crate::catalog::Catalog::validate).
//!
//! # Fixture layouts
//! A schedule with `max_nodes == 0` serves no member nodes (the shipped
//! `0xBF` single-Uplink test layout).  It may omit the Beacon run and is
//! exempt from the group checks; any beacons it does carry must still sit in
//! a leading run with distinct offsets.

pub mod diversity;
pub mod error;

pub use error::{BindError, ScheduleError, StructureViolation};

use std::ops::Range;

use tracing::debug;

use crate::cell::{Cell, CellRole};

use diversity::first_reused_offset;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Minimum number of Uplink cells per group.
pub const MIN_UPLINKS_PER_GROUP: usize = 2;

// ── Schedule ──────────────────────────────────────────────────────────────────

/// One named slotframe layout.
///
/// Fields are public so externally supplied layouts (config files, tests)
/// can be expressed directly, malformed ones included.  `n_cells` is stored,
/// not derived.  Nothing is checked on construction; call
/// [`validate`](Self::validate) or register the schedule in a
/// [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Catalog-wide unique identifier.
    pub id: u8,

    /// Upper bound on distinct member nodes this layout can serve.
    pub max_nodes: u8,

    /// Smallest backoff exponent used when contending for a Shared cell.
    pub backoff_n_min: u8,

    /// Largest backoff exponent used when contending for a Shared cell.
    pub backoff_n_max: u8,

    /// Declared slotframe length.  Must equal `cells.len()`.
    pub n_cells: usize,

    /// Cells in slot order.
    pub cells: Vec<Cell>,
}

/// Role counts of a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub beacons: usize,
    pub shared: usize,
    pub downlinks: usize,
    pub uplinks: usize,
    /// Number of Shared-delimited groups after the beacon prefix.
    pub groups: usize,
}

impl ScheduleSummary {
    /// Uplinks per Downlink (`0.0` when there are no Downlink cells).
    pub fn uplinks_per_downlink(&self) -> f64 {
        if self.downlinks == 0 {
            0.0
        } else {
            self.uplinks as f64 / self.downlinks as f64
        }
    }
}

impl Schedule {
    /// Build a schedule whose `n_cells` matches `cells`.
    pub fn new(id: u8, max_nodes: u8, backoff: (u8, u8), cells: Vec<Cell>) -> Self {
        Self {
            id,
            max_nodes,
            backoff_n_min: backoff.0,
            backoff_n_max: backoff.1,
            n_cells: cells.len(),
            cells,
        }
    }

    /// `true` for layouts that serve no member nodes (`max_nodes == 0`).
    pub fn is_fixture(&self) -> bool {
        self.max_nodes == 0
    }

    /// Number of cells in the leading Beacon run.
    pub fn beacon_prefix_len(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| c.role == CellRole::Beacon)
            .count()
    }

    /// Number of cells with the given role.
    pub fn count(&self, role: CellRole) -> usize {
        self.cells.iter().filter(|c| c.role == role).count()
    }

    /// Slot-index ranges of the Shared-delimited groups.
    ///
    /// Each range starts at a Shared cell and extends up to (not including)
    /// the next Shared cell, or to the end of the slotframe.  Cells between
    /// the beacon prefix and the first Shared cell belong to no group.
    pub fn groups(&self) -> Vec<Range<usize>> {
        let starts: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.role == CellRole::Shared)
            .map(|(i, _)| i)
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(g, &start)| {
                let end = starts.get(g + 1).copied().unwrap_or(self.cells.len());
                start..end
            })
            .collect()
    }

    /// Role counts and group count.
    pub fn summary(&self) -> ScheduleSummary {
        let mut s = ScheduleSummary::default();
        for cell in &self.cells {
            match cell.role {
                CellRole::Beacon => s.beacons += 1,
                CellRole::Shared => s.shared += 1,
                CellRole::Downlink => s.downlinks += 1,
                CellRole::Uplink => s.uplinks += 1,
            }
        }
        s.groups = s.shared;
        s
    }

    /// Channel offsets of all non-Beacon cells, in slot order.
    pub fn data_offsets(&self) -> Vec<u8> {
        self.cells
            .iter()
            .filter(|c| c.role != CellRole::Beacon)
            .map(|c| c.channel_offset)
            .collect()
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Check every structural invariant of this slotframe.
    ///
    /// Checks (in order):
    /// 1. the cell list is non-empty and matches `n_cells`;
    /// 2. `backoff_n_min <= backoff_n_max`;
    /// 3. at least `max_nodes` Uplink cells;
    /// 4. distinct offsets in the leading Beacon run, and no Beacon after it;
    /// 5. a non-empty Beacon run;
    /// 6. group shape: opened by one Shared cell, ≥1 Downlink,
    ///    ≥[`MIN_UPLINKS_PER_GROUP`] Uplinks, distinct offsets.
    ///
    /// Checks 5 and 6 are skipped for fixture layouts.  Pure: calling it
    /// twice on the same schedule gives the same result.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.check_structure()
            .map_err(|violation| ScheduleError::InvalidStructure {
                id: self.id,
                violation,
            })
    }

    fn check_structure(&self) -> Result<(), StructureViolation> {
        if self.cells.is_empty() {
            return Err(StructureViolation::Empty);
        }
        if self.n_cells != self.cells.len() {
            return Err(StructureViolation::CellCountMismatch {
                declared: self.n_cells,
                actual: self.cells.len(),
            });
        }
        if self.backoff_n_min > self.backoff_n_max {
            return Err(StructureViolation::BackoffInverted {
                min: self.backoff_n_min,
                max: self.backoff_n_max,
            });
        }

        let uplinks = self.count(CellRole::Uplink);
        if uplinks < usize::from(self.max_nodes) {
            return Err(StructureViolation::InsufficientUplinks {
                uplinks,
                max_nodes: self.max_nodes,
            });
        }

        self.check_beacons()?;

        if self.is_fixture() {
            debug!(id = self.id, "fixture layout: group checks skipped");
            return Ok(());
        }

        if self.beacon_prefix_len() == 0 {
            return Err(StructureViolation::MissingBeaconPrefix);
        }
        self.check_groups()
    }

    /// Beacon offsets distinct within the leading run, no Beacon after it.
    /// An empty run passes here.
    fn check_beacons(&self) -> Result<(), StructureViolation> {
        let prefix = self.beacon_prefix_len();

        if let Some((offset, first_slot, second_slot)) =
            first_reused_offset(self.cells[..prefix].iter().enumerate())
        {
            return Err(StructureViolation::DuplicateBeaconOffset {
                offset,
                first_slot,
                second_slot,
            });
        }

        if let Some(slot) = self.cells[prefix..]
            .iter()
            .position(|c| c.role == CellRole::Beacon)
        {
            return Err(StructureViolation::BeaconOutsidePrefix {
                slot: prefix + slot,
            });
        }

        Ok(())
    }

    fn check_groups(&self) -> Result<(), StructureViolation> {
        let prefix = self.beacon_prefix_len();

        // The first data cell must open a group.
        if let Some(cell) = self.cells.get(prefix) {
            if cell.role != CellRole::Shared {
                return Err(StructureViolation::MissingSharedCell {
                    slot: prefix,
                    role: cell.role,
                });
            }
        }

        for (group, range) in self.groups().into_iter().enumerate() {
            let cells = &self.cells[range.clone()];

            let downlinks = cells.iter().filter(|c| c.role == CellRole::Downlink).count();
            if downlinks == 0 {
                return Err(StructureViolation::MissingDownlink { group });
            }

            let uplinks = cells.iter().filter(|c| c.role == CellRole::Uplink).count();
            if uplinks < MIN_UPLINKS_PER_GROUP {
                return Err(StructureViolation::TooFewUplinks {
                    group,
                    uplinks,
                    min: MIN_UPLINKS_PER_GROUP,
                });
            }

            let indexed = cells.iter().enumerate().map(|(i, c)| (range.start + i, c));
            if let Some((offset, first_slot, second_slot)) = first_reused_offset(indexed) {
                return Err(StructureViolation::ChannelOffsetReused {
                    group,
                    offset,
                    first_slot,
                    second_slot,
                });
            }

            debug!(
                id = self.id,
                group,
                slots = ?range,
                downlinks,
                uplinks,
                "group ok"
            );
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
