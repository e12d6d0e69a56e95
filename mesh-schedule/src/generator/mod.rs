/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Programmatic slotframe construction.
//!
//! [`SlotframeGenerator`] produces a schedule for a given node capacity using
//! the same layout rule as the shipped tables:
//!
//! ```text
//! [B × beacons] [S  D U…U  D U…U] [S  D U…U  D U…U] … [U…U trailing]
//!                └─ group: 1 Shared, `downlinks_per_group` Downlinks, each
//!                   followed by its share of `uplinks_per_group` Uplinks
//! ```
//!
//! With the defaults (3 beacons, 2 downlinks and 9 uplinks per group) the
//! generator reproduces the role sequence of the shipped 5-, 11- and
//! 101-node layouts exactly.  Channel offsets are chosen by
//! [`OffsetStrategy`]: beacons take `0..beacons`, data cells a permutation of
//! `0..n_data`.
//!
//! # Example
//! ```rust
//! use mesh_schedule::generator::SlotframeGenerator;
//!
//! let schedule = SlotframeGenerator::new(42, 20).generate().unwrap();
//! assert!(schedule.validate().is_ok());
//! assert!(schedule.summary().uplinks >= 20);
//! ```

pub mod layout;

pub use layout::OffsetStrategy;

use std::iter;

use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::builtin::DEFAULT_BACKOFF;
use crate::cell::{Cell, CellRole};
use crate::schedule::{Schedule, MIN_UPLINKS_PER_GROUP};

use layout::{data_offsets, group_uplinks, split_evenly};

// ── Constants ─────────────────────────────────────────────────────────────────

pub const DEFAULT_BEACONS: u8 = 3;
pub const DEFAULT_DOWNLINKS_PER_GROUP: usize = 2;
pub const DEFAULT_UPLINKS_PER_GROUP: usize = 9;

/// Data cells available before channel offsets run out.
pub const MAX_DATA_CELLS: usize = u8::MAX as usize + 1;

// ── Error type ────────────────────────────────────────────────────────────────

/// Invalid generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("max_nodes must be at least 1")]
    NoNodes,

    #[error("at least one beacon cell is required")]
    NoBeacons,

    #[error("at least one downlink per group is required")]
    NoDownlinks,

    #[error("{got} uplink(s) per group is below the minimum of {min}")]
    TooFewUplinksPerGroup { got: usize, min: usize },

    #[error("backoff exponent bounds inverted: n_min {min} > n_max {max}")]
    BackoffInverted { min: u8, max: u8 },

    #[error("layout needs {needed} data cells but only {available} channel offsets exist")]
    TooManyCells { needed: usize, available: usize },
}

// ── SlotframeGenerator ────────────────────────────────────────────────────────

/// Builder for a slotframe sized to a node capacity.
#[derive(Debug, Clone)]
pub struct SlotframeGenerator {
    id: u8,
    max_nodes: u8,
    beacons: u8,
    downlinks_per_group: usize,
    uplinks_per_group: usize,
    backoff: (u8, u8),
    offsets: OffsetStrategy,
}

impl SlotframeGenerator {
    /// Generator with the shipped defaults.
    pub fn new(id: u8, max_nodes: u8) -> Self {
        Self {
            id,
            max_nodes,
            beacons: DEFAULT_BEACONS,
            downlinks_per_group: DEFAULT_DOWNLINKS_PER_GROUP,
            uplinks_per_group: DEFAULT_UPLINKS_PER_GROUP,
            backoff: DEFAULT_BACKOFF,
            offsets: OffsetStrategy::default(),
        }
    }

    pub fn beacons(mut self, beacons: u8) -> Self {
        self.beacons = beacons;
        self
    }

    pub fn downlinks_per_group(mut self, n: usize) -> Self {
        self.downlinks_per_group = n;
        self
    }

    pub fn uplinks_per_group(mut self, n: usize) -> Self {
        self.uplinks_per_group = n;
        self
    }

    pub fn backoff(mut self, n_min: u8, n_max: u8) -> Self {
        self.backoff = (n_min, n_max);
        self
    }

    pub fn offsets(mut self, strategy: OffsetStrategy) -> Self {
        self.offsets = strategy;
        self
    }

    /// Role sequence of the data part (everything after the beacons).
    fn data_roles(&self) -> Vec<CellRole> {
        let (groups, trailing) = group_uplinks(usize::from(self.max_nodes), self.uplinks_per_group);
        let mut roles = Vec::new();

        for uplinks in groups {
            roles.push(CellRole::Shared);
            for run in split_evenly(uplinks, self.downlinks_per_group) {
                roles.push(CellRole::Downlink);
                roles.extend(iter::repeat(CellRole::Uplink).take(run));
            }
        }
        roles.extend(iter::repeat(CellRole::Uplink).take(trailing));
        roles
    }

    /// Build the schedule.
    ///
    /// The result always passes [`Schedule::validate`].
    ///
    /// # Errors
    /// A [`GenerateError`] naming the offending parameter.
    pub fn generate(&self) -> Result<Schedule, GenerateError> {
        if self.max_nodes == 0 {
            return Err(GenerateError::NoNodes);
        }
        if self.beacons == 0 {
            return Err(GenerateError::NoBeacons);
        }
        if self.downlinks_per_group == 0 {
            return Err(GenerateError::NoDownlinks);
        }
        if self.uplinks_per_group < MIN_UPLINKS_PER_GROUP {
            return Err(GenerateError::TooFewUplinksPerGroup {
                got: self.uplinks_per_group,
                min: MIN_UPLINKS_PER_GROUP,
            });
        }
        let (n_min, n_max) = self.backoff;
        if n_min > n_max {
            return Err(GenerateError::BackoffInverted {
                min: n_min,
                max: n_max,
            });
        }

        let roles = self.data_roles();
        let offsets =
            data_offsets(roles.len(), self.offsets).ok_or(GenerateError::TooManyCells {
                needed: roles.len(),
                available: MAX_DATA_CELLS,
            })?;
        debug!(id = self.id, offsets = ?offsets, "data channel offsets");

        let cells: Vec<Cell> = (0..self.beacons)
            .map(Cell::beacon)
            .chain(
                roles
                    .into_iter()
                    .zip(offsets)
                    .map(|(role, offset)| Cell::new(role, offset)),
            )
            .collect();

        let schedule = Schedule::new(self.id, self.max_nodes, self.backoff, cells);
        info!(
            id = schedule.id,
            max_nodes = schedule.max_nodes,
            n_cells = schedule.n_cells,
            strategy = ?self.offsets,
            "Generated slotframe"
        );
        Ok(schedule)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
