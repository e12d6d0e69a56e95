/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for schedule validation, registration and runtime
//! cell binding.
//!
//! Two layers, as in the rest of the crate:
//!
//! * [`StructureViolation`]: the exact invariant a slotframe breaks (low
//!   level, carries slot indices and offsets).
//! * [`ScheduleError`]: what a [`Catalog`](crate::catalog::Catalog)
//!   operation returns.
//!
//! [`BindError`] is separate: it is produced by the scheduler-owned
//! [`CellBindings`](crate::bindings::CellBindings), never by the catalog.
//!
//! A lookup miss is **not** an error: [`Catalog::lookup`] returns `None`.
//!
//! [`Catalog::lookup`]: crate::catalog::Catalog::lookup

use thiserror::Error;

use crate::cell::CellRole;

// ── Structural violations ─────────────────────────────────────────────────────

/// The specific slotframe invariant a schedule violates.
///
/// Carried inside [`ScheduleError::InvalidStructure`].  Slot indices are
/// positions in `Schedule::cells`; group numbers count from 0 in slotframe
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureViolation {
    /// The cell list is empty.
    Empty,

    /// `n_cells` does not match the length of the cell list.
    CellCountMismatch { declared: usize, actual: usize },

    /// `backoff_n_min > backoff_n_max`.
    BackoffInverted { min: u8, max: u8 },

    /// Fewer Uplink cells than `max_nodes`: some member would have no
    /// guaranteed transmit opportunity.
    InsufficientUplinks { uplinks: usize, max_nodes: u8 },

    /// The slotframe does not start with a Beacon cell.
    MissingBeaconPrefix,

    /// Two cells of the beacon prefix share a channel offset.
    DuplicateBeaconOffset {
        offset: u8,
        first_slot: usize,
        second_slot: usize,
    },

    /// A Beacon cell appears after the leading beacon run.
    BeaconOutsidePrefix { slot: usize },

    /// A data cell appears before the first Shared cell (every group must be
    /// opened by exactly one Shared cell).
    MissingSharedCell { slot: usize, role: CellRole },

    /// A group has no Downlink cell.
    MissingDownlink { group: usize },

    /// A group has fewer Uplink cells than the minimum.
    TooFewUplinks {
        group: usize,
        uplinks: usize,
        min: usize,
    },

    /// Two cells of the same group share a channel offset.
    ChannelOffsetReused {
        group: usize,
        offset: u8,
        first_slot: usize,
        second_slot: usize,
    },
}

impl std::fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureViolation::Empty => write!(f, "slotframe has no cells"),

            StructureViolation::CellCountMismatch { declared, actual } => write!(
                f,
                "n_cells is {} but the cell list holds {} cell(s)",
                declared, actual
            ),

            StructureViolation::BackoffInverted { min, max } => write!(
                f,
                "backoff exponent bounds inverted: n_min {} > n_max {}",
                min, max
            ),

            StructureViolation::InsufficientUplinks { uplinks, max_nodes } => write!(
                f,
                "{} uplink cell(s) cannot serve max_nodes = {}",
                uplinks, max_nodes
            ),

            StructureViolation::MissingBeaconPrefix => {
                write!(f, "slotframe must begin with at least one beacon cell")
            }

            StructureViolation::DuplicateBeaconOffset {
                offset,
                first_slot,
                second_slot,
            } => write!(
                f,
                "beacon cells at slots {} and {} share channel offset {}",
                first_slot, second_slot, offset
            ),

            StructureViolation::BeaconOutsidePrefix { slot } => write!(
                f,
                "beacon cell at slot {} is outside the leading beacon run",
                slot
            ),

            StructureViolation::MissingSharedCell { slot, role } => write!(
                f,
                "{} cell at slot {} precedes the first shared cell",
                role, slot
            ),

            StructureViolation::MissingDownlink { group } => {
                write!(f, "group {} has no downlink cell", group)
            }

            StructureViolation::TooFewUplinks {
                group,
                uplinks,
                min,
            } => write!(
                f,
                "group {} has {} uplink cell(s), at least {} required",
                group, uplinks, min
            ),

            StructureViolation::ChannelOffsetReused {
                group,
                offset,
                first_slot,
                second_slot,
            } => write!(
                f,
                "group {}: slots {} and {} share channel offset {}",
                group, first_slot, second_slot, offset
            ),
        }
    }
}

// ── Catalog errors ────────────────────────────────────────────────────────────

/// Error returned by [`Catalog::register`] and [`Catalog::validate`].
///
/// Every variant is a configuration bug, never a transient condition, so
/// nothing here is retried.
///
/// [`Catalog::register`]: crate::catalog::Catalog::register
/// [`Catalog::validate`]: crate::catalog::Catalog::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A schedule with the same id is already registered.  The catalog keeps
    /// the first one.
    #[error("schedule id {id:#04x} is already registered")]
    DuplicateId { id: u8 },

    /// The schedule breaks a slotframe invariant.
    #[error("schedule {id:#04x} is malformed: {violation}")]
    InvalidStructure {
        id: u8,
        violation: StructureViolation,
    },

    /// The catalog already holds its maximum number of schedules.
    #[error("catalog is full ({capacity} schedule(s))")]
    CatalogFull { capacity: usize },
}

impl ScheduleError {
    /// The structural violation, if this is an `InvalidStructure` error.
    pub fn violation(&self) -> Option<&StructureViolation> {
        match self {
            ScheduleError::InvalidStructure { violation, .. } => Some(violation),
            ScheduleError::DuplicateId { .. } | ScheduleError::CatalogFull { .. } => None,
        }
    }
}

// ── Runtime binding errors ────────────────────────────────────────────────────

/// Error returned by [`CellBindings::bind`](crate::bindings::CellBindings::bind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The cell index is past the end of the slotframe.
    #[error("cell {cell} is out of range (slotframe has {n_cells} cells)")]
    CellOutOfRange { cell: usize, n_cells: usize },

    /// Beacon and Shared cells are never owned by a single node.
    #[error("cell {cell} is a {role} cell and cannot be bound to a node")]
    NotDedicated { cell: usize, role: CellRole },

    /// Dedicated cells are bound exactly once.
    #[error("cell {cell} is already bound to node {owner:#018x}")]
    AlreadyBound { cell: usize, owner: u64 },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
