/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Runtime cell-to-node bindings.
//!
//! The catalog describes slotframes; it never records which node owns a
//! cell.  That mutable state lives here, in an arena indexed by cell
//! position and kept parallel to `Schedule::cells`:
//!
//! ```text
//! cells  : [ B0 | B1 | B2 | S6 | D3 | U5 | U1 | D4 | ... ]
//! owner  : [  -    -    -    -    n7   n7   n9   -   ... ]
//! next   : [  -    -    -    -    5    -    -    -   ... ]   n7: 4 → 5
//! ```
//!
//! `CellBindings` is owned by the MAC scheduler, which serialises every
//! mutation (typically at slot boundaries).  Dedicated cells (Uplink /
//! Downlink) are bound exactly once; Beacon and Shared cells are never
//! bound.

use std::collections::HashMap;

use tracing::debug;

use crate::cell::CellRole;
use crate::schedule::{BindError, Schedule};

/// Member node identifier (64-bit device address).
pub type NodeId = u64;

// ── CellBindings ──────────────────────────────────────────────────────────────

/// Per-cell runtime ownership for one schedule.
#[derive(Debug, Clone)]
pub struct CellBindings {
    /// Role of each cell, copied from the schedule at construction.
    roles: Vec<CellRole>,

    /// Owning node of each cell.  `None` = unbound.
    owner: Vec<Option<NodeId>>,

    /// Next cell owned by the same node, in bind order.
    next: Vec<Option<usize>>,

    /// node → (first cell, last cell) of its chain.
    chains: HashMap<NodeId, (usize, usize)>,
}

impl CellBindings {
    /// Create an arena for `schedule` with every cell unbound.
    pub fn new(schedule: &Schedule) -> Self {
        let n = schedule.cells.len();
        Self {
            roles: schedule.cells.iter().map(|c| c.role).collect(),
            owner: vec![None; n],
            next: vec![None; n],
            chains: HashMap::new(),
        }
    }

    /// Number of cells covered by this arena.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Bind the dedicated cell at `cell` to `node`.
    ///
    /// The cell is appended to the node's chain, so [`cells_of`](Self::cells_of)
    /// yields cells in bind order.
    ///
    /// # Errors
    /// * [`BindError::CellOutOfRange`] – `cell` is past the end.
    /// * [`BindError::NotDedicated`] – Beacon / Shared cell.
    /// * [`BindError::AlreadyBound`] – the cell already has an owner.
    pub fn bind(&mut self, cell: usize, node: NodeId) -> Result<(), BindError> {
        let role = *self.roles.get(cell).ok_or(BindError::CellOutOfRange {
            cell,
            n_cells: self.roles.len(),
        })?;

        if !role.is_dedicated() {
            return Err(BindError::NotDedicated { cell, role });
        }
        if let Some(owner) = self.owner[cell] {
            return Err(BindError::AlreadyBound { cell, owner });
        }

        self.owner[cell] = Some(node);
        if let Some(&(_, tail)) = self.chains.get(&node) {
            self.next[tail] = Some(cell);
        }
        self.chains
            .entry(node)
            .and_modify(|(_, tail)| *tail = cell)
            .or_insert((cell, cell));

        debug!(cell, node, %role, "cell bound");
        Ok(())
    }

    /// Owner of `cell`, or `None` if unbound or out of range.
    pub fn owner(&self, cell: usize) -> Option<NodeId> {
        self.owner.get(cell).copied().flatten()
    }

    /// Next cell owned by the same node, or `None` at the end of the chain.
    pub fn next(&self, cell: usize) -> Option<usize> {
        self.next.get(cell).copied().flatten()
    }

    /// Cells bound to `node`, in bind order.
    pub fn cells_of(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.chains.get(&node).map(|&(head, _)| head);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.next[current];
            Some(current)
        })
    }

    /// First unbound cell of `role`, in slot order.
    ///
    /// Always `None` for Beacon and Shared roles.
    pub fn first_free(&self, role: CellRole) -> Option<usize> {
        if !role.is_dedicated() {
            return None;
        }
        self.roles
            .iter()
            .zip(&self.owner)
            .position(|(&r, o)| r == role && o.is_none())
    }

    /// Number of bound cells.
    pub fn bound_count(&self) -> usize {
        self.owner.iter().filter(|o| o.is_some()).count()
    }

    /// Number of distinct nodes holding at least one cell.
    pub fn node_count(&self) -> usize {
        self.chains.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
