/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Walking a slotframe slot by slot.
//!
//! The MAC engine counts elapsed slots since network start (the absolute
//! slot number, ASN).  The current cell is `cells[asn % n_cells]`; after the
//! last cell the slotframe restarts from the first one.
//!
//! For each elapsed slot the engine is told the cell's role and channel
//! offset through a [`SlotObserver`], or it can pull them with
//! [`Schedule::slot_at`] / [`Schedule::slots`].

use crate::cell::CellRole;
use crate::schedule::Schedule;

// ── Slot ──────────────────────────────────────────────────────────────────────

/// What the radio must do in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Position of the cell within the slotframe.
    pub index: usize,
    pub role: CellRole,
    pub channel_offset: u8,
}

// ── SlotObserver ──────────────────────────────────────────────────────────────

/// Per-slot callback driven by [`Schedule::replay`].
///
/// Implemented for any `FnMut(u64, &Slot)` closure.
pub trait SlotObserver {
    /// Called once per elapsed slot with its absolute slot number.
    fn on_slot(&mut self, asn: u64, slot: &Slot);
}

impl<F> SlotObserver for F
where
    F: FnMut(u64, &Slot),
{
    fn on_slot(&mut self, asn: u64, slot: &Slot) {
        self(asn, slot)
    }
}

// ── Schedule walking ──────────────────────────────────────────────────────────

impl Schedule {
    /// One pass over the slotframe, in slot order.
    ///
    /// The iterator is finite; call `slots()` again (or `.cycle()` it) to
    /// follow the slotframe repeating.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + Clone + '_ {
        self.cells.iter().enumerate().map(|(index, cell)| Slot {
            index,
            role: cell.role,
            channel_offset: cell.channel_offset,
        })
    }

    /// The slot active at absolute slot number `asn`.
    ///
    /// Returns `None` only for an empty schedule.
    pub fn slot_at(&self, asn: u64) -> Option<Slot> {
        let len = self.cells.len() as u64;
        if len == 0 {
            return None;
        }
        let index = (asn % len) as usize;
        let cell = self.cells[index];
        Some(Slot {
            index,
            role: cell.role,
            channel_offset: cell.channel_offset,
        })
    }

    /// Drive `observer` through `count` consecutive slots starting at
    /// `start_asn`, wrapping at the end of the slotframe.
    ///
    /// Returns the number of slots delivered (`0` for an empty schedule).
    pub fn replay<O>(&self, start_asn: u64, count: u64, observer: &mut O) -> u64
    where
        O: SlotObserver + ?Sized,
    {
        if self.cells.is_empty() {
            return 0;
        }
        let mut delivered = 0;
        for asn in start_asn..start_asn.saturating_add(count) {
            if let Some(slot) = self.slot_at(asn) {
                observer.on_slot(asn, &slot);
                delivered += 1;
            }
        }
        delivered
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
