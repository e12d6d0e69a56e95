/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule catalog: the registry of slotframe layouts, keyed by id.
//!
//! The catalog is filled once during network initialisation (the shipped
//! layouts plus at most one layout supplied by the application) and is
//! read-only afterwards.  It is an ordinary value passed by reference to the
//! MAC scheduler; there is no global table.
//!
//! | Operation | Result on failure |
//! |---|---|
//! | [`Catalog::register`] | `Err(DuplicateId / InvalidStructure / CatalogFull)`, nothing inserted |
//! | [`Catalog::lookup`] | `None`, the caller falls back |
//! | [`Catalog::validate`] | `Err(DuplicateId / InvalidStructure)`, no mutation |
//!
//! # Example
//! ```rust
//! use mesh_schedule::catalog::Catalog;
//!
//! let catalog = Catalog::with_builtins();
//! let schedule = catalog.lookup(6).unwrap();
//! assert_eq!(schedule.n_cells, 11);
//! assert!(catalog.lookup(42).is_none());
//! ```

pub mod builtin;

use std::collections::BTreeMap;

use tracing::{error, info, warn};

use crate::schedule::{Schedule, ScheduleError};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Number of application-supplied layouts a built-in catalog accepts.
pub const EXTERNAL_SLOTS: usize = 1;

/// Default catalog capacity: the four shipped layouts plus one external one.
pub const DEFAULT_CAPACITY: usize = 4 + EXTERNAL_SLOTS;

/// Layout used when a requested id is unknown and nothing else is configured.
pub const DEFAULT_SCHEDULE_ID: u8 = builtin::MINUSCULE_ID;

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Registry of slotframe layouts keyed by id.
///
/// `BTreeMap` so iteration is always in ascending id order.  No interior
/// mutability: once initialisation ends, `&Catalog` can be shared freely
/// between readers.
#[derive(Debug, Clone)]
pub struct Catalog {
    schedules: BTreeMap<u8, Schedule>,

    /// Maximum number of layouts this catalog will hold.
    capacity: usize,
}

impl Catalog {
    /// Create an empty catalog with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty catalog holding at most `capacity` layouts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            schedules: BTreeMap::new(),
            capacity,
        }
    }

    /// Create a catalog holding every shipped layout, with room for
    /// [`EXTERNAL_SLOTS`] more.
    pub fn with_builtins() -> Self {
        let builtins = builtin::all();
        let mut catalog = Self::with_capacity(builtins.len() + EXTERNAL_SLOTS);
        for schedule in builtins {
            let id = schedule.id;
            let result = catalog.register(schedule);
            debug_assert!(
                result.is_ok(),
                "built-in schedule {id:#04x} rejected: {result:?}"
            );
            if let Err(e) = result {
                error!(id, error = %e, "built-in schedule rejected");
            }
        }
        catalog
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Validate `schedule` against this catalog and insert it.
    ///
    /// # Errors
    /// * [`ScheduleError::DuplicateId`] – the id is taken; the existing
    ///   layout is kept.
    /// * [`ScheduleError::InvalidStructure`] – see [`Schedule::validate`].
    /// * [`ScheduleError::CatalogFull`] – capacity exhausted.
    pub fn register(&mut self, schedule: Schedule) -> Result<(), ScheduleError> {
        if let Err(e) = self.validate(&schedule) {
            warn!(id = schedule.id, error = %e, "schedule registration rejected");
            return Err(e);
        }
        if self.schedules.len() >= self.capacity {
            warn!(
                id = schedule.id,
                capacity = self.capacity,
                "schedule registration rejected: catalog full"
            );
            return Err(ScheduleError::CatalogFull {
                capacity: self.capacity,
            });
        }

        let summary = schedule.summary();
        info!(
            id = schedule.id,
            n_cells = schedule.n_cells,
            max_nodes = schedule.max_nodes,
            beacons = summary.beacons,
            groups = summary.groups,
            uplinks = summary.uplinks,
            downlinks = summary.downlinks,
            "Registered schedule"
        );

        self.schedules.insert(schedule.id, schedule);
        Ok(())
    }

    /// Check `schedule` against every invariant, including id uniqueness
    /// within this catalog.  Does not modify the catalog.
    pub fn validate(&self, schedule: &Schedule) -> Result<(), ScheduleError> {
        if self.schedules.contains_key(&schedule.id) {
            return Err(ScheduleError::DuplicateId { id: schedule.id });
        }
        schedule.validate()
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Look up the layout registered under `id`.
    ///
    /// Returns `None` for an unknown id; that is not an error.
    pub fn lookup(&self, id: u8) -> Option<&Schedule> {
        self.schedules.get(&id)
    }

    /// Look up `id`, falling back to `fallback_id` if it is unknown.
    ///
    /// Returns `None` only if neither id is registered.
    pub fn lookup_or_fallback(&self, id: u8, fallback_id: u8) -> Option<&Schedule> {
        match self.lookup(id) {
            Some(schedule) => Some(schedule),
            None => {
                warn!(
                    requested = id,
                    fallback = fallback_id,
                    "Unknown schedule id, falling back"
                );
                self.lookup(fallback_id)
            }
        }
    }

    /// Pick the layout a network should run.
    ///
    /// `requested` if registered, else `configured_default`, else
    /// [`DEFAULT_SCHEDULE_ID`].  Returns `None` only if none of them is
    /// registered.
    pub fn select(&self, requested: u8, configured_default: u8) -> Option<&Schedule> {
        if requested == configured_default {
            return self.lookup_or_fallback(requested, DEFAULT_SCHEDULE_ID);
        }
        match self.lookup(requested) {
            Some(schedule) => Some(schedule),
            None => {
                warn!(
                    requested,
                    fallback = configured_default,
                    "Unknown schedule id, falling back"
                );
                self.lookup_or_fallback(configured_default, DEFAULT_SCHEDULE_ID)
            }
        }
    }

    /// Returns `true` if a layout is registered under `id`.
    pub fn contains(&self, id: u8) -> bool {
        self.schedules.contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.schedules.keys().copied()
    }

    /// Registered layouts in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.values()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of layouts that can still be registered.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.schedules.len())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellRole};
    use crate::schedule::StructureViolation;

    /// A valid 7-cell layout not in the built-in set.
    fn external(id: u8) -> Schedule {
        Schedule::new(
            id,
            2,
            (3, 6),
            vec![
                Cell::beacon(0),
                Cell::beacon(1),
                Cell::shared(3),
                Cell::downlink(0),
                Cell::uplink(2),
                Cell::uplink(1),
                Cell::uplink(4),
            ],
        )
    }

    // ── with_builtins ─────────────────────────────────────────────────────────

    #[test]
    fn builtin_catalog_holds_all_shipped_layouts() {
        let c = Catalog::with_builtins();
        assert_eq!(c.len(), 4);
        assert_eq!(c.ids().collect::<Vec<_>>(), vec![1, 5, 6, 0xBF]);
        assert_eq!(c.remaining(), EXTERNAL_SLOTS);
    }

    #[test]
    fn every_builtin_is_registered() {
        let c = Catalog::with_builtins();
        for s in builtin::all() {
            assert_eq!(c.lookup(s.id), Some(&s), "built-in {:#04x} missing", s.id);
        }
    }

    #[test]
    fn registered_schedules_satisfy_invariants() {
        let c = Catalog::with_builtins();
        for s in c.iter() {
            assert_eq!(s.n_cells, s.cells.len());
            assert!(s.count(CellRole::Uplink) >= usize::from(s.max_nodes));
            assert!(s.backoff_n_min <= s.backoff_n_max);
            if !s.is_fixture() {
                let prefix = s.beacon_prefix_len();
                assert!(prefix >= 1);
                let mut offsets: Vec<u8> =
                    s.cells[..prefix].iter().map(|c| c.channel_offset).collect();
                offsets.sort_unstable();
                offsets.dedup();
                assert_eq!(offsets.len(), prefix, "beacon offsets must be distinct");
            }
        }
    }

    // ── register ──────────────────────────────────────────────────────────────

    #[test]
    fn test_layout_round_trips_through_lookup() {
        let mut c = Catalog::new();
        let layout = Schedule::new(0xBF, 0, (5, 9), vec![Cell::uplink(0)]);
        c.register(layout.clone()).unwrap();
        assert_eq!(c.lookup(0xBF), Some(&layout));
    }

    #[test]
    fn duplicate_id_is_rejected_and_first_is_kept() {
        let mut c = Catalog::new();
        let first = external(42);
        let mut second = external(42);
        second.max_nodes = 3;

        c.register(first.clone()).unwrap();
        assert_eq!(
            c.register(second),
            Err(ScheduleError::DuplicateId { id: 42 })
        );
        assert_eq!(c.len(), 1);
        assert_eq!(c.lookup(42), Some(&first));
    }

    #[test]
    fn external_schedule_fills_the_free_slot() {
        let mut c = Catalog::with_builtins();
        c.register(external(42)).unwrap();
        assert!(c.contains(42));
        assert_eq!(c.remaining(), 0);

        assert_eq!(
            c.register(external(43)),
            Err(ScheduleError::CatalogFull { capacity: 5 })
        );
        assert!(!c.contains(43));
    }

    #[test]
    fn external_schedule_cannot_shadow_a_builtin() {
        let mut c = Catalog::with_builtins();
        let err = c.register(external(6)).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateId { id: 6 });
        assert_eq!(c.lookup(6).unwrap().n_cells, 11);
    }

    #[test]
    fn malformed_schedule_is_not_inserted() {
        let mut c = Catalog::new();
        let mut bad = external(42);
        for cell in bad.cells.iter_mut().take(2) {
            cell.channel_offset = 0;
        }
        let err = c.register(bad).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidStructure {
                id: 42,
                violation: StructureViolation::DuplicateBeaconOffset { .. }
            }
        ));
        assert!(c.is_empty());
    }

    #[test]
    fn fixture_with_repeated_beacon_offsets_is_not_inserted() {
        let mut c = Catalog::new();
        let bad = Schedule::new(
            42,
            0,
            (5, 9),
            vec![
                Cell::beacon(0),
                Cell::beacon(0),
                Cell::beacon(0),
                Cell::uplink(1),
                Cell::beacon(7),
                Cell::uplink(1),
            ],
        );
        assert!(matches!(
            c.register(bad),
            Err(ScheduleError::InvalidStructure {
                id: 42,
                violation: StructureViolation::DuplicateBeaconOffset { offset: 0, .. }
            })
        ));
        assert!(c.is_empty());
    }

    #[test]
    fn three_beacons_on_one_offset_are_rejected() {
        let c = Catalog::new();
        let mut copy = builtin::minuscule();
        for cell in copy.cells.iter_mut().take(3) {
            cell.channel_offset = 1;
        }
        assert!(matches!(
            c.validate(&copy),
            Err(ScheduleError::InvalidStructure { .. })
        ));
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn validate_accepts_the_eleven_cell_layout() {
        let c = Catalog::new();
        let s = builtin::minuscule();
        let summary = s.summary();
        assert_eq!(
            (summary.beacons, summary.shared, summary.downlinks, summary.uplinks),
            (3, 1, 2, 5)
        );
        assert!(c.validate(&s).is_ok());
    }

    #[test]
    fn validate_reports_id_taken_in_this_catalog() {
        let c = Catalog::with_builtins();
        assert_eq!(
            c.validate(&builtin::huge()),
            Err(ScheduleError::DuplicateId { id: 1 })
        );
    }

    #[test]
    fn validate_is_idempotent_and_does_not_register() {
        let c = Catalog::new();
        let s = external(42);
        assert_eq!(c.validate(&s), c.validate(&s));
        assert!(c.is_empty());
    }

    // ── lookup ────────────────────────────────────────────────────────────────

    #[test]
    fn lookup_unknown_id_is_none() {
        let c = Catalog::with_builtins();
        assert!(c.lookup(200).is_none());
        assert!(!c.contains(200));
    }

    #[test]
    fn lookup_or_fallback_uses_fallback_on_miss() {
        let c = Catalog::with_builtins();
        let s = c.lookup_or_fallback(200, DEFAULT_SCHEDULE_ID).unwrap();
        assert_eq!(s.id, DEFAULT_SCHEDULE_ID);

        let direct = c.lookup_or_fallback(5, DEFAULT_SCHEDULE_ID).unwrap();
        assert_eq!(direct.id, 5);
    }

    #[test]
    fn lookup_or_fallback_with_unknown_fallback_is_none() {
        let c = Catalog::new();
        assert!(c.lookup_or_fallback(1, 2).is_none());
    }

    // ── select ────────────────────────────────────────────────────────────────

    #[test]
    fn select_prefers_the_requested_id() {
        let mut c = Catalog::with_builtins();
        c.register(external(42)).unwrap();
        assert_eq!(c.select(42, 5).map(|s| s.id), Some(42));
    }

    #[test]
    fn select_falls_back_to_the_configured_default() {
        let c = Catalog::with_builtins();
        assert_eq!(c.select(200, 5).map(|s| s.id), Some(5));
    }

    #[test]
    fn select_falls_back_to_the_built_in_default() {
        let c = Catalog::with_builtins();
        assert_eq!(c.select(200, 201).map(|s| s.id), Some(DEFAULT_SCHEDULE_ID));
        assert_eq!(c.select(200, 200).map(|s| s.id), Some(DEFAULT_SCHEDULE_ID));
    }

    #[test]
    fn select_on_empty_catalog_is_none() {
        let c = Catalog::new();
        assert!(c.select(1, 5).is_none());
    }

    // ── capacity ──────────────────────────────────────────────────────────────

    #[test]
    fn zero_capacity_catalog_rejects_everything() {
        let mut c = Catalog::with_capacity(0);
        assert_eq!(
            c.register(external(42)),
            Err(ScheduleError::CatalogFull { capacity: 0 })
        );
    }

    #[test]
    fn duplicate_is_reported_before_capacity() {
        let mut c = Catalog::with_capacity(1);
        c.register(external(42)).unwrap();
        assert_eq!(
            c.register(external(42)),
            Err(ScheduleError::DuplicateId { id: 42 })
        );
    }

    // ── sharing ───────────────────────────────────────────────────────────────

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn catalog_can_be_shared_between_readers() {
        assert_send_sync::<Catalog>();
        assert_send_sync::<Schedule>();

        let c = Catalog::with_builtins();
        std::thread::scope(|scope| {
            for id in [1, 5, 6] {
                let c = &c;
                scope.spawn(move || assert!(c.lookup(id).is_some()));
            }
        });
    }
}
