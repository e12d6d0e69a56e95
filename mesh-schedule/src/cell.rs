/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Cell data structures: one slot of a slotframe.
//!
//! A [`Cell`] is the immutable description of a slot: its [`CellRole`] and
//! its logical channel offset.  Which node owns a dedicated cell at runtime is
//! **not** stored here; that state lives in
//! [`CellBindings`](crate::bindings::CellBindings), which the MAC scheduler
//! owns.
//!
//! ```text
//! Catalog ──(&Schedule)──► MAC scheduler ──(CellBindings)──► per-slot radio work
//!   immutable Cell list        owns owner/next per cell index
//! ```

use std::fmt;

// ── Cell role ─────────────────────────────────────────────────────────────────

/// What a cell is used for.
///
/// The single-letter tags (`B`, `S`, `D`, `U`) are only used at the edges
/// (YAML config, CLI output).  Inside the crate the typed enum is carried
/// everywhere so an unknown role can never reach the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellRole {
    /// Broadcast slot used for network discovery and synchronisation.
    Beacon,
    /// Contention slot (random backoff) for joins and control traffic.
    Shared,
    /// Dedicated coordinator → node slot.
    Downlink,
    /// Dedicated node → coordinator slot.
    Uplink,
}

impl CellRole {
    /// All roles in slotframe order of first appearance.
    pub const ALL: [CellRole; 4] = [
        CellRole::Beacon,
        CellRole::Shared,
        CellRole::Downlink,
        CellRole::Uplink,
    ];

    /// Parse a single-letter role tag.
    ///
    /// Returns `None` for anything other than `B`, `S`, `D` or `U`
    /// (case-insensitive).  There is no default role.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag.to_ascii_uppercase() {
            'B' => Some(CellRole::Beacon),
            'S' => Some(CellRole::Shared),
            'D' => Some(CellRole::Downlink),
            'U' => Some(CellRole::Uplink),
            _ => None,
        }
    }

    /// Single-letter tag for logs and config files.
    pub fn tag(self) -> char {
        match self {
            CellRole::Beacon => 'B',
            CellRole::Shared => 'S',
            CellRole::Downlink => 'D',
            CellRole::Uplink => 'U',
        }
    }

    /// `true` for cells bound to exactly one member node at runtime.
    pub fn is_dedicated(self) -> bool {
        match self {
            CellRole::Downlink | CellRole::Uplink => true,
            CellRole::Beacon | CellRole::Shared => false,
        }
    }

    /// `true` for cells that are never bound to a single node
    /// (broadcast or contention access).
    pub fn is_broadcast(self) -> bool {
        !self.is_dedicated()
    }
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellRole::Beacon => "beacon",
            CellRole::Shared => "shared",
            CellRole::Downlink => "downlink",
            CellRole::Uplink => "uplink",
        };
        f.write_str(name)
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One slot in a slotframe.
///
/// `channel_offset` is a logical index; an external hopping sequence turns
/// it into a physical frequency.  Beacon cells use their own offset
/// namespace (`0..k`), independent from the data-cell offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub role: CellRole,
    pub channel_offset: u8,
}

impl Cell {
    pub const fn new(role: CellRole, channel_offset: u8) -> Self {
        Self {
            role,
            channel_offset,
        }
    }

    pub const fn beacon(channel_offset: u8) -> Self {
        Self::new(CellRole::Beacon, channel_offset)
    }

    pub const fn shared(channel_offset: u8) -> Self {
        Self::new(CellRole::Shared, channel_offset)
    }

    pub const fn downlink(channel_offset: u8) -> Self {
        Self::new(CellRole::Downlink, channel_offset)
    }

    pub const fn uplink(channel_offset: u8) -> Self {
        Self::new(CellRole::Uplink, channel_offset)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.tag(), self.channel_offset)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── CellRole tags ─────────────────────────────────────────────────────────

    #[test]
    fn role_tags_parse_known_letters() {
        assert_eq!(CellRole::from_tag('B'), Some(CellRole::Beacon));
        assert_eq!(CellRole::from_tag('S'), Some(CellRole::Shared));
        assert_eq!(CellRole::from_tag('D'), Some(CellRole::Downlink));
        assert_eq!(CellRole::from_tag('U'), Some(CellRole::Uplink));
    }

    #[test]
    fn role_tags_are_case_insensitive() {
        assert_eq!(CellRole::from_tag('u'), Some(CellRole::Uplink));
        assert_eq!(CellRole::from_tag('b'), Some(CellRole::Beacon));
    }

    #[test]
    fn unknown_role_tag_is_rejected() {
        assert_eq!(CellRole::from_tag('X'), None);
        assert_eq!(CellRole::from_tag(' '), None);
    }

    #[test]
    fn tag_and_from_tag_agree_for_every_role() {
        for role in CellRole::ALL {
            assert_eq!(CellRole::from_tag(role.tag()), Some(role));
        }
    }

    // ── dedicated / broadcast ─────────────────────────────────────────────────

    #[test]
    fn only_uplink_and_downlink_are_dedicated() {
        assert!(CellRole::Uplink.is_dedicated());
        assert!(CellRole::Downlink.is_dedicated());
        assert!(!CellRole::Beacon.is_dedicated());
        assert!(!CellRole::Shared.is_dedicated());
    }

    #[test]
    fn broadcast_is_the_complement_of_dedicated() {
        for role in CellRole::ALL {
            assert_ne!(role.is_broadcast(), role.is_dedicated());
        }
    }

    // ── Display ───────────────────────────────────────────────────────────────

    #[test]
    fn cell_display_is_tag_then_offset() {
        assert_eq!(Cell::uplink(33).to_string(), "U33");
        assert_eq!(Cell::beacon(0).to_string(), "B0");
    }
}
