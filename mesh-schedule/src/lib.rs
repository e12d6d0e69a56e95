/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! mesh-schedule – slotframe catalog for a TSCH-style mesh MAC
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── cell         – cell roles and (role, channel offset) pairs
//! ├── schedule/    – Schedule, structural validation, error types
//! ├── catalog/     – registry of layouts + the shipped tables
//! ├── bindings     – runtime cell → node ownership arena
//! ├── slot         – slot walking and the SlotObserver seam
//! ├── generator/   – build a layout sized for N nodes
//! └── config/      – YAML network configuration
//! ```

pub mod bindings;
pub mod catalog;
pub mod cell;
pub mod config;
pub mod generator;
pub mod schedule;
pub mod slot;
