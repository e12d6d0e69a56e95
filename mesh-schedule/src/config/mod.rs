/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Network configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! default_schedule_id: 6
//! schedule:
//!   id: 42
//!   max_nodes: 2
//!   backoff_n_min: 5
//!   backoff_n_max: 9
//!   cells:
//!     - { role: B, channel_offset: 0 }
//!     - { role: S, channel_offset: 3 }
//!     - { role: D, channel_offset: 1 }
//!     - { role: U, channel_offset: 0 }
//!     - { role: U, channel_offset: 2 }
//! ```
//!
//! Both top-level keys are optional.  The schedule is converted as written;
//! structural checks happen when it is registered with a
//! [`Catalog`](crate::catalog::Catalog).

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cell::{Cell, CellRole};
use crate::schedule::Schedule;

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkConfigFile {
    default_schedule_id: Option<u8>,
    schedule: Option<ScheduleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleEntry {
    id: u8,
    max_nodes: u8,
    backoff_n_min: u8,
    backoff_n_max: u8,
    /// Declared slot count; defaults to the length of `cells`.
    n_cells: Option<usize>,
    #[serde(default)]
    cells: Vec<CellEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellEntry {
    /// Single-letter tag: `B`, `S`, `D` or `U`.
    role: String,
    channel_offset: u8,
}

fn parse_role(tag: &str) -> Option<CellRole> {
    let mut chars = tag.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => CellRole::from_tag(c),
        _ => None,
    }
}

impl ScheduleEntry {
    fn into_schedule(self) -> Result<Schedule> {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(slot, entry)| {
                parse_role(&entry.role)
                    .map(|role| Cell::new(role, entry.channel_offset))
                    .ok_or_else(|| {
                        anyhow!(
                            "schedule {}: unknown role tag {:?} at slot {}",
                            self.id,
                            entry.role,
                            slot
                        )
                    })
            })
            .collect::<Result<Vec<Cell>>>()?;

        let mut schedule = Schedule::new(
            self.id,
            self.max_nodes,
            (self.backoff_n_min, self.backoff_n_max),
            cells,
        );
        if let Some(n_cells) = self.n_cells {
            if n_cells != schedule.cells.len() {
                warn!(
                    id = self.id,
                    declared = n_cells,
                    actual = schedule.cells.len(),
                    "Declared n_cells does not match the cell list"
                );
            }
            schedule.n_cells = n_cells;
        }
        Ok(schedule)
    }
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Application-level settings read from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Layout to fall back to when a requested id is unknown.
    pub default_schedule_id: Option<u8>,

    /// Application-supplied layout, not yet validated.
    pub schedule: Option<Schedule>,
}

impl NetworkConfig {
    /// Parse `path` into a [`NetworkConfig`].
    ///
    /// An empty file yields the default (no overrides).
    ///
    /// # Errors
    /// * the file cannot be read;
    /// * the YAML is malformed or carries unknown keys;
    /// * a cell uses an unknown role tag.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading network configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        if content.trim().is_empty() {
            warn!("Configuration file is empty, using defaults");
            return Ok(Self::default());
        }

        let file: NetworkConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let schedule = file
            .schedule
            .map(ScheduleEntry::into_schedule)
            .transpose()
            .with_context(|| format!("Invalid schedule in {}", path.display()))?;

        if let Some(s) = &schedule {
            debug!(
                id = s.id,
                max_nodes = s.max_nodes,
                n_cells = s.n_cells,
                backoff = ?(s.backoff_n_min, s.backoff_n_max),
                "External schedule"
            );
        }

        info!(
            default_schedule_id = ?file.default_schedule_id,
            external_schedule = ?schedule.as_ref().map(|s| s.id),
            "Network configuration loaded"
        );

        Ok(Self {
            default_schedule_id: file.default_schedule_id,
            schedule,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const FIVE_CELL: &str = r#"
default_schedule_id: 5
schedule:
  id: 42
  max_nodes: 2
  backoff_n_min: 4
  backoff_n_max: 8
  cells:
    - { role: B, channel_offset: 0 }
    - { role: S, channel_offset: 3 }
    - { role: D, channel_offset: 1 }
    - { role: U, channel_offset: 0 }
    - { role: u, channel_offset: 2 }
"#;

    // ── load_from_file ────────────────────────────────────────────────────────

    #[test]
    fn load_full_config() {
        let f = yaml_tempfile(FIVE_CELL);
        let cfg = NetworkConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.default_schedule_id, Some(5));
        let s = cfg.schedule.unwrap();
        assert_eq!(s.id, 42);
        assert_eq!(s.max_nodes, 2);
        assert_eq!((s.backoff_n_min, s.backoff_n_max), (4, 8));
        assert_eq!(
            s.cells,
            vec![
                Cell::beacon(0),
                Cell::shared(3),
                Cell::downlink(1),
                Cell::uplink(0),
                Cell::uplink(2),
            ]
        );
        assert!(s.validate().is_ok());
    }

    #[test]
    fn n_cells_defaults_to_cell_list_length() {
        let f = yaml_tempfile(FIVE_CELL);
        let s = NetworkConfig::load_from_file(f.path())
            .unwrap()
            .schedule
            .unwrap();
        assert_eq!(s.n_cells, 5);
    }

    #[test]
    fn declared_n_cells_is_kept_as_written() {
        let yaml = FIVE_CELL.replace("  cells:", "  n_cells: 7\n  cells:");
        let f = yaml_tempfile(&yaml);
        let s = NetworkConfig::load_from_file(f.path())
            .unwrap()
            .schedule
            .unwrap();
        // mismatch is left for catalog registration to reject
        assert_eq!(s.n_cells, 7);
        assert!(s.validate().is_err());
    }

    #[test]
    fn optional_keys_may_be_absent() {
        let f = yaml_tempfile("default_schedule_id: 1\n");
        let cfg = NetworkConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.default_schedule_id, Some(1));
        assert!(cfg.schedule.is_none());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let f = yaml_tempfile("");
        let cfg = NetworkConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, NetworkConfig::default());
    }

    // ── errors ────────────────────────────────────────────────────────────────

    #[test]
    fn missing_file_returns_error() {
        let result = NetworkConfig::load_from_file(Path::new("/nonexistent/path/network.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(NetworkConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_role_tag_is_an_error() {
        let yaml = FIVE_CELL.replace("{ role: S,", "{ role: X,");
        let f = yaml_tempfile(&yaml);
        let err = NetworkConfig::load_from_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown role tag"));
    }

    #[test]
    fn multi_letter_role_is_an_error() {
        let yaml = FIVE_CELL.replace("{ role: B,", "{ role: Beacon,");
        let f = yaml_tempfile(&yaml);
        assert!(NetworkConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let f = yaml_tempfile("default_schedule: 6\n");
        assert!(NetworkConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn out_of_range_offset_is_an_error() {
        let yaml = FIVE_CELL.replace("channel_offset: 3", "channel_offset: 300");
        let f = yaml_tempfile(&yaml);
        assert!(NetworkConfig::load_from_file(f.path()).is_err());
    }
}
