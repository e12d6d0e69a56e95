/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use mesh_schedule::catalog::{Catalog, DEFAULT_SCHEDULE_ID};
use mesh_schedule::config::NetworkConfig;
use mesh_schedule::schedule::Schedule;
use mesh_schedule::slot::Slot;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Inspect and validate mesh slotframe schedules.
///
/// Example:
///   mesh-schedule -c network.yaml -i 42 --slots 20 --list
#[derive(Debug, Parser)]
#[command(
    name = "mesh-schedule",
    about = "Slotframe schedule catalog for a TSCH-style mesh MAC",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML network configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Schedule id to select (defaults to the configured default).
    #[arg(short = 'i', long = "schedule-id")]
    schedule_id: Option<u8>,

    /// Number of slots to walk through the selected schedule.
    #[arg(long = "slots", default_value_t = 0)]
    slots: u64,

    /// List every registered schedule.
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

fn log_schedule(schedule: &Schedule) {
    let summary = schedule.summary();
    let roles: String = schedule.cells.iter().map(|c| c.role.tag()).collect();
    info!(
        id = schedule.id,
        max_nodes = schedule.max_nodes,
        n_cells = schedule.n_cells,
        backoff = ?(schedule.backoff_n_min, schedule.backoff_n_max),
        beacons = summary.beacons,
        groups = summary.groups,
        downlinks = summary.downlinks,
        uplinks = summary.uplinks,
        uplinks_per_downlink = %format!("{:.2}", summary.uplinks_per_downlink()),
        "  [{roles}]"
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        config = ?cli.config,
        schedule_id = ?cli.schedule_id,
        slots = cli.slots,
        list = cli.list,
        "Configuration"
    );

    // ── Catalog + network configuration ───────────────────────────────────────
    let mut catalog = Catalog::with_builtins();

    let network = match &cli.config {
        Some(path) => match NetworkConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load network configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No network configuration file provided, using built-in schedules only");
            NetworkConfig::default()
        }
    };

    if let Some(external) = network.schedule {
        let id = external.id;
        if let Err(e) = catalog.register(external) {
            error!(id, "External schedule rejected: {}", e);
        }
    }

    if cli.list {
        info!(
            "{} schedule(s) registered, {} slot(s) free:",
            catalog.len(),
            catalog.remaining()
        );
        for schedule in catalog.iter() {
            log_schedule(schedule);
        }
    }

    // ── Select ────────────────────────────────────────────────────────────────
    let fallback_id = network.default_schedule_id.unwrap_or(DEFAULT_SCHEDULE_ID);
    let requested = cli.schedule_id.unwrap_or(fallback_id);

    let Some(schedule) = catalog.select(requested, fallback_id) else {
        error!(requested, fallback_id, "No schedule available");
        process::exit(1);
    };

    info!(id = schedule.id, "Selected schedule");
    log_schedule(schedule);

    // ── Walk slots ────────────────────────────────────────────────────────────
    if cli.slots > 0 {
        let mut observer = |asn: u64, slot: &Slot| {
            info!(
                asn,
                index = slot.index,
                role = %slot.role,
                channel_offset = slot.channel_offset,
                "slot"
            );
        };
        let delivered = schedule.replay(0, cli.slots, &mut observer);
        info!(delivered, "Slot walk complete");
    }
}
