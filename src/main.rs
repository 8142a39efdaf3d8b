//! MargaNav - Turn-based navigation controller for voxel-world agents
//!
//! Drives an agent toward a target cell over a line-oriented JSON
//! protocol: one request per turn (position query, single step, or cell
//! probe), one blocking reply. The agent cannot see the world — paths
//! are planned from obstacle knowledge accumulated by probing after
//! rejected steps, and replanned whenever the world disagrees.
//!
//! ## Architecture
//!
//! - **Planner**: A* over the two horizontal grid axes
//! - **Navigator**: the state machine pacing one request per turn
//! - **Client**: newline-delimited JSON over stdin/stdout

mod client;
mod config;
mod error;
mod grid;
mod navigation;
mod planning;
mod protocol;
mod tracker;

use config::MargaConfig;
use error::{MargaError, Result};
use grid::Cell;
use navigation::{Navigator, NavigatorConfig};

use client::BotClient;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Initialize logging. Stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga_nav=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 && !args[1].starts_with("--") {
        // Load config from file
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        MargaConfig::load(config_path)?
    } else if Path::new("marga.toml").exists() {
        info!("Loading configuration from marga.toml");
        MargaConfig::load(Path::new("marga.toml"))?
    } else {
        info!("Using default configuration");
        MargaConfig::default()
    };

    // Check for --target argument
    let target_arg = args
        .iter()
        .position(|a| a == "--target")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let target: Cell = match target_arg {
        Some(arg) => parse_target(&arg)?,
        None => config.target.map(Cell::from).ok_or_else(|| {
            MargaError::Config(
                "no target: add a [target] section or pass --target x,y,z".to_string(),
            )
        })?,
    };

    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Navigating to {} (step budget {}, tolerance ±{})",
        target, config.navigation.step_budget, config.navigation.target_tolerance
    );

    let mut navigator = Navigator::new(NavigatorConfig {
        step_budget: config.navigation.step_budget,
        target_tolerance: config.navigation.target_tolerance,
        max_search_nodes: config.navigation.max_search_nodes,
    });
    navigator.set_target(target);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut bot = BotClient::new(stdin.lock(), stdout.lock());

    let poll_interval = Duration::from_millis(config.driver.poll_interval_ms);

    // Main loop: one request, one blocking reply, one feedback per turn
    loop {
        std::thread::sleep(poll_interval);

        let Some(action) = navigator.next_action() else {
            if navigator.is_complete() {
                break;
            }
            continue;
        };

        let reply = match bot.round_trip(&action) {
            Ok(reply) => reply,
            Err(e) => {
                error!("Communication with the actuator failed: {}", e);
                return Err(e);
            }
        };

        navigator.handle_feedback(&reply);
    }

    if navigator.target_reached() {
        info!(
            "Target reached within tolerance in {} steps",
            navigator.steps_taken()
        );
    } else {
        warn!(
            "Gave up after {} steps without reaching the target",
            navigator.steps_taken()
        );
    }

    info!("MargaNav finished");
    Ok(())
}

/// Parse a `--target` argument of the form `x,y,z`.
fn parse_target(arg: &str) -> Result<Cell> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(MargaError::Config(format!(
            "invalid target '{}': expected x,y,z",
            arg
        )));
    }

    let mut coords = [0i32; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| MargaError::Config(format!("invalid target coordinate '{}'", part)))?;
    }

    Ok(Cell::new(coords[0], coords[1], coords[2]))
}
