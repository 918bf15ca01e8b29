//! Logger setup for the C entry points.
//!
//! Library code only talks to the `log` facade. When the host loads the
//! `cdylib` there is no Rust `main` to pick a backend, so the first entry
//! point installs `env_logger` scoped to this crate's records.

use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

use crate::config::PluginConfig;

/// Target prefix of every record this crate emits.
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the `env_logger` backend, returning whether this call did so.
///
/// This crate logs at `config.log_level`; records from other crates are
/// limited to warnings. `RUST_LOG` directives, when set, are applied on top.
/// Returns `false` if a logger was already installed, by an earlier call or
/// by anything else in the process.
#[must_use]
pub fn init_logging(config: &PluginConfig) -> bool {
    if INSTALLED.swap(true, Ordering::AcqRel) {
        return false;
    }
    let directives = std::env::var("RUST_LOG").ok();
    let installed = builder(config.log_level, directives.as_deref())
        .try_init()
        .is_ok();
    if installed {
        log::debug!("logging initialized at {}", config.log_level);
    }
    installed
}

fn builder(level: LevelFilter, directives: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(CRATE_TARGET, level)
        .format_timestamp_millis();
    if let Some(directives) = directives {
        builder.parse_filters(directives);
    }
    builder
}
