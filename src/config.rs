//! Plugin configuration.

use log::LevelFilter;

use crate::plasma;

/// Settings fixed for the lifetime of a [`Plugin`](crate::Plugin).
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Multiplier from host time to plasma animation phase.
    pub animation_speed: f32,
    /// Level for this crate's own log records when the C entry points
    /// install the logger. `RUST_LOG` directives override it.
    pub log_level: LevelFilter,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            animation_speed: plasma::DEFAULT_SPEED,
            log_level: LevelFilter::Info,
        }
    }
}
