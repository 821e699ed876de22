//! Terminal logging using env_logger
//!
//! The level comes from the store config; `RUST_LOG` still overrides it.

use log::LevelFilter;
use statehouse::StoreConfig;

/// Initialize logging for the demo
pub fn init(config: &StoreConfig) {
    let level = config
        .level()
        .map(|level| level.to_level_filter())
        .unwrap_or(LevelFilter::Debug);

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
