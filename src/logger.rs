use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// Only lumen's own modules go below info; the image and exr encoders
/// stay at info or quieter so per-frame debug output remains readable.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level.min(LevelFilter::Info))
        .filter_module("lumen", level)
        .format_timestamp_millis()
        .format_target(false)
        .init();
}
