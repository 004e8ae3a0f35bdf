use log::LevelFilter;

/// Initialize logging using env_logger.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
/// e.g. `RUST_LOG=circle_profile_store=trace circle-profile show`
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
