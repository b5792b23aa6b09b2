use log::LevelFilter;

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .format_target(false)
        .init();
}
