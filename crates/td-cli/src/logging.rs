use std::io::Write;

use log::LevelFilter;

pub(crate) fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs go to stderr so stdout stays a clean transcript. `RUST_LOG`, when
/// set, overrides the verbosity flag.
pub(crate) fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .format(|fmt, record| writeln!(fmt, "{}: {}", record.level(), record.args()));
    let _ = builder.try_init();
}
