/// Logger setup shared by the driver and the role binaries.
///
/// Lines look like `[INFO] Passed 3 / 4`, with the level coloured. `RUST_LOG`
/// is honoured; the driver's `--debug` overrides it.
use crate::utils::ansi;
use log::{Level, LevelFilter};
use std::io::Write;

fn level_label(level: Level) -> String {
    match level {
        Level::Trace | Level::Debug => ansi::paint(ansi::GREY, level.as_str()),
        Level::Info => ansi::blue(level.as_str()),
        Level::Warn => ansi::paint(ansi::YELLOW, "WARN"),
        Level::Error => ansi::red(level.as_str()),
    }
}

/// Install the global logger. `default_level` applies when `RUST_LOG` is
/// unset; `force_debug` wins over both.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str, force_debug: bool) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let mut builder = env_logger::Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", level_label(record.level()), record.args())
    });
    if force_debug {
        builder.filter_level(LevelFilter::Debug);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
