use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Terminal logger on stderr so stdout stays machine readable.
///
/// Only records of this crate and the `renti` binary are shown.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::default()
        .add_filter_allow_str("renti")
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}
