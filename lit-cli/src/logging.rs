use crate::cli::Cli;
use crate::config::Config;

/// Install `env_logger` once per process, picking a filter level from (in
/// order of precedence) `--quiet`, `--verbose`, `config.debug`, default.
pub fn init(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose || config.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init()
        .ok();
}
