//! Logging setup for tools embedding this crate.
//!
//! The crate itself only logs through the `log` facade; nothing here is
//! required for the tracker to work. Tools that want the facade wired
//! up can call [`init`] once at startup. Level selection, in priority
//! order:
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. `quiet` (errors only) or `verbose` count (debug/trace)
//! 3. Default: info

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the `env_logger` backend from verbosity flags.
///
/// Call once, before any logging happens; `env_logger` can only be
/// installed once per process and a second call panics.
pub fn init(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    // Module paths only matter when someone asked for detail.
    let show_module = verbose >= 1;
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if show_module {
            writeln!(
                buf,
                "{style}{:<5}{style:#} [{}] {}",
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    builder.init();
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_default() {
        assert_eq!(level_for(0, false), LevelFilter::Info);
    }

    #[test]
    fn test_level_for_verbose() {
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(2, false), LevelFilter::Trace);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(level_for(2, true), LevelFilter::Error);
    }
}
