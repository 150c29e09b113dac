// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// The level implied by `-q` / `-v` flags. Only errors are shown when quiet.
pub fn level_for(quiet: bool, verbose: u8) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init(quiet: bool, verbose: u8) {
    let level = level_for(quiet, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    // Fails only when a subscriber is already installed, which leaves that one in charge.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_levels() {
        assert_eq!(level_for(true, 0), Level::ERROR);
        assert_eq!(level_for(true, 3), Level::ERROR);
        assert_eq!(level_for(false, 0), Level::WARN);
        assert_eq!(level_for(false, 1), Level::INFO);
        assert_eq!(level_for(false, 2), Level::DEBUG);
        assert_eq!(level_for(false, 9), Level::TRACE);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false, 0);
        init(false, 2);
    }
}
