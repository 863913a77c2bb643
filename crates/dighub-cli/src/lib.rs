//! Dighub - GitHub code-search dork scanner.
//!
//! Command-line front end: argument parsing, configuration layering,
//! progress display, and report rendering around the `dighub-scanner`
//! engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use app::run;
pub use cli::Cli;

/// Default log filter for a verbosity choice.
#[must_use]
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "info,dighub=debug"
    } else {
        "info"
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the verbosity flags.
pub fn init_tracing(verbose: bool, quiet: bool, no_color: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_ansi(!no_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, false), "info");
        assert_eq!(default_filter(true, false), "info,dighub=debug");
        assert_eq!(default_filter(false, true), "warn");
    }
}
