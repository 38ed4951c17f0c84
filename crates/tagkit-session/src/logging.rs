#![forbid(unsafe_code)]

//! Diagnostic output.
//!
//! Every crate in the workspace logs through `tracing`; nothing is printed
//! unless the host installs a subscriber. Hosts without one of their own can
//! enable the `subscriber` feature and call [`init_logging`].

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "TAGKIT_LOG";

/// Install a formatting subscriber filtered by [`LOG_ENV`] (default `warn`).
///
/// Returns `false` if a global subscriber was already installed; the
/// existing one is left in place.
#[cfg(feature = "subscriber")]
pub fn init_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "subscriber"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_does_not_replace_subscriber() {
        let _ = init_logging();
        assert!(!init_logging());
    }
}
