#![warn(missing_docs)]

//! Shared tracing filter construction and subscriber setup for the xouse workspace.

use std::{env, io, sync::OnceLock};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Tracks whether a subscriber has been installed by [`init_for`].
static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["xouse_config", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `filter`
/// - `level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(level: Option<&str>, filter: Option<&str>) -> String {
    if let Some(spec) = filter {
        return spec.to_string();
    }
    if let Some(lvl) = level {
        return level_spec_for(lvl);
    }
    match env::var("RUST_LOG") {
        Ok(spec) if !spec.is_empty() => spec,
        _ => level_spec_for("info"),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a compact stderr subscriber once per process.
///
/// When `quiet` is true only warnings and errors are shown regardless of
/// `RUST_LOG`; otherwise the filter comes from [`compute_spec`]. Later calls
/// are no-ops, as is installing over a subscriber set up elsewhere.
pub fn init_for(quiet: bool) {
    LOGGING_INITIALIZED.get_or_init(|| {
        let spec = if quiet {
            "warn".to_string()
        } else {
            compute_spec(None, None)
        };
        let _ignored = tracing_subscriber::registry()
            .with(env_filter_from_spec(&spec))
            .with(fmt::layer().without_time().with_writer(io::stderr))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_every_crate() {
        assert_eq!(level_spec_for("DEBUG"), "xouse_config=debug,logging=debug");
    }

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(
            compute_spec(Some("trace"), Some("xouse_config=warn")),
            "xouse_config=warn"
        );
        assert_eq!(compute_spec(Some("trace"), None), level_spec_for("trace"));
    }

    #[test]
    fn init_is_idempotent() {
        init_for(true);
        init_for(false);
        tracing::warn!("still usable after repeated init");
    }
}
