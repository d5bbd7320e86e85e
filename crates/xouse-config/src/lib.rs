//! Binding file compiler for the xouse gamepad mouse.
//!
//! A binding file may be written in any shipped revision of the format. The
//! compiler detects which one, validates it, and migrates it one revision at a
//! time into the canonical [`Profile`] the executor consumes.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

mod action;
mod button;
mod compile;
mod defaults;
mod detect;
mod document;
mod emit;
mod error;
mod loader;
pub mod migrate;
mod path;
mod profile;
mod report;
pub mod schema;
pub mod validate;

#[cfg(test)]
mod test_compile;
#[cfg(test)]
mod test_migrate;
#[cfg(test)]
mod test_props;

pub use action::{Action, ActionError, Modifier, MouseButton};
pub use button::Button;
pub use compile::{CompileReport, Compiled, Stage, compile};
pub use detect::detect;
pub use document::Document;
pub use emit::{to_document, to_toml_string};
pub use error::{Error, excerpt_at};
pub use loader::{load_from_path, load_from_str, parse_document};
pub use path::{FieldPath, Segment};
pub use profile::{BindingTable, Profile, SpeedConfig};
pub use report::{ReportEntry, Severity};
pub use validate::{Violation, ViolationKind};

/// Determine the preferred binding file path.
///
/// `$XDG_CONFIG_HOME/xouse/config.toml`, or `~/.config/xouse/config.toml`
/// when `XDG_CONFIG_HOME` is unset or empty.
pub fn default_config_path() -> PathBuf {
    config_path_under(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
}

/// The binding file path for the given `XDG_CONFIG_HOME` and `HOME` values.
fn config_path_under(xdg_config_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let mut p = match xdg_config_home {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let mut home = PathBuf::from(home.unwrap_or_default());
            home.push(".config");
            home
        }
    };
    p.push("xouse");
    p.push("config.toml");
    p
}

/// Resolve the effective binding file path.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use [`default_config_path`] when it exists.
/// 3) Else return a "no config found" error naming the default path.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    resolve_against(explicit, default_config_path())
}

/// [`resolve_config_path`] with the preferred path supplied.
fn resolve_against(explicit: Option<&Path>, preferred: PathBuf) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        message: format!("No config found. Create {}", preferred.display()),
        path: Some(preferred),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_config_home_wins_when_set() {
        let p = config_path_under(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(p, PathBuf::from("/xdg/xouse/config.toml"));
    }

    #[test]
    fn empty_or_unset_xdg_falls_back_to_home() {
        let expected = PathBuf::from("/home/u/.config/xouse/config.toml");
        let empty = config_path_under(Some(OsString::new()), Some("/home/u".into()));
        assert_eq!(empty, expected);
        assert_eq!(config_path_under(None, Some("/home/u".into())), expected);
    }

    #[test]
    fn default_path_names_the_xouse_config_file() {
        assert!(default_config_path().ends_with("xouse/config.toml"));
    }

    #[test]
    fn explicit_path_is_used_as_given() {
        let explicit = Path::new("/nowhere/custom.toml");
        let resolved = resolve_config_path(Some(explicit)).unwrap();
        assert_eq!(resolved, explicit.to_path_buf());
    }

    #[test]
    fn existing_default_is_used() {
        let preferred = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("rev3-canonical.toml");
        let resolved = resolve_against(None, preferred.clone()).unwrap();
        assert_eq!(resolved, preferred);
    }

    #[test]
    fn missing_default_is_a_read_error_naming_it() {
        let preferred = PathBuf::from("/nonexistent-xouse-home/xouse/config.toml");
        let err = resolve_against(None, preferred.clone()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(preferred.as_path()));
        let shown = preferred.display().to_string();
        assert!(err.pretty().contains(&shown));
    }
}
