//! Parse and load binding files.

use std::{ffi::OsStr, fs, path::Path};

use tracing::info;

use crate::{Compiled, Document, Error, compile, error::excerpt_at};

/// Convert a byte offset into 1-based `(line, col)`.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let col = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, col)
}

/// Parse TOML text into an uninterpreted document.
pub fn parse_document(source: &str, path: Option<&Path>) -> Result<Document, Error> {
    toml::from_str::<Document>(source).map_err(|e| {
        let (line, col) = e
            .span()
            .map_or((1, 1), |span| line_col(source, span.start));
        Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message: e.message().to_string(),
            excerpt: excerpt_at(source, line, col),
        }
    })
}

/// Parse and compile an in-memory binding file.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Compiled, Error> {
    let doc = parse_document(source, path)?;
    compile(&doc)
}

/// Read, parse, and compile the binding file at `path`.
pub fn load_from_path(path: &Path) -> Result<Compiled, Error> {
    if path.extension() != Some(OsStr::new("toml")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .toml file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let compiled = load_from_str(&source, Some(path))?;
    info!(
        path = %path.display(),
        revision = compiled.report.source_revision,
        actions = compiled.profile.bindings.action_count(),
        "loaded binding file"
    );
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_line_and_column() {
        let src = "a = 1\nbb = 2\n";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 6), (2, 1));
        assert_eq!(line_col(src, 8), (2, 3));
        assert_eq!(line_col(src, 999), (3, 1));
    }

    #[test]
    fn syntax_errors_carry_location() {
        let src = "speed = 1\nspeed_up = = 2\n";
        let err = parse_document(src, None).unwrap_err();
        let Error::Parse { line, excerpt, .. } = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(*line, 2);
        assert!(excerpt.contains("speed_up = = 2"));
        assert!(excerpt.contains('^'));
    }

    #[test]
    fn rejects_other_extensions() {
        let err = load_from_path(Path::new("bindings.json")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(Path::new("bindings.json")));
    }

    #[test]
    fn missing_files_are_read_errors() {
        let path = Path::new("/nonexistent/xouse/config.toml");
        let err = load_from_path(path).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.pretty().starts_with("Read error at /nonexistent/"));
    }
}
