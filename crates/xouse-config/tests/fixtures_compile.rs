//! Integration tests compiling the per-revision fixture files.

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, fs, path::PathBuf};

    use xouse_config::{Profile, load_from_path, parse_document, schema, to_toml_string};

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Compile every fixture, keyed by the revision named in its file name.
    fn compile_all() -> BTreeMap<usize, Profile> {
        logging::init_for(true);
        let mut out = BTreeMap::new();
        for entry in fs::read_dir(fixtures_dir()).expect("read fixtures dir") {
            let path = entry.unwrap().path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            let fname = path.file_name().unwrap().to_string_lossy().to_string();
            let revision: usize = fname
                .strip_prefix("rev")
                .and_then(|rest| rest.split('-').next())
                .and_then(|n| n.parse().ok())
                .unwrap_or_else(|| panic!("fixture {fname} is not named rev<N>-*.toml"));

            let compiled = match load_from_path(&path) {
                Ok(c) => c,
                Err(e) => panic!("failed to compile {}:\n{}", fname, e.pretty()),
            };
            assert_eq!(compiled.report.source_revision, revision, "{fname}");
            assert_eq!(
                compiled.report.visited(),
                (revision..=schema::CURRENT).collect::<Vec<_>>(),
                "{fname}"
            );
            out.insert(revision, compiled.profile);
        }
        out
    }

    #[test]
    fn every_revision_has_a_fixture_that_reaches_current() {
        let compiled = compile_all();
        let revisions: Vec<_> = compiled.keys().copied().collect();
        assert_eq!(revisions, (0..=schema::CURRENT).collect::<Vec<_>>());
    }

    #[test]
    fn equivalent_fixtures_agree() {
        let compiled = compile_all();
        assert_eq!(compiled[&0], compiled[&1]);
        assert_eq!(compiled[&2], Profile::builtin());
        assert_eq!(compiled[&3], Profile::builtin());
    }

    #[test]
    fn canonical_output_redetects_as_current() {
        for profile in compile_all().values() {
            let text = to_toml_string(profile).unwrap();
            let doc = parse_document(&text, None).unwrap();
            assert!(xouse_config::detect(&doc).unwrap().is_current());
        }
    }
}
