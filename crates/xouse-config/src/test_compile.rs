#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, thread};

    use crate::*;

    fn doc(src: &str) -> Document {
        logging::init_for(true);
        parse_document(src, None).unwrap()
    }

    fn compiles(src: &str) -> Compiled {
        compile(&doc(src)).unwrap()
    }

    fn fails(src: &str) -> Error {
        compile(&doc(src)).unwrap_err()
    }

    const REV0_HEAD: &str = "speed = 70\nspeed_up = 3\nspeed_down = 3\nspeed_inc = 5\n";
    const REV3_HEAD: &str = "speed = 70\nspeed_up = 3\nspeed_down = 3\nspeed_step = 5\n";

    fn rev0(body: &str) -> String {
        format!("{REV0_HEAD}{body}")
    }

    fn rev3(body: &str) -> String {
        format!("{REV3_HEAD}{body}")
    }

    #[test]
    fn oldest_lowercase_click_becomes_canonical_click() {
        let out = compiles(&rev0("[buttons]\nsouth = \"lClick\"\n"));
        assert_eq!(
            out.profile.bindings[Button::South],
            [Action::Click(MouseButton::Left)]
        );
        assert_eq!(out.profile.bindings.action_count(), 1);
        assert_eq!(out.profile.speed.speed_step, 5.0);
        assert_eq!(out.report.source_revision, 0);
        assert!(out.report.advisories.is_empty());
    }

    #[test]
    fn asymmetric_steps_compile_with_an_advisory() {
        let out = compiles(
            "speed = 70\nspeed_up = 3\nspeed_down = 3\nspeed_inc = 2\nspeed_dec = 4\n\
             [actions]\nDPadUp = \"SpeedInc\"\nDPadDown = \"SpeedDec\"\n",
        );
        assert_eq!(out.profile.speed.speed_step, 2.0);
        assert_eq!(out.profile.bindings[Button::DPadDown], [Action::SpeedDec]);
        let entries = out.report.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Advisory);
        assert_eq!(entries[0].revision, Some(1));
        assert_eq!(entries[0].path.to_string(), "speed_dec");
        assert_eq!(entries[0].code, "asymmetric_speed_step");
    }

    #[test]
    fn unknown_button_fails_at_its_path() {
        let err = fails(&rev3(
            r#"
            [bindings]
            South = ["Rumble"]
            Triangle = ["Rumble"]
        "#,
        ));
        let Error::Validation {
            revision,
            violations,
        } = &err
        else {
            panic!("expected validation failure, got {err:?}");
        };
        assert_eq!(*revision, schema::CURRENT);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path.to_string(), "bindings.Triangle");
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownButton {
                key: "Triangle".to_string()
            }
        );
    }

    #[test]
    fn unknown_button_in_a_legacy_file_names_that_revision() {
        let err = fails(&rev0("[buttons]\ntriangle = \"lClick\"\n"));
        let report = err.report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].revision, Some(0));
        assert_eq!(report[0].path.to_string(), "buttons.triangle");
        assert_eq!(report[0].code, "unknown_button");
    }

    #[test]
    fn duplicate_modifiers_collapse() {
        let out = compiles(&rev3(
            r#"
            [bindings]
            West = [{ KeyPress = { key = "a", modifiers = ["Shift", "Shift"] } }]
        "#,
        ));
        assert_eq!(
            out.profile.bindings[Button::West],
            [Action::KeyPress {
                key: "a".to_string(),
                modifiers: BTreeSet::from([Modifier::Shift]),
            }]
        );
    }

    #[test]
    fn every_independent_violation_is_reported() {
        let err = fails(
            r#"
            speed = -70
            speed_up = inf
            speed_down = "3"
            speed_step = 5
            turbo = true
            [bindings]
            South = ["Jump"]
            North = [{ Click = "Back" }]
            south = []
        "#,
        );
        let codes: Vec<_> = err.report().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                "negative",
                "not_finite",
                "wrong_type",
                "unknown_field",
                "unknown_action",
                "malformed_action",
                "unknown_button",
            ]
        );
    }

    #[test]
    fn unmappable_actions_are_all_reported_with_their_revision() {
        let err = fails(&rev0(
            r#"
            [buttons]
            north = "mClick"
            south = "lClick"
            rs = "mClick"
        "#,
        ));
        let Error::Migration { from, to, failures } = &err else {
            panic!("expected migration failure, got {err:?}");
        };
        assert_eq!((*from, *to), (0, 1));
        let paths: Vec<_> = failures.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["buttons.north", "buttons.rs"]);
        assert!(err.pretty().contains("action 'mClick' has no equivalent"));
    }

    #[test]
    fn lua_scripts_stop_at_the_last_step() {
        let err = fails(
            r#"
            speed = 70
            speed_up = 3
            speed_down = 3
            speed_step = 5
            [actions]
            Start = [{ UpDown = { LuaScript = { script = "x()" } } }]
        "#,
        );
        assert!(matches!(err, Error::Migration { from: 2, to: 3, .. }));
        assert_eq!(err.report()[0].path.to_string(), "actions.Start[0]");
    }

    #[test]
    fn foreign_documents_are_unrecognized() {
        let err = fails("[package]\nname = \"x\"\n");
        assert!(matches!(err, Error::UnrecognizedSchema { .. }));
        assert_eq!(err.report()[0].code, "unrecognized_schema");
    }

    #[test]
    fn compiling_twice_is_identical() {
        let src = rev0(
            r#"
            [buttons]
            south = "lClick"
            lb = "speedInc"
            rt = "speedUp"
            select = "none"
        "#,
        );
        let a = compiles(&src);
        let b = compiles(&src);
        assert_eq!(a, b);
        assert_eq!(
            to_toml_string(&a.profile).unwrap(),
            to_toml_string(&b.profile).unwrap()
        );
    }

    #[test]
    fn load_from_str_attaches_no_path_to_syntax_errors() {
        let err = load_from_str("[bindings\n", None).unwrap_err();
        assert!(matches!(err, Error::Parse { path: None, .. }));
        assert!(err.pretty().starts_with("Config parse error at line"));
    }

    #[test]
    fn concurrent_compiles_match_serial_ones() {
        let sources = vec![
            rev0("[buttons]\nsouth = \"lClick\"\n"),
            "speed = 1\nspeed_up = 1\nspeed_down = 1\nspeed_inc = 1\nspeed_dec = 3\n\
             [actions]\nLeftTrigger = \"RClick\"\n"
                .to_string(),
            rev3("[bindings]\nStart = [\"ToggleVis\"]\n"),
            rev3("[bindings]\nBogus = []\n"),
        ];
        let docs: Vec<Document> = sources.iter().map(|s| doc(s)).collect();
        let serial: Vec<_> = docs.iter().map(compile).collect();
        let parallel: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = docs
                .iter()
                .map(|d| s.spawn(move || compile(d)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(serial, parallel);
    }
}
