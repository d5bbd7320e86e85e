#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use crate::*;

    /// Compile a document binding the single key `button` to `entry` in `revision`.
    fn compile_one(revision: usize, button: &str, entry: &str) -> Result<Compiled, Error> {
        let (head, table) = match revision {
            0 => ("speed_inc = 1", "buttons"),
            1 => ("speed_inc = 1\nspeed_dec = 1", "actions"),
            2 => ("speed_step = 1", "actions"),
            _ => ("speed_step = 1", "bindings"),
        };
        let src = format!(
            "speed = 10\nspeed_up = 2\nspeed_down = 2\n{head}\n[{table}]\n{button} = {entry}\n"
        );
        compile(&parse_document(&src, None)?)
    }

    /// A harmless entry valid in `revision`.
    fn sample_action(revision: usize) -> &'static str {
        match revision {
            0 => "\"speedInc\"",
            1 => "\"SpeedInc\"",
            2 => "[{ Simple = \"SpeedInc\" }]",
            _ => "[\"SpeedInc\"]",
        }
    }

    /// Canonical button each spelling of `revision` lands on.
    fn landing(revision: usize) -> BTreeMap<&'static str, Button> {
        let rev = schema::revision(revision).unwrap();
        rev.buttons
            .iter()
            .map(|key| {
                let out = compile_one(revision, key, sample_action(revision)).unwrap();
                let bound: Vec<_> = out.profile.bindings.bound().map(|(b, _)| b).collect();
                assert_eq!(bound.len(), 1, "{key} in revision {revision}");
                (*key, bound[0])
            })
            .collect()
    }

    #[test]
    fn every_legacy_button_lands_on_a_distinct_canonical_button() {
        for revision in 0..=schema::CURRENT {
            let map = landing(revision);
            let targets: HashSet<_> = map.values().collect();
            assert_eq!(targets.len(), Button::COUNT, "revision {revision}");
        }
    }

    #[test]
    fn shoulder_and_trigger_relabeling_is_the_only_reused_spelling() {
        let maps: Vec<_> = (0..=schema::CURRENT).map(landing).collect();
        let mut reused = Vec::new();
        for (i, a) in maps.iter().enumerate() {
            for b in &maps[i + 1..] {
                for (key, target) in a {
                    if let Some(other) = b.get(key)
                        && other != target
                    {
                        reused.push(*key);
                    }
                }
            }
        }
        reused.sort_unstable();
        reused.dedup();
        assert_eq!(reused, vec!["LeftTrigger", "RightTrigger"]);

        // Revision 1 spells the shoulders `*Trigger`; from revision 2 they are bumpers.
        assert_eq!(maps[1]["LeftTrigger"], Button::LeftBumper);
        assert_eq!(maps[1]["LeftTrigger2"], Button::LeftTrigger);
        assert_eq!(maps[2]["LeftTrigger"], Button::LeftTrigger);
        assert_eq!(maps[0]["lb"], Button::LeftBumper);
        assert_eq!(maps[0]["rt"], Button::RightTrigger);
    }

    #[test]
    fn legacy_tags_map_one_to_one() {
        let rev0 = [
            ("\"lClick\"", Action::Click(MouseButton::Left)),
            ("\"rClick\"", Action::Click(MouseButton::Right)),
            ("\"speedUp\"", Action::SpeedUp),
            ("\"speedDown\"", Action::SpeedDown),
            ("\"speedInc\"", Action::SpeedInc),
            ("\"speedDec\"", Action::SpeedDec),
        ];
        let rev2 = [
            ("[{ Simple = \"Rumble\" }]", Action::Rumble),
            ("[{ Simple = \"ToggleVis\" }]", Action::ToggleVis),
            (
                "[{ UpDown = { Click = \"Middle\" } }]",
                Action::Click(MouseButton::Middle),
            ),
        ];
        let mut seen = HashSet::new();
        for (revision, cases) in [(0, rev0.as_slice()), (2, rev2.as_slice())] {
            let button = if revision == 0 { "south" } else { "South" };
            for (entry, expected) in cases {
                let out = compile_one(revision, button, entry).unwrap();
                assert_eq!(
                    out.profile.bindings[Button::South],
                    [expected.clone()],
                    "{entry}"
                );
                assert!(seen.insert(expected.clone()), "{entry} collides");
            }
        }
    }

    #[test]
    fn none_is_pruned_to_an_unbound_button() {
        let out = compile_one(0, "start", "\"none\"").unwrap();
        assert!(out.profile.bindings[Button::Start].is_empty());
        assert_eq!(out.profile.bindings.bound().count(), 0);
    }

    #[test]
    fn win_becomes_meta() {
        let out = compile_one(
            2,
            "North",
            "[{ UpDown = { KeyPress = { key = \"d\", modifiers = [\"Win\", \"Alt\"] } } }]",
        )
        .unwrap();
        assert_eq!(
            out.profile.bindings[Button::North],
            [Action::KeyPress {
                key: "d".to_string(),
                modifiers: [Modifier::Alt, Modifier::Meta].into_iter().collect(),
            }]
        );
    }

    #[test]
    fn action_order_is_preserved_verbatim() {
        let out = compile_one(
            2,
            "South",
            "[{ Simple = \"Rumble\" }, { UpDown = \"SpeedUp\" }, { Simple = \"Rumble\" }]",
        )
        .unwrap();
        assert_eq!(
            out.profile.bindings[Button::South],
            [Action::Rumble, Action::SpeedUp, Action::Rumble]
        );
    }

    #[test]
    fn new_variants_are_never_invented() {
        let out = compile_one(0, "south", "\"lClick\"").unwrap();
        let all: Vec<_> = out
            .profile
            .bindings
            .iter()
            .flat_map(|(_, actions)| actions.iter().cloned())
            .collect();
        assert_eq!(all, vec![Action::Click(MouseButton::Left)]);
    }
}
