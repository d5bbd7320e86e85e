#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::{collection, prelude::*, sample};
    use toml::Value;

    use crate::{schema::REVISIONS, *};

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            sample::select(Action::BARE.map(|(_, a)| a).to_vec()),
            sample::select(MouseButton::ALL.to_vec())
                .prop_map(Action::Click),
            (
                "[A-Za-z0-9]{1,8}",
                collection::btree_set(sample::select(Modifier::ALL.to_vec()), 0..=4),
            )
                .prop_map(|(key, modifiers)| Action::KeyPress { key, modifiers }),
        ]
    }

    fn profile_strategy() -> impl Strategy<Value = Profile> {
        (
            0.0f64..500.0,
            0.0f64..10.0,
            0.0f64..10.0,
            -50.0f64..50.0,
            collection::vec(
                (
                    sample::select(Button::ALL.to_vec()),
                    collection::vec(action_strategy(), 0..4),
                ),
                0..10,
            ),
        )
            .prop_map(|(speed, speed_up, speed_down, speed_step, bindings)| Profile {
                speed: SpeedConfig {
                    speed,
                    speed_up,
                    speed_down,
                    speed_step,
                },
                bindings: bindings.into_iter().collect(),
            })
    }

    /// Top-level keys that take part in revision signatures, plus a stray one.
    const KEYS: [&str; 6] = [
        "buttons",
        "actions",
        "bindings",
        "speed_inc",
        "speed_step",
        "title",
    ];

    proptest! {
        #[test]
        fn detection_picks_the_oldest_satisfied_signature(mask in 0u8..64) {
            let mut doc = Document::new();
            for (i, key) in KEYS.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    let value = if i < 3 {
                        Value::Table(toml::Table::new())
                    } else {
                        Value::Float(1.0)
                    };
                    doc.insert((*key).to_string(), value);
                }
            }
            let first = detect(&doc).map(|r| r.index);
            let second = detect(&doc).map(|r| r.index);
            prop_assert_eq!(&first, &second);

            let satisfied = |idx: usize| {
                REVISIONS[idx].signature.iter().all(|k| doc.contains_key(*k))
            };
            match first {
                Ok(idx) => {
                    prop_assert!(satisfied(idx));
                    prop_assert!((0..idx).all(|earlier| !satisfied(earlier)));
                }
                Err(_) => prop_assert!((0..REVISIONS.len()).all(|i| !satisfied(i))),
            }
        }

        #[test]
        fn modifier_lists_collapse_to_their_set(
            mods in collection::vec(sample::select(Modifier::ALL.to_vec()), 0..8),
        ) {
            let list: Vec<_> = mods.iter().map(|m| format!("\"{}\"", m.name())).collect();
            let src = format!(
                "speed = 1\nspeed_up = 1\nspeed_down = 1\nspeed_step = 1\n\
                 [bindings]\nSouth = [{{ KeyPress = {{ key = \"k\", modifiers = [{}] }} }}]\n",
                list.join(", ")
            );
            let out = load_from_str(&src, None).unwrap();
            let expected: BTreeSet<_> = mods.into_iter().collect();
            prop_assert_eq!(
                &out.profile.bindings[Button::South],
                &[Action::KeyPress { key: "k".to_string(), modifiers: expected }][..]
            );
        }

        #[test]
        fn emitted_profiles_recompile_unchanged(profile in profile_strategy()) {
            let text = to_toml_string(&profile).unwrap();
            let out = load_from_str(&text, None).unwrap();
            prop_assert_eq!(out.report.source_revision, schema::CURRENT);
            prop_assert_eq!(&out.profile, &profile);
            prop_assert_eq!(to_toml_string(&out.profile).unwrap(), text);
        }
    }
}
