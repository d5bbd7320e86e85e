//! The current revision, decoded straight into a [`Profile`].

use toml::Value;

use super::{Checker, Violation, ViolationKind, action_list, click_target, key_press_parts, walk};
use crate::{
    Action, ActionError, BindingTable, Button, Document, FieldPath, Profile, SpeedConfig,
    document::single_entry,
    path::Segment,
    schema::{Revision, TaggedEncoding},
};

/// Validate a current-revision document straight into a [`Profile`].
pub(super) fn validate(
    doc: &Document,
    revision: &Revision,
    encoding: &TaggedEncoding,
) -> Result<Profile, Vec<Violation>> {
    let walked = walk(doc, revision, |checker, path, value| {
        let Some(button) = path_leaf(path).and_then(Button::from_name) else {
            checker.push(
                path.clone(),
                ViolationKind::UnknownButton {
                    key: path_leaf(path).unwrap_or_default().to_string(),
                },
            );
            return None;
        };
        decode_list(checker, path, value, encoding).map(|actions| (button, actions))
    })?;
    let [speed, speed_up, speed_down, speed_step] = walked.speeds(SpeedConfig::FIELDS)?;
    let bindings: BindingTable = walked.entries.into_iter().map(|(_, e)| e).collect();
    Ok(Profile {
        speed: SpeedConfig {
            speed,
            speed_up,
            speed_down,
            speed_step,
        },
        bindings,
    })
}

/// The last key segment of `path`.
fn path_leaf(path: &FieldPath) -> Option<&str> {
    match path.segments().last() {
        Some(Segment::Key(k)) => Some(k.as_str()),
        _ => None,
    }
}

/// Decode one button's action list; `None` once anything in it fails.
fn decode_list(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    encoding: &TaggedEncoding,
) -> Option<Vec<Action>> {
    let items = action_list(checker, path, value)?;
    let before = checker.len();
    let actions: Vec<_> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| decode_action(checker, &path.index(i), item, encoding))
        .collect();
    (checker.len() == before).then_some(actions)
}

/// Decode a bare tag or single-key payload table.
fn decode_action(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    encoding: &TaggedEncoding,
) -> Option<Action> {
    match value {
        Value::String(tag) => {
            let known = encoding.tags.contains(&tag.as_str())
                || encoding.payloads.contains(&tag.as_str());
            let built = if known {
                Action::from_tag(tag)
            } else {
                Err(ActionError::UnknownTag { tag: tag.clone() })
            };
            match built {
                Ok(action) => Some(action),
                Err(e) => {
                    checker.action(path.clone(), e);
                    None
                }
            }
        }
        Value::Table(table) => {
            let Some((variant, payload)) = single_entry(table) else {
                checker.wrong_type(path.clone(), "single-key table", value);
                return None;
            };
            let payload_path = path.key(variant);
            let built = match variant {
                "Click" if encoding.payloads.contains(&variant) => {
                    let target =
                        click_target(checker, &payload_path, payload, encoding.mouse_buttons)?;
                    Action::click(target)
                }
                "KeyPress" if encoding.payloads.contains(&variant) => {
                    let allowed = encoding.modifiers;
                    let (key, modifiers) =
                        key_press_parts(checker, &payload_path, payload, allowed, false)?;
                    Action::key_press(key, modifiers)
                }
                other => match encoding.tags.iter().find(|t| **t == other) {
                    Some(tag) => Err(ActionError::UnexpectedPayload { variant: *tag }),
                    None => Err(ActionError::UnknownTag {
                        tag: other.to_string(),
                    }),
                },
            };
            match built {
                Ok(action) => Some(action),
                Err(e) => {
                    checker.action(payload_path, e);
                    None
                }
            }
        }
        other => {
            checker.wrong_type(path.clone(), "string or table", other);
            None
        }
    }
}
