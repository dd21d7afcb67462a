//! Loads a macro draft from a JSON file and replays it through a session.
//!
//! The draft has the payload's shape. A sentinel literal in the `value` of its
//! host kind becomes a placeholder insert; on other kinds it stays text.
//! A missing or `null` value leaves the action empty. `display` on top
//! queries is ignored (it is derived).

use crate::domain::{
    ActionKind, DomainError, Placeholder, TopPosition, TopScope, TopSelection, TopType,
};
use crate::usecases::MacroSession;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MacroDraft {
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub actions: Vec<DraftAction>,
}

#[derive(Debug, Deserialize)]
pub struct DraftAction {
    #[serde(rename = "type", default)]
    pub kind: Option<ActionKind>,
    #[serde(default)]
    pub value: Option<DraftValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    Text(String),
    Top(DraftTop),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTop {
    #[serde(default)]
    pub top_type: Option<TopType>,
    #[serde(default)]
    pub sub_type: Option<TopScope>,
    #[serde(default)]
    pub position: Option<String>,
}

impl MacroDraft {
    pub fn from_json(s: &str) -> Result<Self, DomainError> {
        serde_json::from_str(s).map_err(|e| DomainError::Draft(format!("parse: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Draft(format!("read {}: {}", path.display(), e)))?;
        let draft = Self::from_json(&raw)?;
        info!(path = %path.display(), actions = draft.actions.len(), "draft loaded");
        Ok(draft)
    }

    /// Replays the draft as user input. Completeness is left to the validator,
    /// so an untyped action stays untyped and surfaces as a missing type.
    pub fn apply(&self, session: &mut MacroSession) -> Result<(), DomainError> {
        session.set_trigger(&self.trigger);
        for (index, action) in self.actions.iter().enumerate() {
            let id = session.add_action().ok_or_else(|| {
                DomainError::Draft(format!("action {} exceeds the action limit", index + 1))
            })?;
            let Some(kind) = action.kind else {
                continue;
            };
            session.set_action_type(id, Some(kind))?;

            match action.value.as_ref() {
                None => {}
                Some(DraftValue::Top(top)) if kind == ActionKind::GetTopPosition => {
                    let position = top
                        .position
                        .as_deref()
                        .map(str::parse::<TopPosition>)
                        .transpose()
                        .map_err(DomainError::InvalidPosition)?;
                    let selection = TopSelection {
                        top_type: top.top_type,
                        sub_type: top.sub_type,
                        position,
                    };
                    session.set_top_selection(id, selection)?;
                }
                Some(DraftValue::Top(_)) => {
                    return Err(DomainError::Draft(format!(
                        "action {} ({}) takes a text value",
                        index + 1,
                        kind
                    )));
                }
                Some(DraftValue::Text(text)) if text.is_empty() => {}
                Some(DraftValue::Text(_)) if kind == ActionKind::GetTopPosition => {
                    return Err(DomainError::Draft(format!(
                        "action {} (get_top_position) needs a topType/subType/position object",
                        index + 1
                    )));
                }
                Some(DraftValue::Text(text)) => match Placeholder::from_literal(text)
                    .filter(|p| p.host_kind() == kind)
                {
                    Some(placeholder) => session.insert_placeholder(id, placeholder)?,
                    None => session.set_action_value(id, text)?,
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ActionValue, BotLink, CascadePolicy, DEFAULT_BOT_URL, ValidationError,
    };

    fn session() -> MacroSession {
        MacroSession::new(
            BotLink::parse(DEFAULT_BOT_URL).unwrap(),
            CascadePolicy::AnyEnabler,
        )
    }

    #[test]
    fn test_apply_top_query_and_placeholder() {
        let draft = MacroDraft::from_json(
            r#"{
                "trigger": "ab",
                "actions": [
                    {"type": "get_top_position", "value": {"topType": "balance", "subType": null, "position": "{me}"}},
                    {"type": "robbery", "value": "{topresultID}"}
                ]
            }"#,
        )
        .unwrap();
        let mut s = session();
        draft.apply(&mut s).unwrap();

        assert_eq!(s.trigger(), "ab");
        assert_eq!(
            s.actions()[1].value,
            ActionValue::Placeholder(Placeholder::TopResultId)
        );
        let link = s.create_macro().unwrap();
        assert_eq!(link.action_count, 2);
    }

    #[test]
    fn test_apply_rejects_placeholder_without_enabler() {
        let draft = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [{"type": "send_message", "value": "{topresult}"}]}"#,
        )
        .unwrap();
        let mut s = session();
        assert!(matches!(
            draft.apply(&mut s),
            Err(DomainError::PlaceholderUnavailable { .. })
        ));
    }

    #[test]
    fn test_sentinel_text_on_other_kinds_stays_text() {
        let draft = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [
                {"type": "warn_user", "value": "{topresult}"},
                {"type": "send_message", "value": "{topresultID}"}
            ]}"#,
        )
        .unwrap();
        let mut s = session();
        draft.apply(&mut s).unwrap();

        assert_eq!(s.actions()[0].value, ActionValue::Text("{topresult}".into()));
        assert_eq!(s.actions()[1].value, ActionValue::Text("{topresultID}".into()));
        assert!(s.create_macro().is_ok());
    }

    #[test]
    fn test_null_value_reads_as_missing() {
        let draft = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [
                {"type": "delete_message", "value": null},
                {"type": "kick_user", "value": null}
            ]}"#,
        )
        .unwrap();
        assert!(draft.actions.iter().all(|a| a.value.is_none()));

        let mut s = session();
        draft.apply(&mut s).unwrap();
        assert_eq!(s.actions()[0].value, ActionValue::Empty);
        assert!(matches!(
            s.create_macro(),
            Err(DomainError::Validation(ValidationError::MissingValue(1)))
        ));
    }

    #[test]
    fn test_apply_too_many_actions() {
        let draft = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [
                {"type": "delete_message"}, {"type": "delete_message"},
                {"type": "delete_message"}, {"type": "delete_message"}
            ]}"#,
        )
        .unwrap();
        let mut s = session();
        assert!(matches!(draft.apply(&mut s), Err(DomainError::Draft(_))));
        assert_eq!(s.actions().len(), 3);
    }

    #[test]
    fn test_untyped_action_surfaces_in_validation() {
        let draft = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [{"type": "kick_user", "value": "spam"}, {}]}"#,
        )
        .unwrap();
        let mut s = session();
        draft.apply(&mut s).unwrap();
        assert!(matches!(
            s.create_macro(),
            Err(DomainError::Validation(ValidationError::MissingType(1)))
        ));
    }

    #[test]
    fn test_bad_position_and_shape_errors() {
        let bad_position = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [{"type": "get_top_position", "value": {"topType": "level", "position": "0"}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            bad_position.apply(&mut session()),
            Err(DomainError::InvalidPosition(_))
        ));

        let wrong_shape = MacroDraft::from_json(
            r#"{"trigger": "ab", "actions": [{"type": "get_top_position", "value": "5"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            wrong_shape.apply(&mut session()),
            Err(DomainError::Draft(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("macro_forge_draft_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"trigger": "greet", "actions": [{"type": "send_message", "value": "hi"}]}"#,
        )
        .unwrap();
        let draft = MacroDraft::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(draft.trigger, "greet");
        assert_eq!(draft.actions.len(), 1);
        assert!(matches!(
            MacroDraft::load(path.with_extension("missing")),
            Err(DomainError::Draft(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            MacroDraft::from_json("{not json"),
            Err(DomainError::Draft(_))
        ));
    }
}
