//! Transport encoding of a macro: `base64(percent-encode(JSON))`.
//!
//! The percent-encoding step uses the `encodeURIComponent` unreserved set so the
//! bot, which decodes with the matching browser primitives, sees identical bytes.

use crate::domain::entities::{ActionEntry, ActionKind, ActionValue, TopPosition, TopScope, TopType};
use crate::domain::errors::DomainError;
use crate::domain::validation::validate;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Serialize)]
struct WireMacro<'a> {
    trigger: &'a str,
    actions: Vec<WireAction<'a>>,
}

#[derive(Debug, Serialize)]
struct WireAction<'a> {
    #[serde(rename = "type")]
    kind: ActionKind,
    value: WireValue<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireValue<'a> {
    Text(&'a str),
    Top(WireTop),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTop {
    top_type: TopType,
    sub_type: Option<TopScope>,
    position: TopPosition,
    display: String,
}

/// Encoded macro, ready to be placed in a deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Compact JSON before transport encoding.
    pub json: String,
    /// Base64 of the percent-encoded JSON.
    pub payload: String,
}

/// Validates, then serializes and encodes. Entries are reduced to `{type, value}`.
pub fn encode(trigger: &str, actions: &[ActionEntry]) -> Result<EncodedPayload, DomainError> {
    validate(trigger, actions)?;

    let wire = WireMacro {
        trigger,
        actions: actions
            .iter()
            .map(wire_action)
            .collect::<Result<_, _>>()?,
    };
    let json = serde_json::to_string(&wire).map_err(|e| DomainError::Encoding(e.to_string()))?;
    let escaped = utf8_percent_encode(&json, URI_COMPONENT).to_string();
    let payload = STANDARD.encode(escaped.as_bytes());

    Ok(EncodedPayload { json, payload })
}

fn wire_action(entry: &ActionEntry) -> Result<WireAction<'_>, DomainError> {
    // Validation has already run; a missing field here is an internal inconsistency.
    let incomplete = || DomainError::Encoding(format!("action {} is incomplete", entry.id));
    let kind = entry.kind.ok_or_else(incomplete)?;
    let value = match &entry.value {
        ActionValue::Empty => WireValue::Text(""),
        ActionValue::Text(s) => WireValue::Text(s),
        ActionValue::Placeholder(p) => WireValue::Text(p.literal()),
        ActionValue::Top(sel) => WireValue::Top(WireTop {
            top_type: sel.top_type.ok_or_else(incomplete)?,
            sub_type: sel.sub_type,
            position: sel.position.ok_or_else(incomplete)?,
            display: sel.display().ok_or_else(incomplete)?,
        }),
    };
    Ok(WireAction { kind, value })
}
