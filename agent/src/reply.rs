//! Prompt construction and service reply decoding.
//!
//! The service is asked for a single JSON object in the serde shape of
//! [`Command`]. Whatever comes back is decoded into a [`ServiceReply`];
//! anything short of a fully-argued command of a known verb is
//! [`ServiceReply::Malformed`].

use serde_json::Value;
use stockroom_core::{Command, Verb};

/// Decoded service output.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    ValidCommand(Command),
    Malformed(String),
}

/// Builds the fixed instruction followed by the user's sentence.
pub fn build_prompt(text: &str) -> String {
    let verbs: Vec<&str> = Verb::ALL.iter().map(|verb| verb.as_str()).collect();
    format!(
        r#"You are a strict JSON command parser for an inventory app.
Allowed values for "type": {verbs}.
  - add: requires sku (string), name (string), quantity (integer), price (number)
  - subtract: requires sku (string), quantity (integer > 0)
  - update: requires sku (string) and at least one of name (string), quantity (integer), price (number)
  - delete: requires sku (string)
  - list: optional sku (string)
Keep the sku exactly as written by the user.
Respond with ONLY one minified JSON object with a "type" field and the needed fields. No extra text.
Input: {text}"#,
        verbs = verbs.join(", "),
    )
}

/// Decodes raw completion text.
///
/// Tolerates surrounding whitespace and a Markdown code fence (with or
/// without a language tag). Everything else must already be the exact
/// command object.
pub fn decode_reply(raw: &str) -> ServiceReply {
    let body = strip_code_fence(raw);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => return ServiceReply::Malformed(format!("reply is not JSON: {err}")),
    };

    let Some(verb) = value.get("type").and_then(Value::as_str) else {
        return ServiceReply::Malformed("reply has no string 'type' field".to_string());
    };
    if !Verb::ALL.iter().any(|known| known.as_str() == verb) {
        return ServiceReply::Malformed(format!("reply names unknown verb '{verb}'"));
    }

    let command: Command = match serde_json::from_value(value) {
        Ok(command) => command,
        Err(err) => return ServiceReply::Malformed(format!("reply arguments are invalid: {err}")),
    };
    if let Err(reason) = command.check_shape() {
        return ServiceReply::Malformed(reason);
    }
    ServiceReply::ValidCommand(command)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) if !rest[..newline].contains('{') => &rest[newline + 1..],
        _ => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
