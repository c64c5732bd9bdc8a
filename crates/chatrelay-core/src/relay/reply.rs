//! Reply extraction from webhook response bodies.
//!
//! Workflow endpoints answer with loosely-shaped JSON objects. The reply
//! text is chosen by field precedence: `response`, then `message`, then the
//! whole object serialized. A body that is not an object is malformed.

use chatrelay_types::error::RelayError;
use chatrelay_types::relay::RemoteReply;
use serde_json::Value;

const REPLY_FIELDS: [&str; 2] = ["response", "message"];

/// Pick the bot reply out of a successful webhook response body.
///
/// Only non-empty string fields count. Arrays, bare strings, numbers and
/// `null` are rejected with [`RelayError::MalformedBody`].
pub fn extract_reply(body: &Value) -> Result<RemoteReply, RelayError> {
    let Some(object) = body.as_object() else {
        return Err(RelayError::MalformedBody(format!(
            "expected a JSON object, got {}",
            json_kind(body)
        )));
    };

    for field in REPLY_FIELDS {
        if let Some(text) = object.get(field).and_then(Value::as_str) {
            if !text.is_empty() {
                return Ok(RemoteReply::Text(text.to_string()));
            }
        }
    }
    Ok(RemoteReply::Raw(body.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_field_wins() {
        let body = json!({"response": "Brisket is $25/lb", "message": "ignored"});
        assert_eq!(
            extract_reply(&body).unwrap(),
            RemoteReply::Text("Brisket is $25/lb".to_string())
        );
    }

    #[test]
    fn test_message_field_is_second_choice() {
        let body = json!({"message": "We cater weddings"});
        assert_eq!(
            extract_reply(&body).unwrap(),
            RemoteReply::Text("We cater weddings".to_string())
        );
    }

    #[test]
    fn test_empty_response_falls_through_to_message() {
        let body = json!({"response": "", "message": "fallback text"});
        assert_eq!(
            extract_reply(&body).unwrap(),
            RemoteReply::Text("fallback text".to_string())
        );
    }

    #[test]
    fn test_non_string_fields_are_ignored() {
        let body = json!({"response": {"text": "nested"}, "message": 42});
        assert_eq!(extract_reply(&body).unwrap(), RemoteReply::Raw(body.to_string()));
    }

    #[test]
    fn test_unknown_shape_is_stringified() {
        let body = json!({"output": "hi", "ok": true});
        let RemoteReply::Raw(raw) = extract_reply(&body).unwrap() else {
            panic!("expected raw reply");
        };
        let reparsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(reparsed, body);
    }

    #[test]
    fn test_non_object_bodies_are_malformed() {
        for body in [
            json!([{"response": "inside array"}]),
            json!(["a"]),
            json!("hello"),
            json!(null),
            json!(7),
        ] {
            let err = extract_reply(&body).unwrap_err();
            assert!(matches!(err, RelayError::MalformedBody(_)), "{body} accepted");
        }
    }

    #[test]
    fn test_malformed_reason_names_the_kind() {
        let err = extract_reply(&json!("hello")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "webhook response is malformed: expected a JSON object, got a string"
        );
    }
}
