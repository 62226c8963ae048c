//! Conversation turns exchanged with `generateContent`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Caller-supplied input
    User,
    /// Model output, including function calls
    Model,
    /// Result of a function the model called
    Function,
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Ordered parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Author of the turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Content {
    /// A user turn holding a single text part
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
            role: Some(Role::User),
        }
    }

    /// A model turn echoing the parts the model returned
    #[must_use]
    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            parts,
            role: Some(Role::Model),
        }
    }

    /// A function turn carrying one function result
    #[must_use]
    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            parts: vec![Part::function_response(response)],
            role: Some(Role::Function),
        }
    }
}

/// A fragment of a turn: text, a function call, or a function result
///
/// Gemini encodes the variant by which key is present, so each is optional here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Function invocation requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// Function result sent back to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Keys this client does not model (`thoughtSignature`, `inlineData`, ...), echoed
    /// back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Part {
    /// A text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A function-call part
    #[must_use]
    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Self::default()
        }
    }

    /// A function-response part
    #[must_use]
    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Self::default()
        }
    }
}

/// Function invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the declared function
    pub name: String,
    /// Arguments, absent when the model supplied none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
    /// Keys this client does not model (e.g. `id`), echoed back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionCall {
    /// Creates a function call with the given arguments
    #[must_use]
    pub fn new(name: impl Into<String>, args: Option<Map<String, Value>>) -> Self {
        Self {
            name: name.into(),
            args,
            extra: Map::new(),
        }
    }
}

/// Function result returned to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Name of the function that produced the result
    pub name: String,
    /// Result payload
    pub response: FunctionResponseBody,
}

/// Payload of a [`FunctionResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponseBody {
    /// Name of the function that produced the result
    pub name: String,
    /// Value returned by the function
    pub content: Value,
}

impl FunctionResponse {
    /// Pairs a function name with its result
    #[must_use]
    pub fn new(name: impl Into<String>, content: Value) -> Self {
        let name = name.into();
        Self {
            response: FunctionResponseBody {
                name: name.clone(),
                content,
            },
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_serializes_only_present_key() {
        let v = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(v, json!({ "text": "hi" }));

        let call = FunctionCall::new("customType_number", None);
        let v = serde_json::to_value(Part::function_call(call)).unwrap();
        assert_eq!(v, json!({ "functionCall": { "name": "customType_number" } }));
    }

    #[test]
    fn function_response_turn_shape() {
        let turn = Content::function_response(FunctionResponse::new("lookup", json!(42)));
        let v = serde_json::to_value(turn).unwrap();
        assert_eq!(
            v,
            json!({
                "parts": [{
                    "functionResponse": {
                        "name": "lookup",
                        "response": { "name": "lookup", "content": 42 }
                    }
                }],
                "role": "function"
            })
        );
    }

    #[test]
    fn function_call_part_deserializes() {
        let part: Part = serde_json::from_value(json!({
            "functionCall": { "name": "customType_array", "args": { "items": [1, 2] } }
        }))
        .unwrap();

        let call = part.function_call.unwrap();
        assert_eq!(call.name, "customType_array");
        assert_eq!(call.args.unwrap()["items"], json!([1, 2]));
        assert!(part.text.is_none());
    }

    #[test]
    fn unmodeled_keys_round_trip() {
        let raw = json!({
            "functionCall": { "name": "ping", "args": {}, "id": "call-1" },
            "thoughtSignature": "SIG123"
        });
        let part: Part = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(part.extra["thoughtSignature"], "SIG123");
        assert_eq!(part.function_call.as_ref().unwrap().extra["id"], "call-1");
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }
}
