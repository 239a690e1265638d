use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// A shared conversation as stored remotely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled Conversation")
    }

    pub fn display_model(&self) -> &str {
        non_blank(self.model.as_deref()).unwrap_or("Unknown Model")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            warn!("Ignoring unparseable created_at {raw:?}: {e}");
            None
        }
    }))
}

/// `messages` arrives as an array, as a string holding JSON, or as a single
/// message object.
fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(decoded) => messages_from_value(decoded),
            Err(e) => {
                warn!("Failed to parse messages string: {e}");
                Vec::new()
            }
        },
        other => messages_from_value(other),
    })
}

fn messages_from_value(value: Value) -> Vec<Message> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Message>(item) {
                Ok(message) => Some(message),
                Err(e) => {
                    warn!("Skipping malformed message: {e}");
                    None
                }
            })
            .collect(),
        Value::Object(_) => messages_from_value(Value::Array(vec![value])),
        Value::Null => Vec::new(),
        other => {
            warn!("Unexpected messages payload: {other}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(role: Role, content: &str) -> Message {
        Message {
            role,
            content: content.into(),
        }
    }

    #[test]
    fn messages_as_array() {
        let record: Conversation = serde_json::from_str(
            r#"{"id":"c1","created_at":"2025-03-01T10:00:00.123456+00:00","title":"T","model":"m",
                "messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"yo"}]}"#,
        )
        .unwrap();
        assert_eq!(
            record.messages,
            vec![message(Role::User, "hi"), message(Role::Assistant, "yo")]
        );
        assert!(record.created_at.is_some());
    }

    #[test]
    fn messages_as_json_string() {
        let record: Conversation = serde_json::from_str(
            r#"{"id":"c1","messages":"[{\"role\":\"system\",\"content\":\"s\"}]"}"#,
        )
        .unwrap();
        assert_eq!(record.messages, vec![message(Role::System, "s")]);
    }

    #[test]
    fn single_object_is_wrapped() {
        let record: Conversation =
            serde_json::from_str(r#"{"id":"c1","messages":{"role":"user","content":"only"}}"#)
                .unwrap();
        assert_eq!(record.messages, vec![message(Role::User, "only")]);
    }

    #[test]
    fn broken_string_yields_empty_list() {
        let record: Conversation =
            serde_json::from_str(r#"{"id":"c1","messages":"[{oops","created_at":"yesterday"}"#)
                .unwrap();
        assert!(record.messages.is_empty());
        assert_eq!(record.created_at, None);
    }

    #[test]
    fn display_fallbacks() {
        let record: Conversation =
            serde_json::from_str(r#"{"id":"c1","title":"  ","model":null}"#).unwrap();
        assert_eq!(record.display_title(), "Untitled Conversation");
        assert_eq!(record.display_model(), "Unknown Model");
    }
}
