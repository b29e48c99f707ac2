//! Message domain types.
//!
//! A `Message` is owned by exactly one [`Identity`](crate::identity::Identity)
//! through `owner_id`. Messages are only ever created or deleted; there is no
//! update path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of message stored in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// Written by the session owner.
    UserMessage,
    /// Produced in reply to the owner.
    AssistantMessage,
    /// Injected by the application itself.
    SystemMessage,
}

impl MessageType {
    /// Every known message type, in declaration order.
    pub const ALL: [MessageType; 3] = [
        MessageType::UserMessage,
        MessageType::AssistantMessage,
        MessageType::SystemMessage,
    ];

    /// Wire/database name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::UserMessage => "USER_MESSAGE",
            MessageType::AssistantMessage => "ASSISTANT_MESSAGE",
            MessageType::SystemMessage => "SYSTEM_MESSAGE",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("invalid message type: '{s}'"))
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    /// Id of the owning identity.
    pub owner_id: i64,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub content: String,
    /// Sentiment score, roughly in [-1, 1]. Absent until scored.
    #[serde(default)]
    pub valence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a message; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub owner_id: i64,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub content: String,
    #[serde(default)]
    pub valence: Option<f64>,
}

/// Result of a delete statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub rows_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_from_str_is_exact() {
        assert_eq!(
            "USER_MESSAGE".parse::<MessageType>().unwrap(),
            MessageType::UserMessage
        );
        assert!("user_message".parse::<MessageType>().is_err());
        assert!("not-a-real-type".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_message_type_display_matches_serde() {
        for t in MessageType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{t}\""));
        }
    }

    #[test]
    fn test_message_serializes_type_field() {
        let msg = Message {
            id: 1,
            owner_id: 2,
            message_type: MessageType::UserMessage,
            content: "hello".to_string(),
            valence: Some(0.5),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "USER_MESSAGE");
        assert_eq!(value["owner_id"], 2);
    }

    #[test]
    fn test_new_message_valence_defaults_to_none() {
        let parsed: NewMessage =
            serde_json::from_str(r#"{"owner_id":3,"type":"SYSTEM_MESSAGE","content":"hi"}"#)
                .unwrap();
        assert_eq!(parsed.message_type, MessageType::SystemMessage);
        assert!(parsed.valence.is_none());
    }
}
