//! Data models for the directory query layer
//!
//! Every entity in the contact scanner store gets an explicit record type
//! with a deterministic column-to-field mapping. Columns that come from a
//! LEFT JOIN map to `Option` fields so "no activity yet" stays distinct
//! from "zero activity".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A contact enriched with optional conversation metrics and insights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Unique JID of the contact (e.g. `"12345@s.whatsapp.net"`)
    pub jid: String,
    /// Full display name
    pub full_name: Option<String>,
    /// Push name reported by the contact's device
    pub push_name: Option<String>,
    /// When the contact was first seen by the scanner
    pub first_seen: Option<NaiveDateTime>,
    /// When the contact row was last updated
    pub last_updated: Option<NaiveDateTime>,
    /// Conversation metrics for the direct chat, if any exist
    pub metrics: Option<ConversationMetrics>,
    /// Derived relationship insight, if one has been computed
    pub insight: Option<ContactInsight>,
    /// Days elapsed since the last message; populated by the dormant
    /// contact query only
    pub days_since_last_message: Option<f64>,
}

/// Aggregated message counts and recency for one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMetrics {
    /// Timestamp of the most recent message in the chat
    pub last_message_date: Option<NaiveDateTime>,
    /// Total message count
    pub total_messages: i64,
    /// Messages sent by the account owner
    pub messages_sent: i64,
    /// Messages received from others
    pub messages_received: i64,
}

/// Derived relationship signals for one contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInsight {
    /// Connection strength score
    pub connection_strength: Option<f64>,
    /// Relationship status label (e.g. "close", "fading")
    pub relationship_status: Option<String>,
    /// Days since the last contact, as computed by the scanner
    pub days_since_last_contact: Option<i64>,
    /// Number of groups shared with the account owner
    pub mutual_group_count: Option<i64>,
}

/// A group enriched with a live member count and optional roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Unique JID of the group (e.g. `"12345@g.us"`)
    pub jid: String,
    /// Group name
    pub name: Option<String>,
    /// Group description
    pub description: Option<String>,
    /// Group creation timestamp
    pub created_at: Option<NaiveDateTime>,
    /// Count of memberships with no departure timestamp, computed at
    /// query time
    pub member_count: i64,
    /// Conversation metrics for the group chat, if any exist
    pub metrics: Option<ConversationMetrics>,
    /// Member roster; `None` when not requested
    pub members: Option<Vec<GroupMember>>,
}

/// One group membership row joined to the member's contact names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    /// JID of the member
    pub member_jid: String,
    /// Member's full display name, when known
    pub full_name: Option<String>,
    /// Member's push name, when known
    pub push_name: Option<String>,
    /// Admin role flag
    pub is_admin: bool,
    /// Super-admin role flag
    pub is_super_admin: bool,
    /// When the member joined
    pub joined_at: Option<NaiveDateTime>,
    /// When the member left; `None` for active members
    pub left_at: Option<NaiveDateTime>,
    /// JID of whoever added this member, when recorded
    pub added_by_jid: Option<String>,
}

impl GroupMember {
    /// True if the member has not left the group
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.left_at.is_none()
    }
}

/// A topic keyword mined from one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Chat the topic was mined from
    pub chat_jid: String,
    /// Display name of that chat
    pub chat_name: Option<String>,
    /// The mined keyword
    pub keyword: String,
    /// How many times the keyword was mentioned
    pub mention_count: i64,
    /// Importance score assigned by the miner
    pub importance_score: f64,
    /// When the keyword was last mentioned
    pub last_mentioned: Option<NaiveDateTime>,
}

/// A user-declared keyword being tracked across chats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedTopic {
    /// Database primary key
    pub id: i64,
    /// The tracked keyword (unique)
    pub keyword: String,
    /// Free-text category (e.g. "business", "personal")
    pub category: Option<String>,
    /// Importance weight; 0.0-10.0 by convention, not enforced
    pub importance: f64,
    /// Whether mentions should generate alerts
    pub notify_on_mention: bool,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the topic was added
    pub created_at: Option<NaiveDateTime>,
}

/// Data for tracking a new topic
#[derive(Debug, Clone)]
pub struct NewTrackedTopic {
    /// The keyword to track
    pub keyword: String,
    /// Free-text category
    pub category: Option<String>,
    /// Importance weight; 0.0-10.0 by convention, not enforced
    pub importance: f64,
    /// Whether mentions should generate alerts
    pub notify_on_mention: bool,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewTrackedTopic {
    /// Create a new tracked topic request with default weighting
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            category: None,
            importance: 1.0,
            notify_on_mention: false,
            notes: None,
        }
    }
}

/// Structured result of a topic insert; never a raised fault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackTopicOutcome {
    /// Whether the insert succeeded
    pub success: bool,
    /// Human-readable status message
    pub message: String,
    /// Identifier of the new row on success
    pub id: Option<i64>,
}

impl TrackTopicOutcome {
    /// Successful insert with the newly assigned row id
    #[must_use]
    pub fn added(keyword: &str, id: i64) -> Self {
        Self {
            success: true,
            message: format!("Added topic: {keyword}"),
            id: Some(id),
        }
    }

    /// Failed insert with a descriptive message
    #[must_use]
    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            id: None,
        }
    }
}

/// An alert raised when a tracked topic was mentioned in a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Database primary key
    pub id: i64,
    /// Keyword of the tracked topic that matched
    pub topic_keyword: String,
    /// Chat the mention occurred in
    pub chat_jid: String,
    /// Display name of that chat
    pub chat_name: Option<String>,
    /// Category of the tracked topic
    pub category: Option<String>,
    /// Importance weight of the tracked topic
    pub importance: f64,
    /// When the mention was detected
    pub detected_at: NaiveDateTime,
    /// Whether the user has acknowledged the alert
    pub acknowledged: bool,
}
