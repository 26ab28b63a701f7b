//! Database schema definitions
//!
//! This module provides constants for the table and column names of the
//! contact scanner store consumed through rusqlite.

/// Contacts table schema
pub mod contacts {
    /// Table name
    pub const TABLE: &str = "contacts";
    /// JID primary key column
    pub const JID: &str = "jid";
    /// Full display name column
    pub const FULL_NAME: &str = "full_name";
    /// Push name column
    pub const PUSH_NAME: &str = "push_name";
    /// First seen timestamp column
    pub const FIRST_SEEN: &str = "first_seen";
    /// Last updated timestamp column
    pub const LAST_UPDATED: &str = "last_updated";
}

/// Chats table schema
pub mod chats {
    /// Table name
    pub const TABLE: &str = "chats";
    /// JID primary key column
    pub const JID: &str = "jid";
    /// Chat display name column
    pub const NAME: &str = "name";
}

/// Groups table schema
pub mod groups {
    /// Table name
    pub const TABLE: &str = "groups";
    /// JID primary key column
    pub const JID: &str = "jid";
    /// Group name column
    pub const NAME: &str = "name";
    /// Group description column
    pub const DESCRIPTION: &str = "description";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}

/// Group membership table schema
pub mod group_members {
    /// Table name
    pub const TABLE: &str = "group_members";
    /// Group JID column
    pub const GROUP_JID: &str = "group_jid";
    /// Member JID column
    pub const MEMBER_JID: &str = "member_jid";
    /// Admin role flag column
    pub const IS_ADMIN: &str = "is_admin";
    /// Super-admin role flag column
    pub const IS_SUPER_ADMIN: &str = "is_super_admin";
    /// Join timestamp column
    pub const JOINED_AT: &str = "joined_at";
    /// Departure timestamp column (NULL = currently active)
    pub const LEFT_AT: &str = "left_at";
    /// JID of the member who added this one
    pub const ADDED_BY_JID: &str = "added_by_jid";
}

/// Conversation metrics table schema
pub mod conversation_metrics {
    /// Table name
    pub const TABLE: &str = "conversation_metrics";
    /// Chat JID key column
    pub const CHAT_JID: &str = "chat_jid";
    /// Most recent message timestamp column
    pub const LAST_MESSAGE_DATE: &str = "last_message_date";
    /// Total message count column
    pub const TOTAL_MESSAGES: &str = "total_messages";
    /// Sent message count column
    pub const MESSAGES_SENT: &str = "messages_sent";
    /// Received message count column
    pub const MESSAGES_RECEIVED: &str = "messages_received";
}

/// Contact insights table schema
pub mod contact_insights {
    /// Table name
    pub const TABLE: &str = "contact_insights";
    /// Contact JID key column
    pub const CONTACT_JID: &str = "contact_jid";
    /// Connection strength score column
    pub const CONNECTION_STRENGTH: &str = "connection_strength";
    /// Relationship status label column
    pub const RELATIONSHIP_STATUS: &str = "relationship_status";
    /// Days since last contact column
    pub const DAYS_SINCE_LAST_CONTACT: &str = "days_since_last_contact";
    /// Shared group count column
    pub const MUTUAL_GROUP_COUNT: &str = "mutual_group_count";
}

/// Mined conversation topics table schema
pub mod conversation_topics {
    /// Table name
    pub const TABLE: &str = "conversation_topics";
    /// Chat JID column
    pub const CHAT_JID: &str = "chat_jid";
    /// Topic keyword column
    pub const KEYWORD: &str = "keyword";
    /// Mention count column
    pub const MENTION_COUNT: &str = "mention_count";
    /// Importance score column
    pub const IMPORTANCE_SCORE: &str = "importance_score";
    /// Last mention timestamp column
    pub const LAST_MENTIONED: &str = "last_mentioned";
}

/// User-tracked topics table schema
pub mod interesting_topics {
    /// Table name
    pub const TABLE: &str = "interesting_topics";
    /// Primary key column
    pub const ID: &str = "id";
    /// Unique keyword column
    pub const KEYWORD: &str = "keyword";
    /// Free-text category column
    pub const CATEGORY: &str = "category";
    /// Importance weight column
    pub const IMPORTANCE: &str = "importance";
    /// Alert-on-mention flag column
    pub const NOTIFY_ON_MENTION: &str = "notify_on_mention";
    /// Free-text notes column
    pub const NOTES: &str = "notes";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}

/// Topic alerts table schema
pub mod topic_alerts {
    /// Table name
    pub const TABLE: &str = "topic_alerts";
    /// Primary key column
    pub const ID: &str = "id";
    /// Tracked topic keyword column
    pub const TOPIC_KEYWORD: &str = "topic_keyword";
    /// Chat JID column
    pub const CHAT_JID: &str = "chat_jid";
    /// Detection timestamp column
    pub const DETECTED_AT: &str = "detected_at";
    /// Acknowledgement flag column
    pub const ACKNOWLEDGED: &str = "acknowledged";
}
