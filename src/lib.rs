//! WA Directory - Contact Scanner Query Layer
//!
//! A Rust library exposing a WhatsApp contact scanner database (contacts,
//! groups, conversation topics, and alerts) through a small set of query
//! operations for a calling agent that has no direct database access.
//!
//! # Features
//!
//! - Contacts enriched with conversation metrics and relationship insights
//! - Groups with live member counts and optional rosters
//! - Mined conversation topics and a user-tracked topic list
//! - Active/dormant contact segmentation by message recency
//! - Alerts for mentions of tracked topics

/// Activity segmentation (active/dormant contacts)
pub mod activity;
/// Topic alert queries
pub mod alerts;
/// Configuration management
pub mod config;
/// Contact queries
pub mod contacts;
/// Database handle and connection pooling
pub mod db;
/// Error types
pub mod error;
/// Group and membership queries
pub mod groups;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and record structures
pub mod models;
/// Database schema definitions
pub mod schema;
/// Topic catalog queries and topic tracking
pub mod topics;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{DirectoryError, Result};
pub use models::{
    AlertRecord, ContactRecord, GroupRecord, NewTrackedTopic, TopicRecord, TrackTopicOutcome,
    TrackedTopic,
};
