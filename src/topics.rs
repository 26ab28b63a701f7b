//! Topic Catalog
//!
//! Read access to conversation topics mined from chats, plus the one write
//! path this service owns: adding a user-tracked topic. Tracked topics are
//! never updated or deleted here; keyword uniqueness is enforced at insert
//! time by the store's UNIQUE constraint.

use std::time::Instant;

use rusqlite::{params, ErrorCode};
use tracing::{debug, error, warn};

use crate::db::Database;
use crate::error::{DirectoryError, Result};
use crate::metrics::record_query;
use crate::models::{NewTrackedTopic, TopicRecord, TrackTopicOutcome, TrackedTopic};
use crate::schema::{chats, conversation_topics, interesting_topics};
use crate::validation::InputValidator;

impl Database {
    /// Get mined conversation topics, most important first.
    ///
    /// `chat_jid` narrows to one chat (exact match); `keyword` is a
    /// substring match. Topics mentioned fewer than `min_mentions` times
    /// are excluded. Storage failure degrades to an empty list.
    #[must_use]
    pub fn list_topics(
        &self,
        chat_jid: Option<&str>,
        keyword: Option<&str>,
        limit: i64,
        min_mentions: i64,
    ) -> Vec<TopicRecord> {
        let started = Instant::now();
        match self.try_list_topics(chat_jid, keyword, limit, min_mentions) {
            Ok(records) => {
                record_query("list_topics", started.elapsed(), true);
                debug!(count = records.len(), min_mentions, "listed topics");
                records
            }
            Err(e) => {
                record_query("list_topics", started.elapsed(), false);
                error!(error = %e, "list_topics failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_topics(
        &self,
        chat_jid: Option<&str>,
        keyword: Option<&str>,
        limit: i64,
        min_mentions: i64,
    ) -> Result<Vec<TopicRecord>> {
        let conn = self.get_connection()?;

        // Base query plus optional predicate fragments
        let mut query = format!(
            "SELECT ct.chat_jid, c.{}, ct.keyword, ct.mention_count, ct.importance_score, ct.last_mentioned \
             FROM {} ct \
             JOIN {} c ON ct.{} = c.{} \
             WHERE ct.{} >= ?",
            chats::NAME,
            conversation_topics::TABLE,
            chats::TABLE,
            conversation_topics::CHAT_JID,
            chats::JID,
            conversation_topics::MENTION_COUNT,
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(min_mentions)];

        if let Some(chat_jid) = chat_jid {
            query.push_str(&format!(" AND ct.{} = ?", conversation_topics::CHAT_JID));
            params.push(Box::new(chat_jid.to_string()));
        }

        if let Some(keyword) = keyword {
            query.push_str(&format!(" AND ct.{} LIKE ?", conversation_topics::KEYWORD));
            params.push(Box::new(format!("%{keyword}%")));
        }

        query.push_str(&format!(
            " ORDER BY ct.{} DESC, ct.{} DESC LIMIT ?",
            conversation_topics::IMPORTANCE_SCORE,
            conversation_topics::MENTION_COUNT,
        ));
        params.push(Box::new(limit));

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(TopicRecord {
                chat_jid: row.get(0)?,
                chat_name: row.get(1)?,
                keyword: row.get(2)?,
                mention_count: row.get(3)?,
                importance_score: row.get(4)?,
                last_mentioned: row.get(5)?,
            })
        })?;

        let mut results = Vec::new();
        for record in rows {
            results.push(record?);
        }

        Ok(results)
    }

    /// Get all user-tracked topics, highest importance first, keyword as a
    /// tiebreak. Storage failure degrades to an empty list.
    #[must_use]
    pub fn list_tracked_topics(&self) -> Vec<TrackedTopic> {
        let started = Instant::now();
        match self.try_list_tracked_topics() {
            Ok(records) => {
                record_query("list_tracked_topics", started.elapsed(), true);
                records
            }
            Err(e) => {
                record_query("list_tracked_topics", started.elapsed(), false);
                error!(error = %e, "list_tracked_topics failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_tracked_topics(&self) -> Result<Vec<TrackedTopic>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT id, keyword, category, importance, notify_on_mention, notes, created_at \
             FROM {} \
             ORDER BY {} DESC, {} ASC",
            interesting_topics::TABLE,
            interesting_topics::IMPORTANCE,
            interesting_topics::KEYWORD,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], |row| {
            Ok(TrackedTopic {
                id: row.get(0)?,
                keyword: row.get(1)?,
                category: row.get(2)?,
                importance: row.get(3)?,
                notify_on_mention: row.get(4)?,
                notes: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;

        let mut results = Vec::new();
        for record in rows {
            results.push(record?);
        }

        Ok(results)
    }

    /// Track a new topic of interest.
    ///
    /// Always returns a structured outcome, never an error: a duplicate
    /// keyword reports a distinct failure message, any other storage
    /// failure a generic one. On success the outcome carries the newly
    /// assigned row id.
    #[must_use]
    pub fn add_tracked_topic(&self, topic: &NewTrackedTopic) -> TrackTopicOutcome {
        let started = Instant::now();

        if let Err(e) = InputValidator::validate_keyword(&topic.keyword) {
            record_query("add_tracked_topic", started.elapsed(), false);
            return TrackTopicOutcome::failed(e.to_string());
        }
        InputValidator::check_importance_range(topic.importance);

        let outcome = match self.try_add_tracked_topic(topic) {
            Ok(id) => TrackTopicOutcome::added(&topic.keyword, id),
            Err(DirectoryError::DuplicateTopic(keyword)) => {
                warn!(keyword, "attempted to track a duplicate topic");
                TrackTopicOutcome::failed(format!("Topic '{keyword}' already exists"))
            }
            Err(e) => {
                error!(error = %e, keyword = topic.keyword, "add_tracked_topic failed");
                TrackTopicOutcome::failed(format!("Database error: {e}"))
            }
        };

        record_query("add_tracked_topic", started.elapsed(), outcome.success);
        outcome
    }

    fn try_add_tracked_topic(&self, topic: &NewTrackedTopic) -> Result<i64> {
        let conn = self.get_connection()?;

        let query = format!(
            "INSERT INTO {} (keyword, category, importance, notify_on_mention, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            interesting_topics::TABLE,
        );

        let result = conn.execute(
            &query,
            params![
                topic.keyword,
                topic.category,
                topic.importance,
                topic.notify_on_mention,
                topic.notes
            ],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(DirectoryError::DuplicateTopic(topic.keyword.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
