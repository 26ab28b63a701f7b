//! Alert Reader
//!
//! Read-only access to alerts generated when a chat message mentions a
//! tracked topic. Alerts are created and acknowledged elsewhere; this
//! service only lists them. Inner joins to the tracked topic and the chat
//! mean an alert whose topic or chat no longer exists is silently dropped.

use std::time::Instant;

use rusqlite::params;
use tracing::{debug, error};

use crate::db::Database;
use crate::error::Result;
use crate::metrics::record_query;
use crate::models::AlertRecord;
use crate::schema::{chats, interesting_topics, topic_alerts};

impl Database {
    /// Get topic alerts filtered by acknowledgement state, newest first.
    ///
    /// Each alert carries the tracked topic's category and importance and
    /// the chat's display name. Storage failure degrades to an empty list.
    #[must_use]
    pub fn list_topic_alerts(&self, acknowledged: bool, limit: i64) -> Vec<AlertRecord> {
        let started = Instant::now();
        match self.try_list_topic_alerts(acknowledged, limit) {
            Ok(records) => {
                record_query("list_topic_alerts", started.elapsed(), true);
                debug!(count = records.len(), acknowledged, "listed topic alerts");
                records
            }
            Err(e) => {
                record_query("list_topic_alerts", started.elapsed(), false);
                error!(error = %e, "list_topic_alerts failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_topic_alerts(&self, acknowledged: bool, limit: i64) -> Result<Vec<AlertRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT ta.id, ta.topic_keyword, ta.chat_jid, c.{}, it.{}, it.{}, \
             ta.detected_at, ta.acknowledged \
             FROM {} ta \
             JOIN {} it ON ta.{} = it.{} \
             JOIN {} c ON ta.{} = c.{} \
             WHERE ta.{} = ?1 \
             ORDER BY ta.{} DESC \
             LIMIT ?2",
            chats::NAME,
            interesting_topics::CATEGORY,
            interesting_topics::IMPORTANCE,
            topic_alerts::TABLE,
            interesting_topics::TABLE,
            topic_alerts::TOPIC_KEYWORD,
            interesting_topics::KEYWORD,
            chats::TABLE,
            topic_alerts::CHAT_JID,
            chats::JID,
            topic_alerts::ACKNOWLEDGED,
            topic_alerts::DETECTED_AT,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![acknowledged, limit], |row| {
            Ok(AlertRecord {
                id: row.get(0)?,
                topic_keyword: row.get(1)?,
                chat_jid: row.get(2)?,
                chat_name: row.get(3)?,
                category: row.get(4)?,
                importance: row.get(5)?,
                detected_at: row.get(6)?,
                acknowledged: row.get(7)?,
            })
        })?;

        let mut results = Vec::new();
        for record in rows {
            results.push(record?);
        }

        Ok(results)
    }
}
