//! Activity Segmenter
//!
//! Classifies contacts into active and dormant cohorts by recency of their
//! last message. Both classifications are recomputed against "now" at call
//! time, never persisted. Contacts without conversation metrics are excluded
//! entirely (INNER JOIN), so for a fixed threshold the two queries partition
//! the metrics-bearing contact population: `last_message_date >= cutoff` is
//! active, `< cutoff` is dormant.

use std::time::Instant;

use rusqlite::{params, Row};
use tracing::{debug, error};

use crate::contacts::map_contact_row;
use crate::db::Database;
use crate::error::Result;
use crate::metrics::record_query;
use crate::models::ContactRecord;
use crate::schema::{contact_insights, contacts, conversation_metrics};

const ACTIVITY_COLUMNS: &str = "c.jid, c.full_name, c.push_name, c.first_seen, c.last_updated, \
     cm.chat_jid, cm.last_message_date, cm.total_messages, cm.messages_sent, cm.messages_received, \
     ci.contact_jid, ci.connection_strength, ci.relationship_status, \
     ci.days_since_last_contact, ci.mutual_group_count";

/// Dormant rows carry one extra derived column after the shared list
fn map_dormant_row(row: &Row) -> rusqlite::Result<ContactRecord> {
    let mut record = map_contact_row(row)?;
    record.days_since_last_message = row.get(15)?;
    Ok(record)
}

impl Database {
    /// Get contacts whose last message is within the given number of days.
    ///
    /// Ordered by last activity descending. Storage failure degrades to an
    /// empty list.
    #[must_use]
    pub fn list_active_contacts(&self, days: i64, limit: i64) -> Vec<ContactRecord> {
        let started = Instant::now();
        match self.try_list_active_contacts(days, limit) {
            Ok(records) => {
                record_query("list_active_contacts", started.elapsed(), true);
                debug!(count = records.len(), days, "listed active contacts");
                records
            }
            Err(e) => {
                record_query("list_active_contacts", started.elapsed(), false);
                error!(error = %e, "list_active_contacts failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_active_contacts(&self, days: i64, limit: i64) -> Result<Vec<ContactRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} \
             FROM {} c \
             JOIN {} cm ON c.{} = cm.{} \
             LEFT JOIN {} ci ON c.{} = ci.{} \
             WHERE cm.{} >= datetime('now', ?1 || ' days') \
             ORDER BY cm.{} DESC \
             LIMIT ?2",
            contacts::TABLE,
            conversation_metrics::TABLE,
            contacts::JID,
            conversation_metrics::CHAT_JID,
            contact_insights::TABLE,
            contacts::JID,
            contact_insights::CONTACT_JID,
            conversation_metrics::LAST_MESSAGE_DATE,
            conversation_metrics::LAST_MESSAGE_DATE,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![format!("-{days}"), limit], map_contact_row)?;

        let mut results = Vec::new();
        for record in rows {
            results.push(record?);
        }

        Ok(results)
    }

    /// Get contacts with no message inside the given number of days.
    ///
    /// Each record carries a derived `days_since_last_message` value.
    /// Ordered by last activity ascending, so the longest-dormant contacts
    /// come first. Storage failure degrades to an empty list.
    #[must_use]
    pub fn list_dormant_contacts(&self, days: i64, limit: i64) -> Vec<ContactRecord> {
        let started = Instant::now();
        match self.try_list_dormant_contacts(days, limit) {
            Ok(records) => {
                record_query("list_dormant_contacts", started.elapsed(), true);
                debug!(count = records.len(), days, "listed dormant contacts");
                records
            }
            Err(e) => {
                record_query("list_dormant_contacts", started.elapsed(), false);
                error!(error = %e, "list_dormant_contacts failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_dormant_contacts(&self, days: i64, limit: i64) -> Result<Vec<ContactRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {ACTIVITY_COLUMNS}, \
             julianday('now') - julianday(cm.{}) AS days_since_last_message \
             FROM {} c \
             JOIN {} cm ON c.{} = cm.{} \
             LEFT JOIN {} ci ON c.{} = ci.{} \
             WHERE cm.{} < datetime('now', ?1 || ' days') \
             ORDER BY cm.{} ASC \
             LIMIT ?2",
            conversation_metrics::LAST_MESSAGE_DATE,
            contacts::TABLE,
            conversation_metrics::TABLE,
            contacts::JID,
            conversation_metrics::CHAT_JID,
            contact_insights::TABLE,
            contacts::JID,
            contact_insights::CONTACT_JID,
            conversation_metrics::LAST_MESSAGE_DATE,
            conversation_metrics::LAST_MESSAGE_DATE,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![format!("-{days}"), limit], map_dormant_row)?;

        let mut results = Vec::new();
        for record in rows {
            results.push(record?);
        }

        Ok(results)
    }
}
