//! Contact Reader
//!
//! Fetches contact records enriched with conversation metrics and derived
//! relationship insights. Metrics and insights are LEFT JOINed so contacts
//! with no conversation activity still appear; they sort last.

use std::time::Instant;

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, error};

use crate::db::Database;
use crate::error::Result;
use crate::metrics::record_query;
use crate::models::{ContactInsight, ContactRecord, ConversationMetrics};
use crate::schema::{contact_insights, contacts, conversation_metrics};

/// Shared SELECT column list for contact rows joined to metrics and insights.
///
/// The `cm.chat_jid` and `ci.contact_jid` columns act as presence markers:
/// when NULL the whole joined row is absent and the record's optional field
/// stays `None`.
const CONTACT_COLUMNS: &str = "c.jid, c.full_name, c.push_name, c.first_seen, c.last_updated, \
     cm.chat_jid, cm.last_message_date, cm.total_messages, cm.messages_sent, cm.messages_received, \
     ci.contact_jid, ci.connection_strength, ci.relationship_status, \
     ci.days_since_last_contact, ci.mutual_group_count";

/// Map one joined row to a [`ContactRecord`]
pub(crate) fn map_contact_row(row: &Row) -> rusqlite::Result<ContactRecord> {
    let metrics_key: Option<String> = row.get(5)?;
    let metrics = match metrics_key {
        Some(_) => Some(ConversationMetrics {
            last_message_date: row.get(6)?,
            total_messages: row.get::<_, Option<i64>>(7)?.unwrap_or(0),
            messages_sent: row.get::<_, Option<i64>>(8)?.unwrap_or(0),
            messages_received: row.get::<_, Option<i64>>(9)?.unwrap_or(0),
        }),
        None => None,
    };

    let insight_key: Option<String> = row.get(10)?;
    let insight = match insight_key {
        Some(_) => Some(ContactInsight {
            connection_strength: row.get(11)?,
            relationship_status: row.get(12)?,
            days_since_last_contact: row.get(13)?,
            mutual_group_count: row.get(14)?,
        }),
        None => None,
    };

    Ok(ContactRecord {
        jid: row.get(0)?,
        full_name: row.get(1)?,
        push_name: row.get(2)?,
        first_seen: row.get(3)?,
        last_updated: row.get(4)?,
        metrics,
        insight,
        days_since_last_message: None,
    })
}

impl Database {
    /// Get all contacts, most recently active first.
    ///
    /// Contacts with no conversation activity sort last. The include flags
    /// control whether the optional metric and insight fields are populated
    /// on the returned records. A storage failure degrades to an empty list
    /// rather than an error; callers that need to distinguish the two cases
    /// should use [`Database::get_contact`] per key.
    #[must_use]
    pub fn list_contacts(
        &self,
        include_metrics: bool,
        include_insights: bool,
        limit: i64,
        offset: i64,
    ) -> Vec<ContactRecord> {
        let started = Instant::now();
        match self.try_list_contacts(include_metrics, include_insights, limit, offset) {
            Ok(records) => {
                record_query("list_contacts", started.elapsed(), true);
                debug!(count = records.len(), limit, offset, "listed contacts");
                records
            }
            Err(e) => {
                record_query("list_contacts", started.elapsed(), false);
                error!(error = %e, "list_contacts failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_contacts(
        &self,
        include_metrics: bool,
        include_insights: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {CONTACT_COLUMNS} \
             FROM {} c \
             LEFT JOIN {} cm ON c.{} = cm.{} \
             LEFT JOIN {} ci ON c.{} = ci.{} \
             ORDER BY cm.{} DESC NULLS LAST \
             LIMIT ?1 OFFSET ?2",
            contacts::TABLE,
            conversation_metrics::TABLE,
            contacts::JID,
            conversation_metrics::CHAT_JID,
            contact_insights::TABLE,
            contacts::JID,
            contact_insights::CONTACT_JID,
            conversation_metrics::LAST_MESSAGE_DATE,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![limit, offset], map_contact_row)?;

        let mut results = Vec::new();
        for record in rows {
            let mut record = record?;
            if !include_metrics {
                record.metrics = None;
            }
            if !include_insights {
                record.insight = None;
            }
            results.push(record);
        }

        Ok(results)
    }

    /// Get a single contact by JID, with metrics and insights.
    ///
    /// Returns `None` both when no such contact exists and when storage is
    /// unavailable (the failure is logged); the two cases are not
    /// distinguishable through this operation.
    #[must_use]
    pub fn get_contact(&self, jid: &str) -> Option<ContactRecord> {
        let started = Instant::now();
        match self.try_get_contact(jid) {
            Ok(contact) => {
                record_query("get_contact", started.elapsed(), true);
                contact
            }
            Err(e) => {
                record_query("get_contact", started.elapsed(), false);
                error!(error = %e, jid, "get_contact failed");
                None
            }
        }
    }

    fn try_get_contact(&self, jid: &str) -> Result<Option<ContactRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {CONTACT_COLUMNS} \
             FROM {} c \
             LEFT JOIN {} cm ON c.{} = cm.{} \
             LEFT JOIN {} ci ON c.{} = ci.{} \
             WHERE c.{} = ?1",
            contacts::TABLE,
            conversation_metrics::TABLE,
            contacts::JID,
            conversation_metrics::CHAT_JID,
            contact_insights::TABLE,
            contacts::JID,
            contact_insights::CONTACT_JID,
            contacts::JID,
        );

        let contact = conn
            .query_row(&query, params![jid], map_contact_row)
            .optional()?;

        Ok(contact)
    }
}
