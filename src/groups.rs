//! Group Reader
//!
//! Fetches group records with a live member count, conversation metrics,
//! and optional member rosters. The member count is computed at query time
//! as the number of membership rows with no departure timestamp; departed
//! members are retained in storage as historical records.

use std::time::Instant;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error};

use crate::db::Database;
use crate::error::Result;
use crate::metrics::record_query;
use crate::models::{ConversationMetrics, GroupMember, GroupRecord};
use crate::schema::{contacts, conversation_metrics, group_members, groups};

const GROUP_COLUMNS: &str = "g.jid, g.name, g.description, g.created_at, \
     COUNT(DISTINCT gm.member_jid) AS member_count, \
     cm.chat_jid, cm.last_message_date, cm.total_messages, cm.messages_sent, cm.messages_received";

fn map_group_row(row: &Row) -> rusqlite::Result<GroupRecord> {
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

    Ok(GroupRecord {
        jid: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        member_count: row.get(4)?,
        metrics,
        members: None,
    })
}

/// Fetch the active member roster for one group, super-admins first, then
/// admins, then ascending join time
fn fetch_active_members(conn: &Connection, group_jid: &str) -> Result<Vec<GroupMember>> {
    let query = format!(
        "SELECT gm.member_jid, c.full_name, c.push_name, gm.is_admin, gm.is_super_admin, gm.joined_at \
         FROM {} gm \
         LEFT JOIN {} c ON gm.{} = c.{} \
         WHERE gm.{} = ?1 AND gm.{} IS NULL \
         ORDER BY gm.{} DESC, gm.{} DESC, gm.{} ASC",
        group_members::TABLE,
        contacts::TABLE,
        group_members::MEMBER_JID,
        contacts::JID,
        group_members::GROUP_JID,
        group_members::LEFT_AT,
        group_members::IS_SUPER_ADMIN,
        group_members::IS_ADMIN,
        group_members::JOINED_AT,
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params![group_jid], |row| {
        Ok(GroupMember {
            member_jid: row.get(0)?,
            full_name: row.get(1)?,
            push_name: row.get(2)?,
            is_admin: row.get(3)?,
            is_super_admin: row.get(4)?,
            joined_at: row.get(5)?,
            left_at: None,
            added_by_jid: None,
        })
    })?;

    let mut members = Vec::new();
    for member in rows {
        members.push(member?);
    }
    Ok(members)
}

/// Fetch the full membership history for one group, active members before
/// departed ones, then by role, then ascending join time
fn fetch_all_members(conn: &Connection, group_jid: &str) -> Result<Vec<GroupMember>> {
    let query = format!(
        "SELECT gm.member_jid, c.full_name, c.push_name, gm.is_admin, gm.is_super_admin, \
         gm.joined_at, gm.left_at, gm.added_by_jid \
         FROM {} gm \
         LEFT JOIN {} c ON gm.{} = c.{} \
         WHERE gm.{} = ?1 \
         ORDER BY gm.{} IS NULL DESC, gm.{} DESC, gm.{} DESC, gm.{} ASC",
        group_members::TABLE,
        contacts::TABLE,
        group_members::MEMBER_JID,
        contacts::JID,
        group_members::GROUP_JID,
        group_members::LEFT_AT,
        group_members::IS_SUPER_ADMIN,
        group_members::IS_ADMIN,
        group_members::JOINED_AT,
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params![group_jid], |row| {
        Ok(GroupMember {
            member_jid: row.get(0)?,
            full_name: row.get(1)?,
            push_name: row.get(2)?,
            is_admin: row.get(3)?,
            is_super_admin: row.get(4)?,
            joined_at: row.get(5)?,
            left_at: row.get(6)?,
            added_by_jid: row.get(7)?,
        })
    })?;

    let mut members = Vec::new();
    for member in rows {
        members.push(member?);
    }
    Ok(members)
}

impl Database {
    /// Get all groups, most recently active first.
    ///
    /// Groups with no conversation activity sort last. When
    /// `include_members` is set, each returned group carries its roster of
    /// currently active members. Storage failure degrades to an empty list.
    #[must_use]
    pub fn list_groups(&self, include_members: bool, limit: i64, offset: i64) -> Vec<GroupRecord> {
        let started = Instant::now();
        match self.try_list_groups(include_members, limit, offset) {
            Ok(records) => {
                record_query("list_groups", started.elapsed(), true);
                debug!(count = records.len(), limit, offset, "listed groups");
                records
            }
            Err(e) => {
                record_query("list_groups", started.elapsed(), false);
                error!(error = %e, "list_groups failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn try_list_groups(
        &self,
        include_members: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GroupRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {GROUP_COLUMNS} \
             FROM {} g \
             LEFT JOIN {} gm ON g.{} = gm.{} AND gm.{} IS NULL \
             LEFT JOIN {} cm ON g.{} = cm.{} \
             GROUP BY g.{} \
             ORDER BY cm.{} DESC NULLS LAST \
             LIMIT ?1 OFFSET ?2",
            groups::TABLE,
            group_members::TABLE,
            groups::JID,
            group_members::GROUP_JID,
            group_members::LEFT_AT,
            conversation_metrics::TABLE,
            groups::JID,
            conversation_metrics::CHAT_JID,
            groups::JID,
            conversation_metrics::LAST_MESSAGE_DATE,
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![limit, offset], map_group_row)?;

        let mut results = Vec::new();
        for record in rows {
            let mut record = record?;
            if include_members {
                record.members = Some(fetch_active_members(&conn, &record.jid)?);
            }
            results.push(record);
        }

        Ok(results)
    }

    /// Get a single group by JID.
    ///
    /// When `include_members` is set the roster covers the full membership
    /// history: active members first, then departed ones, each cohort
    /// ordered super-admins, admins, then ascending join time. Returns
    /// `None` both when no such group exists and when storage is
    /// unavailable (the failure is logged).
    #[must_use]
    pub fn get_group_info(&self, jid: &str, include_members: bool) -> Option<GroupRecord> {
        let started = Instant::now();
        match self.try_get_group_info(jid, include_members) {
            Ok(group) => {
                record_query("get_group_info", started.elapsed(), true);
                group
            }
            Err(e) => {
                record_query("get_group_info", started.elapsed(), false);
                error!(error = %e, jid, "get_group_info failed");
                None
            }
        }
    }

    fn try_get_group_info(&self, jid: &str, include_members: bool) -> Result<Option<GroupRecord>> {
        let conn = self.get_connection()?;

        let query = format!(
            "SELECT {GROUP_COLUMNS} \
             FROM {} g \
             LEFT JOIN {} gm ON g.{} = gm.{} AND gm.{} IS NULL \
             LEFT JOIN {} cm ON g.{} = cm.{} \
             WHERE g.{} = ?1 \
             GROUP BY g.{}",
            groups::TABLE,
            group_members::TABLE,
            groups::JID,
            group_members::GROUP_JID,
            group_members::LEFT_AT,
            conversation_metrics::TABLE,
            groups::JID,
            conversation_metrics::CHAT_JID,
            groups::JID,
            groups::JID,
        );

        let group = conn
            .query_row(&query, params![jid], map_group_row)
            .optional()?;

        let Some(mut group) = group else {
            return Ok(None);
        };

        if include_members {
            group.members = Some(fetch_all_members(&conn, jid)?);
        }

        Ok(Some(group))
    }
}
