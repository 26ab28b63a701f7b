use tempfile::TempDir;
use wa_directory::db::Database;

fn test_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = Database::new(&db_path.display().to_string()).expect("Failed to create database");
    (dir, db)
}

fn insert_contact(db: &Database, jid: &str, full_name: &str) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO contacts (jid, full_name, push_name, first_seen, last_updated) \
         VALUES (?1, ?2, ?2, datetime('now', '-100 days'), datetime('now'))",
        rusqlite::params![jid, full_name],
    )
    .expect("Failed to insert contact");
}

fn insert_metrics(db: &Database, chat_jid: &str, last_message: &str, total: i64) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO conversation_metrics \
         (chat_jid, last_message_date, total_messages, messages_sent, messages_received) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![chat_jid, last_message, total, total / 2, total - total / 2],
    )
    .expect("Failed to insert metrics");
}

fn insert_insight(db: &Database, contact_jid: &str, strength: f64, status: &str) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO contact_insights \
         (contact_jid, connection_strength, relationship_status, days_since_last_contact, mutual_group_count) \
         VALUES (?1, ?2, ?3, 5, 2)",
        rusqlite::params![contact_jid, strength, status],
    )
    .expect("Failed to insert insight");
}

#[test]
fn test_list_contacts_orders_by_recency_with_inactive_last() {
    let (_dir, db) = test_db();

    insert_contact(&db, "old@s.whatsapp.net", "Old Timer");
    insert_contact(&db, "fresh@s.whatsapp.net", "Fresh Face");
    insert_contact(&db, "silent@s.whatsapp.net", "Silent Type");
    insert_metrics(&db, "old@s.whatsapp.net", "2024-01-05 10:00:00", 40);
    insert_metrics(&db, "fresh@s.whatsapp.net", "2024-03-20 09:30:00", 12);

    let contacts = db.list_contacts(true, true, 100, 0);
    let jids: Vec<&str> = contacts.iter().map(|c| c.jid.as_str()).collect();

    assert_eq!(
        jids,
        vec![
            "fresh@s.whatsapp.net",
            "old@s.whatsapp.net",
            "silent@s.whatsapp.net"
        ]
    );

    // The contact with no conversation activity keeps its optional fields
    // empty rather than reporting zeros.
    assert!(contacts[2].metrics.is_none());
}

#[test]
fn test_list_contacts_pagination_is_disjoint() {
    let (_dir, db) = test_db();

    for i in 0..6 {
        let jid = format!("c{i}@s.whatsapp.net");
        insert_contact(&db, &jid, &format!("Contact {i}"));
        insert_metrics(&db, &jid, &format!("2024-02-0{} 12:00:00", i + 1), 10);
    }

    let page_one = db.list_contacts(true, true, 3, 0);
    let page_two = db.list_contacts(true, true, 3, 3);

    assert_eq!(page_one.len(), 3);
    assert_eq!(page_two.len(), 3);

    for record in &page_one {
        assert!(
            !page_two.iter().any(|other| other.jid == record.jid),
            "pages must not overlap"
        );
    }
}

#[test]
fn test_list_contacts_respects_limit() {
    let (_dir, db) = test_db();

    for i in 0..5 {
        insert_contact(&db, &format!("c{i}@s.whatsapp.net"), "Someone");
    }

    assert_eq!(db.list_contacts(true, true, 2, 0).len(), 2);
    assert_eq!(db.list_contacts(true, true, 100, 0).len(), 5);
}

#[test]
fn test_list_contacts_include_flags() {
    let (_dir, db) = test_db();

    insert_contact(&db, "a@s.whatsapp.net", "Alice");
    insert_metrics(&db, "a@s.whatsapp.net", "2024-03-01 08:00:00", 20);
    insert_insight(&db, "a@s.whatsapp.net", 0.8, "close");

    let full = db.list_contacts(true, true, 10, 0);
    assert!(full[0].metrics.is_some());
    assert!(full[0].insight.is_some());

    let bare = db.list_contacts(false, false, 10, 0);
    assert!(bare[0].metrics.is_none());
    assert!(bare[0].insight.is_none());
}

#[test]
fn test_get_contact_returns_listed_contact() {
    let (_dir, db) = test_db();

    insert_contact(&db, "a@s.whatsapp.net", "Alice");
    insert_metrics(&db, "a@s.whatsapp.net", "2024-03-01 08:00:00", 20);
    insert_insight(&db, "a@s.whatsapp.net", 0.9, "close");

    let listed = db.list_contacts(true, true, 10, 0);
    let jid = &listed[0].jid;

    let contact = db.get_contact(jid).expect("contact should exist");
    assert_eq!(&contact.jid, jid);
    assert_eq!(contact.full_name.as_deref(), Some("Alice"));

    let metrics = contact.metrics.expect("metrics should be populated");
    assert_eq!(metrics.total_messages, 20);
    assert_eq!(metrics.messages_sent + metrics.messages_received, 20);

    let insight = contact.insight.expect("insight should be populated");
    assert_eq!(insight.relationship_status.as_deref(), Some("close"));
    assert_eq!(insight.mutual_group_count, Some(2));
}

#[test]
fn test_get_contact_absent_for_unknown_jid() {
    let (_dir, db) = test_db();

    insert_contact(&db, "a@s.whatsapp.net", "Alice");

    assert!(db.get_contact("nobody@s.whatsapp.net").is_none());
}

#[test]
fn test_contact_without_insight_keeps_insight_absent() {
    let (_dir, db) = test_db();

    insert_contact(&db, "a@s.whatsapp.net", "Alice");
    insert_metrics(&db, "a@s.whatsapp.net", "2024-03-01 08:00:00", 3);

    let contact = db.get_contact("a@s.whatsapp.net").expect("contact should exist");
    assert!(contact.metrics.is_some());
    assert!(contact.insight.is_none());
}
