use tempfile::TempDir;
use wa_directory::db::Database;
use wa_directory::models::NewTrackedTopic;

fn test_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = Database::new(&db_path.display().to_string()).expect("Failed to create database");
    (dir, db)
}

fn insert_chat(db: &Database, jid: &str, name: &str) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO chats (jid, name) VALUES (?1, ?2)",
        rusqlite::params![jid, name],
    )
    .expect("Failed to insert chat");
}

fn track_topic(db: &Database, keyword: &str, category: &str, importance: f64) {
    let mut topic = NewTrackedTopic::new(keyword);
    topic.category = Some(category.to_string());
    topic.importance = importance;
    assert!(db.add_tracked_topic(&topic).success);
}

fn insert_alert(db: &Database, keyword: &str, chat_jid: &str, detected_at: &str, acked: bool) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO topic_alerts (topic_keyword, chat_jid, detected_at, acknowledged) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![keyword, chat_jid, detected_at, acked],
    )
    .expect("Failed to insert alert");
}

#[test]
fn test_list_topic_alerts_filters_by_acknowledged_state() {
    let (_dir, db) = test_db();

    insert_chat(&db, "g1@g.us", "Book Club");
    track_topic(&db, "hiking", "hobbies", 2.0);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-01 10:00:00", false);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-02 10:00:00", true);

    let pending = db.list_topic_alerts(false, 100);
    let seen = db.list_topic_alerts(true, 100);

    assert_eq!(pending.len(), 1);
    assert!(!pending[0].acknowledged);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].acknowledged);
}

#[test]
fn test_list_topic_alerts_joins_topic_and_chat_context() {
    let (_dir, db) = test_db();

    insert_chat(&db, "g1@g.us", "Book Club");
    track_topic(&db, "hiking", "hobbies", 2.5);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-01 10:00:00", false);

    let alerts = db.list_topic_alerts(false, 100);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].topic_keyword, "hiking");
    assert_eq!(alerts[0].chat_name.as_deref(), Some("Book Club"));
    assert_eq!(alerts[0].category.as_deref(), Some("hobbies"));
    assert_eq!(alerts[0].importance, 2.5);
}

#[test]
fn test_list_topic_alerts_skips_untracked_keywords() {
    let (_dir, db) = test_db();

    insert_chat(&db, "g1@g.us", "Book Club");
    track_topic(&db, "hiking", "hobbies", 1.0);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-01 10:00:00", false);
    insert_alert(&db, "removed-topic", "g1@g.us", "2024-03-02 10:00:00", false);

    let alerts = db.list_topic_alerts(false, 100);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].topic_keyword, "hiking");
}

#[test]
fn test_list_topic_alerts_skips_unknown_chats() {
    let (_dir, db) = test_db();

    insert_chat(&db, "g1@g.us", "Book Club");
    track_topic(&db, "hiking", "hobbies", 1.0);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-01 10:00:00", false);
    insert_alert(&db, "hiking", "ghost@g.us", "2024-03-02 10:00:00", false);

    let alerts = db.list_topic_alerts(false, 100);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].chat_jid, "g1@g.us");
}

#[test]
fn test_list_topic_alerts_newest_first_with_limit() {
    let (_dir, db) = test_db();

    insert_chat(&db, "g1@g.us", "Book Club");
    track_topic(&db, "hiking", "hobbies", 1.0);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-01 10:00:00", false);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-03 10:00:00", false);
    insert_alert(&db, "hiking", "g1@g.us", "2024-03-02 10:00:00", false);

    let alerts = db.list_topic_alerts(false, 2);

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].detected_at.to_string(), "2024-03-03 10:00:00");
    assert_eq!(alerts[1].detected_at.to_string(), "2024-03-02 10:00:00");
}
