use tempfile::TempDir;
use wa_directory::db::Database;
use wa_directory::models::NewTrackedTopic;

fn test_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = Database::new(&db_path.display().to_string()).expect("Failed to create database");
    (dir, db)
}

fn insert_topic(db: &Database, chat_jid: &str, keyword: &str, mentions: i64, score: f64) {
    let conn = db.get_connection().expect("Failed to get connection");
    conn.execute(
        "INSERT OR IGNORE INTO chats (jid, name) VALUES (?1, ?1)",
        rusqlite::params![chat_jid],
    )
    .expect("Failed to insert chat");
    conn.execute(
        "INSERT INTO conversation_topics \
         (chat_jid, keyword, mention_count, importance_score, last_mentioned) \
         VALUES (?1, ?2, ?3, ?4, datetime('now', '-1 days'))",
        rusqlite::params![chat_jid, keyword, mentions, score],
    )
    .expect("Failed to insert topic");
}

#[test]
fn test_list_topics_filters_low_mention_counts() {
    let (_dir, db) = test_db();

    insert_topic(&db, "g1@g.us", "hiking", 5, 0.8);
    insert_topic(&db, "g1@g.us", "weather", 1, 0.9);

    let topics = db.list_topics(None, None, 50, 2);

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].keyword, "hiking");
}

#[test]
fn test_list_topics_scopes_to_chat() {
    let (_dir, db) = test_db();

    insert_topic(&db, "g1@g.us", "hiking", 5, 0.8);
    insert_topic(&db, "g2@g.us", "cooking", 5, 0.8);

    let topics = db.list_topics(Some("g1@g.us"), None, 50, 1);

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].chat_jid, "g1@g.us");
}

#[test]
fn test_list_topics_keyword_filter_is_substring_match() {
    let (_dir, db) = test_db();

    insert_topic(&db, "g1@g.us", "hiking trip", 5, 0.8);
    insert_topic(&db, "g1@g.us", "day hike", 4, 0.7);
    insert_topic(&db, "g1@g.us", "cooking", 6, 0.9);

    let topics = db.list_topics(None, Some("hik"), 50, 1);

    assert_eq!(topics.len(), 2);
    assert!(topics.iter().all(|t| t.keyword.contains("hik")));
}

#[test]
fn test_list_topics_orders_by_score_then_mentions() {
    let (_dir, db) = test_db();

    insert_topic(&db, "g1@g.us", "low", 9, 0.2);
    insert_topic(&db, "g1@g.us", "high", 3, 0.9);
    insert_topic(&db, "g1@g.us", "high-busy", 7, 0.9);

    let topics = db.list_topics(None, None, 50, 1);
    let keywords: Vec<&str> = topics.iter().map(|t| t.keyword.as_str()).collect();

    assert_eq!(keywords, vec!["high-busy", "high", "low"]);
}

#[test]
fn test_add_tracked_topic_reports_new_id() {
    let (_dir, db) = test_db();

    let topic = NewTrackedTopic::new("rust");
    let outcome = db.add_tracked_topic(&topic);

    assert!(outcome.success);
    assert_eq!(outcome.message, "Added topic: rust");
    assert!(outcome.id.is_some());

    let tracked = db.list_tracked_topics();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].keyword, "rust");
    assert_eq!(tracked[0].importance, 1.0);
}

#[test]
fn test_add_tracked_topic_rejects_duplicate_keyword() {
    let (_dir, db) = test_db();

    let topic = NewTrackedTopic::new("rust");
    assert!(db.add_tracked_topic(&topic).success);

    let outcome = db.add_tracked_topic(&topic);

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Topic 'rust' already exists");
    assert!(outcome.id.is_none());

    let tracked = db.list_tracked_topics();
    assert_eq!(tracked.len(), 1);
}

#[test]
fn test_add_tracked_topic_rejects_empty_keyword() {
    let (_dir, db) = test_db();

    let topic = NewTrackedTopic::new("");
    let outcome = db.add_tracked_topic(&topic);

    assert!(!outcome.success);
    assert!(outcome.id.is_none());
    assert!(db.list_tracked_topics().is_empty());
}

#[test]
fn test_add_tracked_topic_accepts_unusual_importance() {
    let (_dir, db) = test_db();

    let mut topic = NewTrackedTopic::new("moonshot");
    topic.importance = 42.0;

    let outcome = db.add_tracked_topic(&topic);

    assert!(outcome.success);
    let tracked = db.list_tracked_topics();
    assert_eq!(tracked[0].importance, 42.0);
}

#[test]
fn test_list_tracked_topics_orders_by_importance_then_keyword() {
    let (_dir, db) = test_db();

    let mut a = NewTrackedTopic::new("zebra");
    a.importance = 2.0;
    let mut b = NewTrackedTopic::new("apple");
    b.importance = 2.0;
    let c = NewTrackedTopic::new("minor");

    assert!(db.add_tracked_topic(&a).success);
    assert!(db.add_tracked_topic(&b).success);
    assert!(db.add_tracked_topic(&c).success);

    let tracked = db.list_tracked_topics();
    let keywords: Vec<&str> = tracked.iter().map(|t| t.keyword.as_str()).collect();

    assert_eq!(keywords, vec!["apple", "zebra", "minor"]);
}

#[test]
fn test_add_tracked_topic_stores_optional_fields() {
    let (_dir, db) = test_db();

    let mut topic = NewTrackedTopic::new("marathon");
    topic.category = Some("fitness".to_string());
    topic.notify_on_mention = true;
    topic.notes = Some("training plan chatter".to_string());

    assert!(db.add_tracked_topic(&topic).success);

    let tracked = db.list_tracked_topics();
    assert_eq!(tracked[0].category.as_deref(), Some("fitness"));
    assert!(tracked[0].notify_on_mention);
    assert_eq!(tracked[0].notes.as_deref(), Some("training plan chatter"));
}
