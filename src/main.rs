use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};

use wa_directory::config::AppConfig;
use wa_directory::db::Database;
use wa_directory::logging::{init_logging, OperationTimer};
use wa_directory::models::NewTrackedTopic;
use wa_directory::validation::InputValidator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts with conversation metrics and insights
    Contacts {
        /// Maximum number of contacts to return
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short, long, default_value_t = 0)]
        offset: i64,

        /// Leave out conversation metrics
        #[arg(long)]
        no_metrics: bool,

        /// Leave out relationship insights
        #[arg(long)]
        no_insights: bool,
    },
    /// Show one contact by JID
    Contact {
        /// JID of the contact (e.g. 12345@s.whatsapp.net)
        jid: String,
    },
    /// List groups with live member counts
    Groups {
        /// Include the active member roster for each group
        #[arg(short, long)]
        members: bool,

        /// Maximum number of groups to return
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },
    /// Show one group by JID, including its full membership history
    Group {
        /// JID of the group (e.g. 12345@g.us)
        jid: String,

        /// Leave out the member roster
        #[arg(long)]
        no_members: bool,
    },
    /// List conversation topics mined from chats
    Topics {
        /// Filter by a specific chat JID
        #[arg(short, long)]
        chat_jid: Option<String>,

        /// Filter by keyword substring
        #[arg(short, long)]
        keyword: Option<String>,

        /// Maximum number of topics to return
        #[arg(short, long, default_value_t = 50)]
        limit: i64,

        /// Minimum mention count
        #[arg(short, long, default_value_t = 2)]
        min_mentions: i64,
    },
    /// List contacts with recent activity
    Active {
        /// Number of days to look back
        #[arg(short, long, default_value_t = 30)]
        days: i64,

        /// Maximum number of contacts to return
        #[arg(short, long, default_value_t = 100)]
        limit: i64,
    },
    /// List contacts without recent activity
    Dormant {
        /// Day threshold for dormancy
        #[arg(short, long, default_value_t = 90)]
        days: i64,

        /// Maximum number of contacts to return
        #[arg(short, long, default_value_t = 100)]
        limit: i64,
    },
    /// List user-tracked topics
    Tracked,
    /// Track a new topic of interest
    Track {
        /// The keyword or phrase to track
        keyword: String,

        /// Optional category (e.g. 'business', 'personal')
        #[arg(short, long)]
        category: Option<String>,

        /// Importance weight (0.0 to 10.0 by convention)
        #[arg(short, long, default_value_t = 1.0)]
        importance: f64,

        /// Create alerts when the topic is mentioned
        #[arg(short, long)]
        notify: bool,

        /// Optional notes about this topic
        #[arg(long)]
        notes: Option<String>,
    },
    /// List alerts for mentions of tracked topics
    Alerts {
        /// Show acknowledged alerts instead of new ones
        #[arg(short, long)]
        acknowledged: bool,

        /// Maximum number of alerts to return
        #[arg(short, long, default_value_t = 100)]
        limit: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(std::path::Path::new),
    )?;
    if let Err(e) = wa_directory::metrics::init() {
        debug!(error = %e, "metrics recorder already installed");
    }

    let database_url = config.get_database_url();
    InputValidator::validate_database_url(&database_url)?;
    let db = Database::with_pool_size(&database_url, config.database.max_connections)
        .context("Failed to open contact scanner database")?;
    info!(database_url, "connected to contact scanner store");

    run_command(&db, cli.command)
}

fn run_command(db: &Database, command: Commands) -> Result<()> {
    match command {
        Commands::Contacts {
            limit,
            offset,
            no_metrics,
            no_insights,
        } => {
            InputValidator::validate_limit(limit)?;
            InputValidator::validate_offset(offset)?;
            let timer = OperationTimer::new("contacts");
            let records = db.list_contacts(!no_metrics, !no_insights, limit, offset);
            timer.finish();
            print_json(&records)
        }
        Commands::Contact { jid } => {
            InputValidator::validate_jid(&jid)?;
            match db.get_contact(&jid) {
                Some(contact) => print_json(&contact),
                None => print_json(&json!({ "error": "Contact not found" })),
            }
        }
        Commands::Groups {
            members,
            limit,
            offset,
        } => {
            InputValidator::validate_limit(limit)?;
            InputValidator::validate_offset(offset)?;
            let timer = OperationTimer::new("groups");
            let records = db.list_groups(members, limit, offset);
            timer.finish();
            print_json(&records)
        }
        Commands::Group { jid, no_members } => {
            InputValidator::validate_jid(&jid)?;
            match db.get_group_info(&jid, !no_members) {
                Some(group) => print_json(&group),
                None => print_json(&json!({ "error": "Group not found" })),
            }
        }
        Commands::Topics {
            chat_jid,
            keyword,
            limit,
            min_mentions,
        } => {
            InputValidator::validate_limit(limit)?;
            let records =
                db.list_topics(chat_jid.as_deref(), keyword.as_deref(), limit, min_mentions);
            print_json(&records)
        }
        Commands::Active { days, limit } => {
            InputValidator::validate_days(days)?;
            InputValidator::validate_limit(limit)?;
            print_json(&db.list_active_contacts(days, limit))
        }
        Commands::Dormant { days, limit } => {
            InputValidator::validate_days(days)?;
            InputValidator::validate_limit(limit)?;
            print_json(&db.list_dormant_contacts(days, limit))
        }
        Commands::Tracked => print_json(&db.list_tracked_topics()),
        Commands::Track {
            keyword,
            category,
            importance,
            notify,
            notes,
        } => {
            let topic = NewTrackedTopic {
                keyword,
                category: category.map(|c| InputValidator::sanitize_text(&c)),
                importance,
                notify_on_mention: notify,
                notes: notes.map(|n| InputValidator::sanitize_text(&n)),
            };
            print_json(&db.add_tracked_topic(&topic))
        }
        Commands::Alerts {
            acknowledged,
            limit,
        } => {
            InputValidator::validate_limit(limit)?;
            print_json(&db.list_topic_alerts(acknowledged, limit))
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
