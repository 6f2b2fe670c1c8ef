//! SQLite persistence layer for LoveCoach.
//!
//! This crate provides async repository functions for users, leads
//! (conversations), messages, coaching tips, the SMS log, AI workflows and
//! dashboard stats using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{conversation, models::NewConversation, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:lovecoach.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Start tracking a lead
//!     let lead = conversation::create_conversation(
//!         db.pool(),
//!         &NewConversation {
//!             user_id: 1,
//!             partner_name: "Dana".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!     println!("lead {} is in stage {}", lead.id, lead.relationship_stage.as_str());
//!
//!     Ok(())
//! }
//! ```

pub mod coaching_tip;
pub mod conversation;
pub mod error;
pub mod message;
pub mod models;
pub mod password;
pub mod seed;
pub mod sms_log;
pub mod stats;
pub mod user;
pub mod validation;
pub mod workflow;

pub use error::{DatabaseError, Result};
pub use models::{
    CoachingTip, Conversation, EmotionalTemperature, LeadStatus, Message, RelationshipStage,
    SmsLog, SmsStatus, SmsType, Stats, TipType, User, Workflow, WorkflowStatus,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// let db = database::Database::connect("sqlite:data/lovecoach.db?mode=rwc").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect with a custom pool size.
    ///
    /// In-memory databases are per connection, so `sqlite::memory:` needs a
    /// pool size of 1 to see its own migrations.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "Connected to database");

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
