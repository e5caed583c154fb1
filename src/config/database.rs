//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the database
//! schema is generated from the entity definitions without manual SQL.

use crate::entities::{Expense, LedgerEntry, ParticipantShare};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a default local `SQLite` file.
///
/// A `.env` file is loaded first if present, so deployments can keep the URL
/// out of the process environment.
#[must_use]
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/splitledger.sqlite".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates tables for expenses, participant shares, and ledger entries.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let expense_table = schema.create_table_from_entity(Expense);
    let share_table = schema.create_table_from_entity(ParticipantShare);
    let entry_table = schema.create_table_from_entity(LedgerEntry);

    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&share_table)).await?;
    db.execute(builder.build(&entry_table)).await?;

    Ok(())
}
