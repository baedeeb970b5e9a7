//! Database repository for completed matches and their point logs.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::db::{DbError, MatchEventRecord, MatchRecord, NewMatchEvent, NewMatchRecord, schema};
use crate::scoring::MatchEngine;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for match operations.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db_path: String,
}

impl MatchRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// Use `":memory:"` only for throwaway work: every call opens a fresh
    /// connection, so an in-memory database does not survive between calls.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating MatchRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a finished match and its full point log.
    ///
    /// The record gets a fresh v4 UUID and starts out unsynced. The match
    /// row and every event row are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the match has no winner or a database error occurs.
    #[instrument(skip(self, engine), fields(points = engine.point_events().len()))]
    pub fn save_completed(
        &self,
        engine: &MatchEngine,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<MatchRecord, DbError> {
        let score = engine.score();
        let winner = score
            .winner()
            .ok_or_else(|| DbError::new("Cannot save a match without a winner"))?;
        let config = engine
            .config()
            .to_json()
            .map_err(|e| DbError::new(e.message))?;
        let sets = score.sets();

        let id = Uuid::new_v4().to_string();
        let record = NewMatchRecord::new(
            id.clone(),
            engine.config().match_type.to_string(),
            config,
            winner.number(),
            i32::from(sets.one),
            i32::from(sets.two),
            started_at.naive_utc(),
            ended_at.naive_utc(),
        );
        let events: Vec<NewMatchEvent> = engine
            .point_events()
            .iter()
            .map(|event| NewMatchEvent::from_event(&id, event))
            .collect();

        debug!(id = %id, "Saving completed match");
        let mut conn = self.connection()?;
        let saved = conn.transaction::<_, DbError, _>(|conn| {
            let saved = diesel::insert_into(schema::matches::table)
                .values(&record)
                .returning(MatchRecord::as_returning())
                .get_result(conn)?;
            diesel::insert_into(schema::match_events::table)
                .values(&events)
                .execute(conn)?;
            Ok(saved)
        })?;

        info!(
            id = %saved.id(),
            winner = saved.winner(),
            events = events.len(),
            "Match saved"
        );
        Ok(saved)
    }

    /// Lists all stored matches, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_matches(&self) -> Result<Vec<MatchRecord>, DbError> {
        debug!("Listing matches");
        let mut conn = self.connection()?;

        let matches = schema::matches::table
            .order(schema::matches::started_at.desc())
            .select(MatchRecord::as_select())
            .load(&mut conn)?;

        info!(count = matches.len(), "Matches loaded");
        Ok(matches)
    }

    /// Gets a match by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_match(&self, id: &str) -> Result<Option<MatchRecord>, DbError> {
        let mut conn = self.connection()?;

        let record = schema::matches::table
            .find(id)
            .select(MatchRecord::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = record.is_some(), "Match lookup");
        Ok(record)
    }

    /// Gets the point log of a match, ordered by point number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_events(&self, match_id: &str) -> Result<Vec<MatchEventRecord>, DbError> {
        let mut conn = self.connection()?;

        let events = schema::match_events::table
            .filter(schema::match_events::match_id.eq(match_id))
            .order(schema::match_events::point_number.asc())
            .select(MatchEventRecord::as_select())
            .load(&mut conn)?;

        debug!(count = events.len(), "Events loaded");
        Ok(events)
    }

    /// Lists matches not yet uploaded, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_unsynced(&self) -> Result<Vec<MatchRecord>, DbError> {
        let mut conn = self.connection()?;

        let matches = schema::matches::table
            .filter(schema::matches::synced.eq(false))
            .order(schema::matches::started_at.asc())
            .select(MatchRecord::as_select())
            .load(&mut conn)?;

        debug!(count = matches.len(), "Unsynced matches loaded");
        Ok(matches)
    }

    /// Flags a match as uploaded. Returns false if no such match exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn mark_synced(&self, id: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let updated = diesel::update(schema::matches::table.find(id))
            .set(schema::matches::synced.eq(true))
            .execute(&mut conn)?;

        if updated == 0 {
            warn!(id = %id, "Match to mark synced not found");
        } else {
            info!(id = %id, "Match marked synced");
        }
        Ok(updated > 0)
    }

    /// Deletes a match and its events. Returns false if no such match exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_match(&self, id: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let deleted = conn.transaction::<_, DbError, _>(|conn| {
            diesel::delete(
                schema::match_events::table.filter(schema::match_events::match_id.eq(id)),
            )
            .execute(conn)?;
            Ok(diesel::delete(schema::matches::table.find(id)).execute(conn)?)
        })?;

        info!(id = %id, deleted, "Match delete");
        Ok(deleted > 0)
    }
}
