//! Database models and their domain conversions.

use chrono::{DateTime, NaiveDateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::scoring::{MatchConfig, MatchType, PerSide, PointEvent, Side};

/// Stored completed match.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::matches)]
pub struct MatchRecord {
    id: String,
    match_type: String,
    config: String,
    winner: i32,
    player1_sets: i32,
    player2_sets: i32,
    started_at: NaiveDateTime,
    ended_at: NaiveDateTime,
    synced: bool,
    created_at: NaiveDateTime,
}

impl MatchRecord {
    /// Parses the stored winner column.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the column is not 1 or 2.
    #[instrument(skip(self), fields(id = %self.id, winner = self.winner))]
    pub fn winner_side(&self) -> Result<Side, DbError> {
        Side::from_number(self.winner)
            .ok_or_else(|| DbError::for_match(&self.id, format!("Invalid winner: {}", self.winner)))
    }

    /// Parses the stored match type, treating unknown values as singles.
    pub fn parsed_match_type(&self) -> MatchType {
        self.match_type.parse().unwrap_or_default()
    }

    /// Parses the stored rule configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the JSON is malformed or describes invalid rules.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn match_config(&self) -> Result<MatchConfig, DbError> {
        MatchConfig::from_json(&self.config)
            .map_err(|e| DbError::for_match(&self.id, format!("Invalid stored config: {}", e.message)))
    }

    /// Final set tally.
    pub fn set_tally(&self) -> PerSide<i32> {
        PerSide::new(self.player1_sets, self.player2_sets)
    }

    /// Start time as UTC.
    pub fn started_at_utc(&self) -> DateTime<Utc> {
        self.started_at.and_utc()
    }

    /// End time as UTC.
    pub fn ended_at_utc(&self) -> DateTime<Utc> {
        self.ended_at.and_utc()
    }
}

/// Insertable match record.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::matches)]
pub struct NewMatchRecord {
    id: String,
    match_type: String,
    config: String,
    winner: i32,
    player1_sets: i32,
    player2_sets: i32,
    started_at: NaiveDateTime,
    ended_at: NaiveDateTime,
}

/// Stored point of a completed match.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::match_events)]
#[diesel(belongs_to(MatchRecord, foreign_key = match_id))]
pub struct MatchEventRecord {
    id: i32,
    match_id: String,
    point_number: i32,
    player: i32,
    timestamp: NaiveDateTime,
}

impl MatchEventRecord {
    /// Converts the row back into a [`PointEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the player or point number is out of range.
    #[instrument(skip(self), fields(match_id = %self.match_id, point_number = self.point_number))]
    pub fn to_point_event(&self) -> Result<PointEvent, DbError> {
        let side = Side::from_number(self.player)
            .ok_or_else(|| DbError::for_match(&self.match_id, format!("Invalid player: {}", self.player)))?;
        let sequence_number = u32::try_from(self.point_number)
            .map_err(|_| {
                DbError::for_match(
                    &self.match_id,
                    format!("Invalid point number: {}", self.point_number),
                )
            })?;
        Ok(PointEvent::new(
            side,
            sequence_number,
            self.timestamp.and_utc(),
        ))
    }
}

/// Insertable point row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::match_events)]
pub struct NewMatchEvent {
    match_id: String,
    point_number: i32,
    player: i32,
    timestamp: NaiveDateTime,
}

impl NewMatchEvent {
    /// Builds a row for `event` belonging to `match_id`.
    pub fn from_event(match_id: &str, event: &PointEvent) -> Self {
        Self::new(
            match_id.to_string(),
            event.sequence_number as i32,
            event.side.number(),
            event.timestamp.naive_utc(),
        )
    }
}
