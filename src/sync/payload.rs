//! Upload payload for a completed match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{MatchEventRecord, MatchRecord};

/// One point as sent to the sync API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpload {
    /// 1-based position in the match.
    pub point_number: i32,
    /// 1 or 2.
    pub player: i32,
    /// When the point was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A completed match as sent to `POST /matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchUpload {
    /// Local match id, used by the server to deduplicate.
    pub client_id: String,
    /// `"singles"` or `"doubles"`.
    pub match_type: String,
    /// Rule configuration as a JSON object.
    pub config: serde_json::Value,
    /// 1 or 2.
    pub winner: i32,
    /// Sets won by side one.
    pub player1_sets: i32,
    /// Sets won by side two.
    pub player2_sets: i32,
    /// When the first point was played.
    pub started_at: DateTime<Utc>,
    /// When the deciding point was played.
    pub ended_at: DateTime<Utc>,
    /// Every point, ordered by point number.
    pub events: Vec<EventUpload>,
}

impl MatchUpload {
    /// Builds the payload for a stored match and its events.
    ///
    /// A stored config that is not valid JSON is sent as an empty object.
    #[instrument(skip_all, fields(id = %record.id(), events = events.len()))]
    pub fn from_records(record: &MatchRecord, events: &[MatchEventRecord]) -> Self {
        let config = serde_json::from_str(record.config()).unwrap_or_else(|e| {
            warn!(error = %e, "Stored config is not valid JSON, sending empty object");
            serde_json::Value::Object(serde_json::Map::new())
        });

        let mut events: Vec<EventUpload> = events
            .iter()
            .map(|event| EventUpload {
                point_number: *event.point_number(),
                player: *event.player(),
                timestamp: event.timestamp().and_utc(),
            })
            .collect();
        events.sort_by_key(|event| event.point_number);

        Self {
            client_id: record.id().clone(),
            match_type: record.match_type().clone(),
            config,
            winner: *record.winner(),
            player1_sets: *record.player1_sets(),
            player2_sets: *record.player2_sets(),
            started_at: record.started_at_utc(),
            ended_at: record.ended_at_utc(),
            events,
        }
    }
}
