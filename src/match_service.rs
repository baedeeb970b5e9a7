//! Match history business logic layer.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use crate::{DbError, MatchEngine, MatchRecord, MatchRepository, ScoreProjection};

/// A stored match with its set-by-set line.
#[derive(Debug, Clone, Getters)]
pub struct MatchSummary {
    record: MatchRecord,
    set_history: String,
    points: usize,
}

/// Service layer for recording and reloading matches.
///
/// Wraps [`MatchRepository`] with conversions between stored rows and
/// [`MatchEngine`] instances.
#[derive(Debug, Clone)]
pub struct MatchService {
    repository: MatchRepository,
}

impl MatchService {
    /// Creates a new match service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: MatchRepository) -> Self {
        info!("Creating MatchService");
        Self { repository }
    }

    /// Saves a finished match.
    ///
    /// The end time is the timestamp of the deciding point.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the match is not finished or the write fails.
    #[instrument(skip(self, engine))]
    pub fn record_completed(
        &self,
        engine: &MatchEngine,
        started_at: DateTime<Utc>,
    ) -> Result<MatchRecord, DbError> {
        let ended_at = engine
            .point_events()
            .last()
            .map(|event| event.timestamp)
            .unwrap_or(started_at);
        debug!(%started_at, %ended_at, "Recording completed match");
        self.repository.save_completed(engine, started_at, ended_at)
    }

    /// Rebuilds the engine for a stored match. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored row cannot be converted back.
    #[instrument(skip(self))]
    pub fn load_engine(&self, id: &str) -> Result<Option<MatchEngine>, DbError> {
        let Some(record) = self.repository.get_match(id)? else {
            debug!("Match not found");
            return Ok(None);
        };
        self.engine_for(&record).map(Some)
    }

    fn engine_for(&self, record: &MatchRecord) -> Result<MatchEngine, DbError> {
        let config = record.match_config()?;
        let events = self
            .repository
            .get_events(record.id())?
            .iter()
            .map(|row| row.to_point_event())
            .collect::<Result<Vec<_>, _>>()?;

        let engine = MatchEngine::from_events(config, events);
        if engine.score().winner() != Some(record.winner_side()?) {
            warn!(id = %record.id(), "Replayed winner differs from stored winner");
        }
        Ok(engine)
    }

    /// Lists stored matches, most recent first, with their set lines.
    ///
    /// A match whose rows cannot be replayed is listed with its stored set
    /// tally and zero points.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the match list cannot be read.
    #[instrument(skip(self))]
    pub fn history(&self) -> Result<Vec<MatchSummary>, DbError> {
        let records = self.repository.list_matches()?;
        let mut summaries = Vec::with_capacity(records.len());

        for record in records {
            let (set_history, points) = match self.engine_for(&record) {
                Ok(engine) => (
                    ScoreProjection::new(engine.score()).set_history(),
                    engine.point_events().len(),
                ),
                Err(err) => {
                    warn!(id = %record.id(), error = %err, "Cannot replay stored match");
                    let tally = record.set_tally();
                    (format!("sets {}-{}", tally.one, tally.two), 0)
                }
            };
            summaries.push(MatchSummary {
                record,
                set_history,
                points,
            });
        }

        info!(count = summaries.len(), "Match history loaded");
        Ok(summaries)
    }
}
