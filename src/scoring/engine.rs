//! Match engine: an append-only point log with a derived score.

use super::config::MatchConfig;
use super::rules::{MatchScore, PointOutcome, fold};
use super::types::{PointEvent, Side};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Tennis match engine.
///
/// Holds the rule configuration and the ordered list of scored points.
/// The score is never updated in place: every mutation refolds the whole
/// log, so undo is exact by construction.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchConfig,
    events: Vec<PointEvent>,
    score: MatchScore,
}

impl MatchEngine {
    /// Creates an engine for a new match under `config`.
    #[instrument(skip(config), fields(sets_to_win = config.sets_to_win, no_ad = config.no_ad_scoring))]
    pub fn new(config: MatchConfig) -> Self {
        info!("Creating match engine");
        Self {
            config,
            events: Vec::new(),
            score: MatchScore::new(),
        }
    }

    /// Rebuilds an engine from a stored point log.
    ///
    /// Sequence numbers are reassigned from each event's position.
    #[instrument(skip(config, events), fields(events = events.len()))]
    pub fn from_events(config: MatchConfig, events: Vec<PointEvent>) -> Self {
        let events: Vec<PointEvent> = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| PointEvent::new(event.side, i as u32 + 1, event.timestamp))
            .collect();
        let score = fold(&config, &events);
        debug!(winner = ?score.winner(), "Engine rebuilt from events");
        Self {
            config,
            events,
            score,
        }
    }

    /// Returns the rule configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the current derived score.
    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    /// Returns the ordered point log.
    pub fn point_events(&self) -> &[PointEvent] {
        &self.events
    }

    /// Whether there is a point to undo.
    pub fn can_undo(&self) -> bool {
        !self.events.is_empty()
    }

    /// Whether the match has a winner.
    pub fn is_complete(&self) -> bool {
        self.score.is_complete()
    }

    /// Records a point for `side` timestamped now.
    #[instrument(skip(self))]
    pub fn score_point(&mut self, side: Side) -> PointOutcome {
        self.score_point_at(side, Utc::now())
    }

    /// Records a point for `side` with an explicit timestamp.
    ///
    /// Points scored after the match is won are still logged but do not
    /// change the score; they are reported as [`PointOutcome::Absorbed`].
    #[instrument(skip(self, timestamp))]
    pub fn score_point_at(&mut self, side: Side, timestamp: DateTime<Utc>) -> PointOutcome {
        let sequence_number = self.events.len() as u32 + 1;
        self.events
            .push(PointEvent::new(side, sequence_number, timestamp));

        let mut score = fold(&self.config, &self.events[..self.events.len() - 1]);
        let outcome = score.apply(&self.config, side);
        self.score = score;

        debug!(sequence_number, ?outcome, "Point recorded");
        if outcome == PointOutcome::Match {
            info!(winner = ?self.score.winner(), points = self.events.len(), "Match complete");
        }
        outcome
    }

    /// Removes the most recent point. Returns false if there was nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        match self.events.pop() {
            Some(event) => {
                self.score = fold(&self.config, &self.events);
                debug!(sequence_number = event.sequence_number, side = ?event.side, "Point undone");
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    /// Discards the match and starts over.
    ///
    /// Uses `config` when given, otherwise the default configuration.
    #[instrument(skip(self, config))]
    pub fn new_match(&mut self, config: Option<MatchConfig>) {
        info!(discarded_points = self.events.len(), "Starting new match");
        self.config = config.unwrap_or_default();
        self.events.clear();
        self.score = MatchScore::new();
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{GameState, PerSide};

    fn score_game(engine: &mut MatchEngine, side: Side) {
        for _ in 0..4 {
            engine.score_point(side);
        }
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = MatchEngine::default();
        assert!(!engine.can_undo());
        assert!(engine.point_events().is_empty());
        assert_eq!(engine.score(), &MatchScore::new());
    }

    #[test]
    fn test_sequence_numbers_contiguous() {
        let mut engine = MatchEngine::default();
        engine.score_point(Side::One);
        engine.score_point(Side::Two);
        engine.score_point(Side::One);
        engine.undo();
        engine.score_point(Side::Two);

        let numbers: Vec<u32> = engine
            .point_events()
            .iter()
            .map(|e| e.sequence_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(engine.point_events()[2].side, Side::Two);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut engine = MatchEngine::default();
        assert!(!engine.undo());
        assert_eq!(engine.score(), &MatchScore::new());
    }

    #[test]
    fn test_undo_restores_game_win() {
        let mut engine = MatchEngine::default();
        for _ in 0..3 {
            engine.score_point(Side::One);
        }
        let before = engine.score().clone();
        assert_eq!(engine.score_point(Side::One), PointOutcome::Game);
        assert!(engine.undo());
        assert_eq!(engine.score(), &before);
        assert_eq!(engine.score().current_game(), GameState::Playing { one: 3, two: 0 });
    }

    #[test]
    fn test_points_after_completion_absorbed() {
        let mut engine = MatchEngine::new(MatchConfig::default().with_sets_to_win(1));
        for _ in 0..6 {
            score_game(&mut engine, Side::One);
        }
        assert!(engine.is_complete());
        let finished = engine.score().clone();

        assert_eq!(engine.score_point(Side::Two), PointOutcome::Absorbed);
        assert_eq!(engine.score(), &finished);
        assert_eq!(engine.point_events().len(), 25);

        assert!(engine.undo());
        assert_eq!(engine.score(), &finished);
        assert!(engine.undo());
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_new_match_resets_to_default_config() {
        let mut engine = MatchEngine::new(MatchConfig::default().with_no_ad_scoring(true));
        score_game(&mut engine, Side::Two);
        engine.new_match(None);
        assert_eq!(engine.config(), &MatchConfig::default());
        assert!(!engine.can_undo());
        assert_eq!(engine.score().current_set_games(), PerSide::new(0, 0));

        engine.new_match(Some(MatchConfig::best_of_five()));
        assert_eq!(engine.config().sets_to_win, 3);
    }

    #[test]
    fn test_from_events_renumbers() {
        let mut live = MatchEngine::default();
        for i in 0..30 {
            live.score_point(if i % 4 == 0 { Side::Two } else { Side::One });
        }
        let mut events = live.point_events().to_vec();
        for event in &mut events {
            event.sequence_number = 99;
        }

        let rebuilt = MatchEngine::from_events(MatchConfig::default(), events);
        assert_eq!(rebuilt.score(), live.score());
        assert_eq!(rebuilt.point_events()[0].sequence_number, 1);
        assert_eq!(rebuilt.point_events()[29].sequence_number, 30);
    }
}
