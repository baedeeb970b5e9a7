//! Scoring rules: folding an ordered point log into a [`MatchScore`].
//!
//! The fold is the only place rules live. The engine, undo, replay analysis
//! and stored-match reloading all go through [`fold`] or [`MatchScore::apply`],
//! so derived state can never drift from the event log.

use super::config::MatchConfig;
use super::types::{GameState, PerSide, PointEvent, Side};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Ladder index of 40.
const FORTY: u8 = 3;

/// What a single point did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointOutcome {
    /// The point was played but no game ended.
    Point,
    /// The point ended a game.
    Game,
    /// The point ended a set.
    Set,
    /// The point ended the match.
    Match,
    /// The match was already over; the score did not change.
    Absorbed,
}

impl PointOutcome {
    /// Whether the point closed out a game (or a set or the match).
    pub fn ends_game(self) -> bool {
        matches!(self, Self::Game | Self::Set | Self::Match)
    }

    /// Whether the point closed out a set (or the match).
    pub fn ends_set(self) -> bool {
        matches!(self, Self::Set | Self::Match)
    }
}

/// Derived snapshot of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    sets: PerSide<u8>,
    games_per_set: PerSide<Vec<u8>>,
    is_tiebreak: bool,
    deuce_count: u8,
    current_game: GameState,
    winner: Option<Side>,
}

impl MatchScore {
    /// The score before any point is played.
    pub fn new() -> Self {
        Self {
            sets: PerSide::new(0, 0),
            games_per_set: PerSide::new(vec![0], vec![0]),
            is_tiebreak: false,
            deuce_count: 0,
            current_game: GameState::LOVE_ALL,
            winner: None,
        }
    }

    /// Sets won by each side.
    pub fn sets(&self) -> PerSide<u8> {
        self.sets
    }

    /// Games won by each side in every set started, current set last.
    pub fn games_per_set(&self) -> &PerSide<Vec<u8>> {
        &self.games_per_set
    }

    /// Whether the current game slot is a tiebreak.
    pub fn is_tiebreak(&self) -> bool {
        self.is_tiebreak
    }

    /// Number of times the current game has entered deuce.
    pub fn deuce_count(&self) -> u8 {
        self.deuce_count
    }

    /// State of the current game.
    pub fn current_game(&self) -> GameState {
        self.current_game
    }

    /// Match winner, once decided.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Whether the match is over.
    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    /// 1-based number of the current (or final) set.
    pub fn set_number(&self) -> usize {
        self.games_per_set.one.len()
    }

    /// Games in the current (or final) set.
    pub fn current_set_games(&self) -> PerSide<u8> {
        PerSide::new(
            self.games_per_set.one.last().copied().unwrap_or_default(),
            self.games_per_set.two.last().copied().unwrap_or_default(),
        )
    }

    /// Game tallies for every set, in order.
    pub fn set_scores(&self) -> Vec<PerSide<u8>> {
        self.games_per_set
            .one
            .iter()
            .zip(&self.games_per_set.two)
            .map(|(one, two)| PerSide::new(*one, *two))
            .collect()
    }

    /// Applies one point for `scorer` under `config`.
    ///
    /// Once a winner is set every further point is absorbed.
    pub fn apply(&mut self, config: &MatchConfig, scorer: Side) -> PointOutcome {
        if self.winner.is_some() {
            return PointOutcome::Absorbed;
        }
        let outcome = if self.is_tiebreak {
            self.apply_tiebreak_point(config, scorer)
        } else {
            self.apply_game_point(config, scorer)
        };
        trace!(?scorer, ?outcome, game = ?self.current_game, "Point applied");
        outcome
    }

    fn game_points(&self) -> PerSide<u8> {
        match self.current_game {
            GameState::Playing { one, two } => PerSide::new(one, two),
            _ => PerSide::new(0, 0),
        }
    }

    fn apply_tiebreak_point(&mut self, config: &MatchConfig, scorer: Side) -> PointOutcome {
        let mut points = self.game_points();
        points[scorer] = points[scorer].saturating_add(1);
        let lead = points[scorer].saturating_sub(points[scorer.opponent()]);

        if points[scorer] >= config.tiebreak_points && lead >= 2 {
            self.increment_games(scorer);
            self.is_tiebreak = false;
            self.reset_game();
            return self.award_set(config, scorer);
        }

        self.current_game = GameState::Playing {
            one: points.one,
            two: points.two,
        };
        PointOutcome::Point
    }

    fn apply_game_point(&mut self, config: &MatchConfig, scorer: Side) -> PointOutcome {
        let next = match self.current_game {
            GameState::Playing { one, two } => {
                let mut points = PerSide::new(one, two);
                if points[scorer] >= FORTY {
                    None
                } else {
                    points[scorer] += 1;
                    let forty_all = points.one == FORTY && points.two == FORTY;
                    if forty_all && !config.no_ad_scoring {
                        self.deuce_count = 1;
                        Some(GameState::Deuce)
                    } else {
                        Some(GameState::Playing {
                            one: points.one,
                            two: points.two,
                        })
                    }
                }
            }
            GameState::Deuce if config.no_ad_scoring => None,
            GameState::Deuce => Some(GameState::Advantage(scorer)),
            GameState::Advantage(leader) if leader == scorer => None,
            GameState::Advantage(_) => {
                self.deuce_count = self.deuce_count.saturating_add(1);
                Some(GameState::Deuce)
            }
            GameState::Completed(_) => return PointOutcome::Absorbed,
        };

        match next {
            Some(state) => {
                self.current_game = state;
                PointOutcome::Point
            }
            None => self.award_game(config, scorer),
        }
    }

    fn award_game(&mut self, config: &MatchConfig, scorer: Side) -> PointOutcome {
        self.increment_games(scorer);
        self.reset_game();

        let games = self.current_set_games();
        let (won, lost) = (games[scorer], games[scorer.opponent()]);
        let target = config.games_per_set;

        if won >= target && won >= lost.saturating_add(2) {
            return self.award_set(config, scorer);
        }

        let tiebreak_allowed = !self.is_deciding_set(config) || config.final_set_tiebreak;
        if tiebreak_allowed && won == target && lost == target {
            self.is_tiebreak = true;
        }
        PointOutcome::Game
    }

    fn award_set(&mut self, config: &MatchConfig, scorer: Side) -> PointOutcome {
        self.sets[scorer] = self.sets[scorer].saturating_add(1);
        if self.sets[scorer] >= config.sets_to_win {
            self.winner = Some(scorer);
            self.current_game = GameState::Completed(scorer);
            return PointOutcome::Match;
        }
        self.games_per_set.one.push(0);
        self.games_per_set.two.push(0);
        PointOutcome::Set
    }

    /// The deciding set is the one both sides reach one set short of the match.
    fn is_deciding_set(&self, config: &MatchConfig) -> bool {
        let needed = config.sets_to_win.saturating_sub(1);
        self.sets.one == needed && self.sets.two == needed
    }

    fn increment_games(&mut self, scorer: Side) {
        if let Some(games) = self.games_per_set[scorer].last_mut() {
            *games = games.saturating_add(1);
        }
    }

    fn reset_game(&mut self) {
        self.current_game = GameState::LOVE_ALL;
        self.deuce_count = 0;
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds an ordered point log into the derived match score.
#[instrument(skip_all, fields(sets_to_win = config.sets_to_win))]
pub fn fold<'a, I>(config: &MatchConfig, events: I) -> MatchScore
where
    I: IntoIterator<Item = &'a PointEvent>,
{
    let mut score = MatchScore::new();
    for event in events {
        score.apply(config, event.side);
    }
    score
}
