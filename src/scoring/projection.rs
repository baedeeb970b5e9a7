//! Display projection of a match score.

use super::rules::MatchScore;
use super::types::{GameState, PerSide, Side};
use std::fmt;

/// Text for a ladder index in a standard game.
fn ladder_label(index: u8) -> String {
    match index {
        0 => "0".to_string(),
        1 => "15".to_string(),
        2 => "30".to_string(),
        3 => "40".to_string(),
        other => other.to_string(),
    }
}

/// Display-ready view of a [`MatchScore`] from one side's point of view.
///
/// Every pair is ordered viewer first. The default viewer is [`Side::One`].
#[derive(Debug, Clone, Copy)]
pub struct ScoreProjection<'a> {
    score: &'a MatchScore,
    viewer: Side,
}

impl<'a> ScoreProjection<'a> {
    /// Projects `score` with [`Side::One`] in the first column.
    pub fn new(score: &'a MatchScore) -> Self {
        Self {
            score,
            viewer: Side::One,
        }
    }

    /// Orders every pair with `viewer` first.
    pub fn oriented(self, viewer: Side) -> Self {
        Self { viewer, ..self }
    }

    fn orient<T>(&self, pair: PerSide<T>) -> PerSide<T> {
        match self.viewer {
            Side::One => pair,
            Side::Two => pair.swapped(),
        }
    }

    /// Label for the current game: `"15 - 30"`, `"Deuce (2)"`, `"Ad - 40"`, `"Game"`.
    pub fn points(&self) -> String {
        let score = self.score;
        match score.current_game() {
            GameState::Playing { one, two } if score.is_tiebreak() => {
                let points = self.orient(PerSide::new(one, two));
                format!("{} - {}", points.one, points.two)
            }
            // A tiebreak only ever holds raw counts.
            _ if score.is_tiebreak() => "0 - 0".to_string(),
            GameState::Playing { one, two } => {
                let points = self.orient(PerSide::new(one, two));
                format!("{} - {}", ladder_label(points.one), ladder_label(points.two))
            }
            GameState::Deuce if score.deuce_count() > 1 => {
                format!("Deuce ({})", score.deuce_count())
            }
            GameState::Deuce => "Deuce".to_string(),
            GameState::Advantage(side) if side == self.viewer => "Ad - 40".to_string(),
            GameState::Advantage(_) => "40 - Ad".to_string(),
            GameState::Completed(_) => "Game".to_string(),
        }
    }

    /// Games in the current set, viewer first.
    pub fn games(&self) -> PerSide<u8> {
        self.orient(self.score.current_set_games())
    }

    /// Sets won, viewer first.
    pub fn sets(&self) -> PerSide<u8> {
        self.orient(self.score.sets())
    }

    /// Set-by-set games, e.g. `"6-4 3-6 2-1"`.
    pub fn set_history(&self) -> String {
        self.score
            .set_scores()
            .into_iter()
            .map(|set| {
                let set = self.orient(set);
                format!("{}-{}", set.one, set.two)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Short status line: winner, tiebreak, or blank.
    pub fn status(&self) -> String {
        match self.score.winner() {
            Some(side) => format!("{} wins", side),
            None if self.score.is_tiebreak() => "Tiebreak".to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ScoreProjection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets = self.sets();
        write!(
            f,
            "Sets {}-{} | Games {} | {}",
            sets.one,
            sets.two,
            self.set_history(),
            self.points()
        )?;
        let status = self.status();
        if !status.is_empty() {
            write!(f, " | {}", status)?;
        }
        Ok(())
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ScoreProjection::new(self).fmt(f)
    }
}
