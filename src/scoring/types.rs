//! Core domain types for tennis scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two competing parties (player or team).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Side {
    /// The first side (the scorer's own side on a watch).
    #[strum(to_string = "Player 1")]
    One,
    /// The second side.
    #[strum(to_string = "Player 2")]
    Two,
}

impl Side {
    /// Both sides in display order.
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Returns the 1-based number used in stored records and the sync API.
    pub fn number(self) -> i32 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    /// Parses the 1-based number used in stored records.
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(Side::One),
            2 => Some(Side::Two),
            _ => None,
        }
    }
}

/// A value held once for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerSide<T> {
    /// Value for [`Side::One`].
    pub one: T,
    /// Value for [`Side::Two`].
    pub two: T,
}

impl<T> PerSide<T> {
    /// Creates a pair from both values.
    pub fn new(one: T, two: T) -> Self {
        Self { one, two }
    }

    /// Returns the pair with the sides swapped.
    pub fn swapped(self) -> Self {
        Self {
            one: self.two,
            two: self.one,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::One => &mut self.one,
            Side::Two => &mut self.two,
        }
    }
}

/// A single scored point.
///
/// Point events are the only stored state of a match. Everything shown on
/// the scoreboard is derived by folding the ordered list of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    /// The side that won the point.
    pub side: Side,
    /// 1-based position of the event in the match log.
    pub sequence_number: u32,
    /// When the point was recorded.
    pub timestamp: DateTime<Utc>,
}

impl PointEvent {
    /// Creates a new point event.
    pub fn new(side: Side, sequence_number: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            side,
            sequence_number,
            timestamp,
        }
    }
}

/// State of the game currently being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Points on the 0/15/30/40 ladder (indices 0..=3), or raw counts in a tiebreak.
    Playing {
        /// Points for [`Side::One`].
        one: u8,
        /// Points for [`Side::Two`].
        two: u8,
    },
    /// 40-40 under advantage scoring.
    Deuce,
    /// One point from the game after deuce.
    Advantage(Side),
    /// The final game of a finished match, won by this side.
    Completed(Side),
}

impl GameState {
    /// A fresh game at love-all.
    pub const LOVE_ALL: GameState = GameState::Playing { one: 0, two: 0 };

    /// Returns the game winner if the game is over.
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameState::Completed(side) => Some(*side),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::LOVE_ALL
    }
}
