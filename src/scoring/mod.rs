mod analysis;
mod config;
mod engine;
mod projection;
mod rules;
mod types;

pub use analysis::{
    Conversion, GameDuration, MatchStats, Momentum, Pace, PointContext, SetDuration, SideStats,
    compute_momentum, compute_pace, compute_stats, replay_with_context,
};
pub use config::{ConfigError, MatchConfig, MatchType};
pub use engine::MatchEngine;
pub use projection::ScoreProjection;
pub use rules::{MatchScore, PointOutcome, fold};
pub use types::{GameState, PerSide, PointEvent, Side};
