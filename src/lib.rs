//! Tennis Scorer library - replayable tennis match scoring
//!
//! A match is an append-only log of scored points. Every score shown to the
//! user is derived by folding that log under a [`MatchConfig`], which makes
//! undo exact and stored matches replayable.
//!
//! # Architecture
//!
//! - **Scoring**: rule fold, match engine, score projection, replay analysis
//! - **Input**: keyword classifier for spoken or typed commands
//! - **Persistence**: SQLite storage of completed matches (diesel)
//! - **Sync**: upload of unsynced matches to the remote API (reqwest)
//!
//! # Example
//!
//! ```
//! use tennis_scorer::{MatchConfig, MatchEngine, Side};
//!
//! let mut engine = MatchEngine::new(MatchConfig::default());
//! engine.score_point(Side::One);
//! engine.score_point(Side::One);
//! assert_eq!(engine.score().to_string(), "Sets 0-0 | Games 0-0 | 30 - 0");
//!
//! engine.undo();
//! assert_eq!(engine.point_events().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app_config;
mod db;
mod input;
mod match_service;
mod scoring;
mod sync;

// Crate-level exports - Configuration
pub use app_config::{API_URL_ENV, AppConfig, DATABASE_ENV};

// Crate-level exports - Scoring
pub use scoring::{
    ConfigError, Conversion, GameDuration, GameState, MatchConfig, MatchEngine, MatchScore,
    MatchStats, MatchType, Momentum, Pace, PerSide, PointContext, PointEvent, PointOutcome,
    ScoreProjection, SetDuration, Side, SideStats, compute_momentum, compute_pace, compute_stats,
    fold, replay_with_context,
};

// Crate-level exports - Input
pub use input::{KeywordMatcher, RecognitionSession, ScoringAction, SessionState};

// Crate-level exports - Persistence
pub use db::{DbError, MatchEventRecord, MatchRecord, MatchRepository, NewMatchEvent, NewMatchRecord};
pub use match_service::{MatchService, MatchSummary};

// Crate-level exports - Sync
pub use sync::{
    ApiClient, CredentialStore, EventUpload, FileCredentialStore, MatchUpload, MatchUploader,
    MemoryCredentialStore, SyncError, SyncReport, SyncService, TokenPair,
};
