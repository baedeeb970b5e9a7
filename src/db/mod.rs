//! Local persistence of completed matches.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{MatchEventRecord, MatchRecord, NewMatchEvent, NewMatchRecord};
pub use repository::MatchRepository;
