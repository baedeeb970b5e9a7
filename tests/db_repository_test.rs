//! Tests for database repository operations.

use chrono::{Duration, TimeZone, Utc};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tempfile::NamedTempFile;

use tennis_scorer::{MatchConfig, MatchEngine, MatchRepository, MatchService, MatchType, Side};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, MatchRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = MatchRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    (db_file, repo)
}

/// Plays a complete single-set match won 6-2 by `winner`, one point every 20s.
fn finished_engine(config: MatchConfig, winner: Side) -> MatchEngine {
    let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).single().expect("Valid date");
    let mut engine = MatchEngine::new(config.with_sets_to_win(1));
    let mut games = vec![winner.opponent(), winner.opponent()];
    games.extend([winner; 6]);
    let mut n = 0;
    for game in games {
        for _ in 0..4 {
            engine.score_point_at(game, start + Duration::seconds(20 * n));
            n += 1;
        }
    }
    assert!(engine.is_complete());
    engine
}

fn save(repo: &MatchRepository, engine: &MatchEngine) -> tennis_scorer::MatchRecord {
    let events = engine.point_events();
    let started = events.first().expect("Has events").timestamp;
    let ended = events.last().expect("Has events").timestamp;
    repo.save_completed(engine, started, ended).expect("Save failed")
}

#[test]
fn test_save_completed_match() {
    let (_db, repo) = setup_test_db();
    let engine = finished_engine(MatchConfig::default(), Side::Two);
    let record = save(&repo, &engine);

    assert_eq!(record.id().len(), 36);
    assert_eq!(*record.winner(), 2);
    assert_eq!(*record.player1_sets(), 0);
    assert_eq!(*record.player2_sets(), 1);
    assert_eq!(record.match_type(), "singles");
    assert!(!*record.synced());
    assert_eq!(record.winner_side().expect("Valid winner"), Side::Two);
    assert_eq!(
        record.match_config().expect("Valid config"),
        MatchConfig::default().with_sets_to_win(1)
    );
}

#[test]
fn test_save_incomplete_match_fails() {
    let (_db, repo) = setup_test_db();
    let mut engine = MatchEngine::default();
    engine.score_point(Side::One);
    let now = Utc::now();
    assert!(repo.save_completed(&engine, now, now).is_err());
    assert!(repo.list_matches().expect("List failed").is_empty());
}

#[test]
fn test_events_round_trip() {
    let (_db, repo) = setup_test_db();
    let engine = finished_engine(MatchConfig::default(), Side::One);
    let record = save(&repo, &engine);

    let rows = repo.get_events(record.id()).expect("Query failed");
    assert_eq!(rows.len(), 32);
    assert_eq!(*rows[0].point_number(), 1);
    assert_eq!(*rows[31].point_number(), 32);

    let events: Vec<_> = rows
        .iter()
        .map(|row| row.to_point_event().expect("Valid row"))
        .collect();
    assert_eq!(events.as_slice(), engine.point_events());
}

#[test]
fn test_get_match_not_found() {
    let (_db, repo) = setup_test_db();
    assert!(repo.get_match("missing").expect("Query failed").is_none());
}

#[test]
fn test_unsynced_and_mark_synced() {
    let (_db, repo) = setup_test_db();
    let first = save(&repo, &finished_engine(MatchConfig::default(), Side::One));
    let second = save(&repo, &finished_engine(MatchConfig::default(), Side::Two));

    assert_eq!(repo.list_unsynced().expect("Query failed").len(), 2);
    assert!(repo.mark_synced(first.id()).expect("Update failed"));

    let unsynced = repo.list_unsynced().expect("Query failed");
    assert_eq!(unsynced.len(), 1);
    assert_eq!(unsynced[0].id(), second.id());
    assert!(!repo.mark_synced("missing").expect("Update failed"));
}

#[test]
fn test_delete_match_removes_events() {
    let (_db, repo) = setup_test_db();
    let record = save(&repo, &finished_engine(MatchConfig::default(), Side::One));

    assert!(repo.delete_match(record.id()).expect("Delete failed"));
    assert!(repo.get_match(record.id()).expect("Query failed").is_none());
    assert!(repo.get_events(record.id()).expect("Query failed").is_empty());
    assert!(!repo.delete_match(record.id()).expect("Delete failed"));
}

#[test]
fn test_doubles_match_type_stored() {
    let (_db, repo) = setup_test_db();
    let config = MatchConfig::default()
        .with_match_type(MatchType::Doubles)
        .with_first_server_team(Side::Two);
    let record = save(&repo, &finished_engine(config, Side::One));

    assert_eq!(record.match_type(), "doubles");
    assert_eq!(record.parsed_match_type(), MatchType::Doubles);
    assert_eq!(
        record.match_config().expect("Valid config").first_server_team,
        Some(Side::Two)
    );
}

#[test]
fn test_service_reloads_engine() {
    let (_db, repo) = setup_test_db();
    let service = MatchService::new(repo);
    let engine = finished_engine(MatchConfig::default().with_no_ad_scoring(true), Side::Two);
    let started = engine.point_events()[0].timestamp;

    let record = service.record_completed(&engine, started).expect("Record failed");
    assert_eq!(
        record.ended_at_utc(),
        engine.point_events().last().expect("Has events").timestamp
    );

    let reloaded = service
        .load_engine(record.id())
        .expect("Load failed")
        .expect("Match exists");
    assert_eq!(reloaded.score(), engine.score());
    assert_eq!(reloaded.config(), engine.config());
    assert!(service.load_engine("missing").expect("Load failed").is_none());
}

#[test]
fn test_service_history_lines() {
    let (_db, repo) = setup_test_db();
    let service = MatchService::new(repo);
    let engine = finished_engine(MatchConfig::default(), Side::One);
    service
        .record_completed(&engine, engine.point_events()[0].timestamp)
        .expect("Record failed");

    let history = service.history().expect("History failed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].set_history(), "6-2");
    assert_eq!(*history[0].points(), 32);
}

/// Overwrites the stored config of one match with text that is not JSON.
fn corrupt_config(db: &NamedTempFile, id: &str) {
    let path = db.path().to_str().expect("Invalid path");
    let mut conn = SqliteConnection::establish(path).expect("Failed to connect");
    diesel::sql_query(format!(
        "UPDATE matches SET config = 'not json' WHERE id = '{}'",
        id
    ))
    .execute(&mut conn)
    .expect("Update failed");
}

#[test]
fn test_history_keeps_unreplayable_match() {
    let (db, repo) = setup_test_db();
    let service = MatchService::new(repo);
    let good = finished_engine(MatchConfig::default(), Side::One);
    service
        .record_completed(&good, good.point_events()[0].timestamp)
        .expect("Record failed");
    let bad = service
        .record_completed(
            &finished_engine(MatchConfig::default(), Side::Two),
            good.point_events()[0].timestamp,
        )
        .expect("Record failed");
    corrupt_config(&db, bad.id());

    let history = service.history().expect("History failed");
    assert_eq!(history.len(), 2);
    let broken = history
        .iter()
        .find(|summary| summary.record().id() == bad.id())
        .expect("Broken match listed");
    assert_eq!(broken.set_history(), "sets 0-1");
    assert_eq!(*broken.points(), 0);
    assert!(history.iter().any(|summary| summary.set_history() == "6-2"));

    let err = service.load_engine(bad.id()).expect_err("Config is unreadable");
    assert_eq!(err.match_id.as_deref(), Some(bad.id().as_str()));
}
