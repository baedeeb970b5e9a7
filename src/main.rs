//! Tennis Scorer - Unified CLI
//!
//! Interactive scoring, match history and sync.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command, RuleArgs};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tennis_scorer::{
    ApiClient, AppConfig, FileCredentialStore, KeywordMatcher, MatchEngine, MatchRepository,
    MatchService, PointOutcome, ScoringAction, SyncError, SyncService, compute_pace,
    compute_stats, replay_with_context,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the scoreboard on stdout stays readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Play { rules, no_save } => run_play(&config, &rules, no_save),
        Command::History { id } => run_history(&config, id.as_deref()),
        Command::Login {
            email,
            password,
            register,
        } => run_login(&config, &email, &password, register).await,
        Command::Logout => {
            api_client(&config).logout()?;
            println!("Logged out");
            Ok(())
        }
        Command::Sync => run_sync(&config).await,
    }
}

/// Opens the repository and brings the schema up to date.
fn open_repository(config: &AppConfig) -> Result<MatchRepository> {
    let repository = MatchRepository::new(config.database_path().clone())?;
    repository.migrate()?;
    Ok(repository)
}

fn api_client(config: &AppConfig) -> ApiClient {
    let credentials = Arc::new(FileCredentialStore::new(config.credentials_path()));
    ApiClient::new(config.api_base_url(), credentials)
}

const PLAY_HELP: &str = "1 / me: point Player 1 | 2 / opponent: point Player 2 | u / undo | n: new match | q: quit";

/// Scores a match from stdin, one command per line.
#[instrument(skip(config, rules))]
fn run_play(config: &AppConfig, rules: &RuleArgs, no_save: bool) -> Result<()> {
    let match_rules = rules.apply(config.match_rules());
    match_rules.validate()?;

    let service = if no_save {
        None
    } else {
        Some(MatchService::new(open_repository(config)?))
    };

    let matcher = KeywordMatcher::default();
    let mut engine = MatchEngine::new(match_rules.clone());
    let mut started_at = Utc::now();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{}", PLAY_HELP);
    println!("{}", engine.score());

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let command = line.trim();

        let action = match command {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => {
                engine.new_match(Some(match_rules.clone()));
                started_at = Utc::now();
                println!("{}", engine.score());
                continue;
            }
            "1" => Some(ScoringAction::Player1Point),
            "2" => Some(ScoringAction::Player2Point),
            "u" => Some(ScoringAction::Undo),
            text => matcher.classify(text),
        };

        let Some(action) = action else {
            println!("Unrecognized input. {}", PLAY_HELP);
            continue;
        };

        if engine.point_events().is_empty() && action != ScoringAction::Undo {
            started_at = Utc::now();
        }
        let outcome = action.apply(&mut engine);
        println!("{}", engine.score());
        stdout.flush().ok();

        if outcome == Some(PointOutcome::Match) {
            info!("Match finished");
            if let Some(service) = &service {
                let record = service.record_completed(&engine, started_at)?;
                println!("Saved match {}", record.id());
            }
            break;
        }
    }

    Ok(())
}

/// Lists stored matches, or prints the analysis of one.
#[instrument(skip(config))]
fn run_history(config: &AppConfig, id: Option<&str>) -> Result<()> {
    let service = MatchService::new(open_repository(config)?);

    let Some(id) = id else {
        let summaries = service.history()?;
        if summaries.is_empty() {
            println!("No matches recorded");
        }
        for summary in summaries {
            let record = summary.record();
            println!(
                "{}  {}  {:<8} winner P{}  {}  ({} points){}",
                record.id(),
                record.started_at().format("%Y-%m-%d %H:%M"),
                record.match_type(),
                record.winner(),
                summary.set_history(),
                summary.points(),
                if *record.synced() { "" } else { "  [unsynced]" },
            );
        }
        return Ok(());
    };

    let engine = service
        .load_engine(id)?
        .with_context(|| format!("No match with id {}", id))?;
    let points = replay_with_context(engine.config(), engine.point_events());
    let stats = compute_stats(&points);
    let pace = compute_pace(&points);

    println!("{}", engine.score());
    println!(
        "Points: {}  Duration: {:.0}s  Avg between points: {:.1}s",
        stats.total_points, pace.total_duration, pace.average_interval
    );
    println!(
        "Deuce games: {} ({:.1} deuces each)  Tiebreaks: {} (avg margin {:.1})",
        stats.deuce_games,
        stats.average_deuces_per_deuce_game,
        stats.tiebreaks,
        stats.average_tiebreak_margin
    );
    for (label, side) in [("Player 1", &stats.sides.one), ("Player 2", &stats.sides.two)] {
        println!(
            "{}: points {}  best streak {}  worst drought {}  games in a row {}  game points {}/{}  set points {}/{}  match points {}/{}  deuce games won {}  tiebreaks won {}",
            label,
            side.points_won,
            side.longest_point_streak,
            side.longest_point_drought,
            side.most_games_in_a_row,
            side.game_points.converted,
            side.game_points.chances,
            side.set_points.converted,
            side.set_points.chances,
            side.match_points.converted,
            side.match_points.chances,
            side.deuce_games_won,
            side.tiebreaks_won,
        );
        println!(
            "  win rate on set points {:.0}%  match points {:.0}%  other points {:.0}%",
            side.set_point_win_rate() * 100.0,
            side.match_point_win_rate() * 100.0,
            side.normal_point_win_rate() * 100.0,
        );
    }
    Ok(())
}

#[instrument(skip(config, password))]
async fn run_login(config: &AppConfig, email: &str, password: &str, register: bool) -> Result<()> {
    let client = api_client(config);
    if register {
        client.register(email, password).await?;
    } else {
        client.login(email, password).await?;
    }
    println!("Logged in as {}", email);
    Ok(())
}

#[instrument(skip(config))]
async fn run_sync(config: &AppConfig) -> Result<()> {
    let service = SyncService::new(open_repository(config)?, api_client(config));
    match service.sync_all().await {
        Ok(report) => {
            println!("Uploaded {}, failed {}", report.uploaded, report.failed);
            Ok(())
        }
        Err(SyncError::Unauthorized) => {
            warn!("Sync requires login");
            println!("Not logged in. Run `tennis_scorer login` first.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
