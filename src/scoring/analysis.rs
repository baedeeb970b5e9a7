//! Post-match analysis built on replaying the point log.
//!
//! [`replay_with_context`] walks the log once and records, for every point,
//! the score it was played at and what was at stake. Momentum, pace and
//! per-side statistics are all computed from that context list.

use super::config::MatchConfig;
use super::rules::{MatchScore, PointOutcome};
use super::types::{GameState, PerSide, PointEvent, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Weight of a point that could end a set.
const SET_POINT_WEIGHT: f64 = 5.0;
/// Weight of a point played from deuce or advantage.
const DEUCE_WEIGHT: f64 = 1.5;

/// A point together with the score it was played at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointContext {
    /// 1-based position in the log.
    pub point_number: u32,
    /// Side that won the point.
    pub scorer: Side,
    /// When the point was recorded.
    pub timestamp: DateTime<Utc>,
    /// 1-based set the point belongs to.
    pub set_number: usize,
    /// 1-based game within the set.
    pub game_number_in_set: usize,
    /// Whether the point was played in a tiebreak.
    pub is_tiebreak: bool,
    /// Score immediately before the point.
    pub score_before: MatchScore,
    /// Sides that would have won the game by winning this point.
    pub game_point: PerSide<bool>,
    /// Sides that would have won the set by winning this point.
    pub set_point: PerSide<bool>,
    /// Sides that would have won the match by winning this point.
    pub match_point: PerSide<bool>,
    /// What the point actually did.
    pub outcome: PointOutcome,
}

impl PointContext {
    /// Whether either side had a game point.
    pub fn is_game_point(&self) -> bool {
        self.game_point.one || self.game_point.two
    }

    /// Whether either side had a set point.
    pub fn is_set_point(&self) -> bool {
        self.set_point.one || self.set_point.two
    }

    /// Whether either side had a match point.
    pub fn is_match_point(&self) -> bool {
        self.match_point.one || self.match_point.two
    }

    /// Whether the point was played at 40-40, deuce or advantage.
    pub fn is_deuce_point(&self) -> bool {
        if self.is_tiebreak {
            return false;
        }
        matches!(
            self.score_before.current_game(),
            GameState::Deuce | GameState::Advantage(_) | GameState::Playing { one: 3, two: 3 }
        )
    }

    /// Key identifying the game this point belongs to.
    fn game_key(&self) -> (usize, usize) {
        (self.set_number, self.game_number_in_set)
    }
}

/// Replays `events` and annotates every point with its context.
///
/// Points logged after the match was decided are not included.
#[instrument(skip_all, fields(events = events.len()))]
pub fn replay_with_context(config: &MatchConfig, events: &[PointEvent]) -> Vec<PointContext> {
    let mut score = MatchScore::new();
    let mut contexts = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        if score.is_complete() {
            debug!(skipped = events.len() - index, "Ignoring points after match end");
            break;
        }

        let mut game_point = PerSide::new(false, false);
        let mut set_point = PerSide::new(false, false);
        let mut match_point = PerSide::new(false, false);
        for side in Side::BOTH {
            let mut lookahead = score.clone();
            let outcome = lookahead.apply(config, side);
            game_point[side] = outcome.ends_game();
            set_point[side] = outcome.ends_set();
            match_point[side] = outcome == PointOutcome::Match;
        }

        let games = score.current_set_games();
        let score_before = score.clone();
        let outcome = score.apply(config, event.side);

        contexts.push(PointContext {
            point_number: index as u32 + 1,
            scorer: event.side,
            timestamp: event.timestamp,
            set_number: score_before.set_number(),
            game_number_in_set: usize::from(games.one) + usize::from(games.two) + 1,
            is_tiebreak: score_before.is_tiebreak(),
            score_before,
            game_point,
            set_point,
            match_point,
            outcome,
        });
    }

    contexts
}

/// Cumulative point-difference series from [`Side::One`]'s point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    /// +1 per point won by side one, -1 per point won by side two.
    pub basic: Vec<f64>,
    /// As `basic`, with big points weighted up.
    pub weighted: Vec<f64>,
    /// `basic` restarted at zero for each set.
    pub per_set_basic: Vec<Vec<f64>>,
    /// `weighted` restarted at zero for each set.
    pub per_set_weighted: Vec<Vec<f64>>,
}

fn point_weight(point: &PointContext) -> f64 {
    let mut weight = 1.0;
    if point.is_set_point() {
        weight *= SET_POINT_WEIGHT;
    }
    if point.is_deuce_point() {
        weight *= DEUCE_WEIGHT;
    }
    weight
}

fn sign(side: Side) -> f64 {
    match side {
        Side::One => 1.0,
        Side::Two => -1.0,
    }
}

/// Computes momentum series from replayed points.
#[instrument(skip_all, fields(points = points.len()))]
pub fn compute_momentum(points: &[PointContext]) -> Momentum {
    let mut momentum = Momentum::default();
    let (mut basic, mut weighted) = (0.0, 0.0);
    let (mut set_basic, mut set_weighted) = (0.0, 0.0);
    let mut current_set = None;

    for point in points {
        if current_set != Some(point.set_number) {
            current_set = Some(point.set_number);
            momentum.per_set_basic.push(Vec::new());
            momentum.per_set_weighted.push(Vec::new());
            set_basic = 0.0;
            set_weighted = 0.0;
        }

        let delta = sign(point.scorer);
        let weighted_delta = delta * point_weight(point);
        basic += delta;
        weighted += weighted_delta;
        set_basic += delta;
        set_weighted += weighted_delta;

        momentum.basic.push(basic);
        momentum.weighted.push(weighted);
        if let Some(series) = momentum.per_set_basic.last_mut() {
            series.push(set_basic);
        }
        if let Some(series) = momentum.per_set_weighted.last_mut() {
            series.push(set_weighted);
        }
    }

    momentum
}

/// Time spent on one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDuration {
    /// 1-based set.
    pub set_number: usize,
    /// 1-based game within the set.
    pub game_number: usize,
    /// Seconds from the game's first point to its last.
    pub seconds: f64,
}

/// Time spent on one set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDuration {
    /// 1-based set.
    pub set_number: usize,
    /// Seconds from the set's first point to its last.
    pub seconds: f64,
}

/// Timing summary of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Seconds between consecutive points.
    pub point_intervals: Vec<f64>,
    /// Mean of `point_intervals`, or zero.
    pub average_interval: f64,
    /// Seconds from the first point to the last.
    pub total_duration: f64,
    /// Duration of every game played.
    pub per_game: Vec<GameDuration>,
    /// Duration of every set played.
    pub per_set: Vec<SetDuration>,
}

/// Non-negative seconds from `start` to `end`.
fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis as f64 / 1000.0
}

/// Computes pace figures from replayed points.
#[instrument(skip_all, fields(points = points.len()))]
pub fn compute_pace(points: &[PointContext]) -> Pace {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Pace::default();
    };

    let point_intervals: Vec<f64> = points
        .windows(2)
        .map(|pair| seconds_between(pair[0].timestamp, pair[1].timestamp))
        .collect();
    let average_interval = if point_intervals.is_empty() {
        0.0
    } else {
        point_intervals.iter().sum::<f64>() / point_intervals.len() as f64
    };

    let per_game = points
        .chunk_by(|a, b| a.game_key() == b.game_key())
        .filter_map(|game| {
            let (start, end) = (game.first()?, game.last()?);
            Some(GameDuration {
                set_number: start.set_number,
                game_number: start.game_number_in_set,
                seconds: seconds_between(start.timestamp, end.timestamp),
            })
        })
        .collect();

    let per_set = points
        .chunk_by(|a, b| a.set_number == b.set_number)
        .filter_map(|set| {
            let (start, end) = (set.first()?, set.last()?);
            Some(SetDuration {
                set_number: start.set_number,
                seconds: seconds_between(start.timestamp, end.timestamp),
            })
        })
        .collect();

    Pace {
        point_intervals,
        average_interval,
        total_duration: seconds_between(first.timestamp, last.timestamp),
        per_game,
        per_set,
    }
}

/// Chances at a big point and how many were taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Points at which this side could have closed it out.
    pub chances: u32,
    /// Chances this side won.
    pub converted: u32,
}

impl Conversion {
    fn record(&mut self, chance: bool, won: bool) {
        if chance {
            self.chances += 1;
            if won {
                self.converted += 1;
            }
        }
    }

    /// Fraction of chances converted, zero when there were none.
    pub fn rate(&self) -> f64 {
        if self.chances == 0 {
            0.0
        } else {
            f64::from(self.converted) / f64::from(self.chances)
        }
    }
}

/// Per-side match statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    /// Points won.
    pub points_won: u32,
    /// Longest run of consecutive points won.
    pub longest_point_streak: u32,
    /// Longest run of consecutive points lost.
    pub longest_point_drought: u32,
    /// Longest run of consecutive games won.
    pub most_games_in_a_row: u32,
    /// Game points held and converted.
    pub game_points: Conversion,
    /// Set points held and converted.
    pub set_points: Conversion,
    /// Match points held and converted.
    pub match_points: Conversion,
    /// Points with no set at stake for either side: `chances` counts them,
    /// `converted` the ones this side won.
    pub normal_points: Conversion,
    /// Games reaching 40-40 that this side won.
    pub deuce_games_won: u32,
    /// Tiebreaks this side won.
    pub tiebreaks_won: u32,
}

impl SideStats {
    /// Share of own set points won.
    pub fn set_point_win_rate(&self) -> f64 {
        self.set_points.rate()
    }

    /// Share of own match points won.
    pub fn match_point_win_rate(&self) -> f64 {
        self.match_points.rate()
    }

    /// Share of points won when no set was at stake.
    pub fn normal_point_win_rate(&self) -> f64 {
        self.normal_points.rate()
    }
}

/// Statistics for both sides plus shared counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Points played.
    pub total_points: u32,
    /// Games that reached 40-40.
    pub deuce_games: u32,
    /// Times deuce was reached, summed over all games.
    pub total_deuce_count: u32,
    /// `total_deuce_count` over `deuce_games`, or zero.
    pub average_deuces_per_deuce_game: f64,
    /// Tiebreaks completed.
    pub tiebreaks: u32,
    /// Mean winning margin of completed tiebreaks, or zero.
    pub average_tiebreak_margin: f64,
    /// Per-side figures.
    pub sides: PerSide<SideStats>,
}

fn average(total: u32, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(count)
    }
}

/// Final margin of the tiebreak decided by `point`.
fn tiebreak_margin(point: &PointContext) -> u32 {
    let GameState::Playing { one, two } = point.score_before.current_game() else {
        return 0;
    };
    let before = PerSide::new(one, two);
    let winner = u32::from(before[point.scorer]) + 1;
    winner.saturating_sub(u32::from(before[point.scorer.opponent()]))
}

/// Computes per-side statistics from replayed points.
#[instrument(skip_all, fields(points = points.len()))]
pub fn compute_stats(points: &[PointContext]) -> MatchStats {
    let mut stats = MatchStats {
        total_points: points.len() as u32,
        ..MatchStats::default()
    };

    let mut streak = PerSide::new(0u32, 0u32);
    for point in points {
        let scorer = point.scorer;
        let side = &mut stats.sides[scorer];
        side.points_won += 1;
        streak[scorer] += 1;
        streak[scorer.opponent()] = 0;
        side.longest_point_streak = side.longest_point_streak.max(streak[scorer]);

        for side in Side::BOTH {
            let won = scorer == side;
            let entry = &mut stats.sides[side];
            entry.game_points.record(point.game_point[side], won);
            entry.set_points.record(point.set_point[side], won);
            entry.match_points.record(point.match_point[side], won);
            entry.normal_points.record(!point.is_set_point(), won);
        }
    }
    // Every point one side wins is one the other loses.
    stats.sides.one.longest_point_drought = stats.sides.two.longest_point_streak;
    stats.sides.two.longest_point_drought = stats.sides.one.longest_point_streak;

    // Games that finished, keyed by position, with their winner.
    let mut game_winners: BTreeMap<(usize, usize), Side> = BTreeMap::new();
    // Deuce games in order, with the most deuces seen in each.
    let mut deuce_games: Vec<((usize, usize), u8)> = Vec::new();
    let mut tiebreak_margin_total = 0u32;
    for point in points {
        if point.outcome.ends_game() {
            game_winners.insert(point.game_key(), point.scorer);
            if point.is_tiebreak {
                stats.tiebreaks += 1;
                stats.sides[point.scorer].tiebreaks_won += 1;
                tiebreak_margin_total += tiebreak_margin(point);
            }
        }
        if point.is_deuce_point() {
            let deuces = point.score_before.deuce_count();
            match deuce_games.last_mut() {
                Some((key, most)) if *key == point.game_key() => *most = (*most).max(deuces),
                _ => deuce_games.push((point.game_key(), deuces)),
            }
        }
    }

    stats.deuce_games = deuce_games.len() as u32;
    for (key, deuces) in &deuce_games {
        stats.total_deuce_count += u32::from(*deuces);
        if let Some(winner) = game_winners.get(key) {
            stats.sides[*winner].deuce_games_won += 1;
        }
    }
    stats.average_deuces_per_deuce_game = average(stats.total_deuce_count, stats.deuce_games);
    stats.average_tiebreak_margin = average(tiebreak_margin_total, stats.tiebreaks);

    let mut run = PerSide::new(0u32, 0u32);
    for winner in game_winners.values() {
        run[*winner] += 1;
        run[winner.opponent()] = 0;
        let side = &mut stats.sides[*winner];
        side.most_games_in_a_row = side.most_games_in_a_row.max(run[*winner]);
    }

    debug!(
        deuce_games = stats.deuce_games,
        tiebreaks = stats.tiebreaks,
        "Match stats computed"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use Side::{One, Two};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0)
            .single()
            .expect("Valid timestamp")
    }

    /// Events thirty seconds apart.
    fn log(sides: &[Side]) -> Vec<PointEvent> {
        sides
            .iter()
            .enumerate()
            .map(|(i, side)| PointEvent::new(*side, i as u32 + 1, at(i as i64 * 30)))
            .collect()
    }

    fn game(side: Side) -> Vec<Side> {
        vec![side; 4]
    }

    #[test]
    fn test_context_numbers_points_and_games() {
        let mut sides = game(One);
        sides.extend([Two, Two]);
        let contexts = replay_with_context(&MatchConfig::default(), &log(&sides));

        assert_eq!(contexts.len(), 6);
        assert_eq!(contexts[0].point_number, 1);
        assert_eq!(contexts[0].game_number_in_set, 1);
        assert_eq!(contexts[3].outcome, PointOutcome::Game);
        assert_eq!(contexts[4].game_number_in_set, 2);
        assert_eq!(contexts[4].set_number, 1);
        assert_eq!(
            contexts[5].score_before.current_game(),
            GameState::Playing { one: 0, two: 1 }
        );
    }

    #[test]
    fn test_game_point_detection() {
        let contexts = replay_with_context(&MatchConfig::default(), &log(&game(One)));
        assert!(!contexts[2].is_game_point());
        assert_eq!(contexts[3].game_point, PerSide::new(true, false));
        assert!(!contexts[3].is_set_point());
    }

    #[test]
    fn test_set_and_match_point_detection() {
        let config = MatchConfig::default().with_sets_to_win(1);
        let sides: Vec<Side> = (0..6).flat_map(|_| game(One)).collect();
        let contexts = replay_with_context(&config, &log(&sides));

        let last = contexts.last().expect("Has points");
        assert_eq!(last.set_point, PerSide::new(true, false));
        assert_eq!(last.match_point, PerSide::new(true, false));
        assert_eq!(last.outcome, PointOutcome::Match);
    }

    #[test]
    fn test_points_after_match_excluded() {
        let config = MatchConfig::default().with_sets_to_win(1);
        let mut sides: Vec<Side> = (0..6).flat_map(|_| game(Two)).collect();
        sides.extend([One, One]);
        let contexts = replay_with_context(&config, &log(&sides));
        assert_eq!(contexts.len(), 24);
    }

    #[test]
    fn test_tiebreak_points_flagged() {
        let mut sides = Vec::new();
        for _ in 0..6 {
            sides.extend(game(One));
            sides.extend(game(Two));
        }
        sides.extend([One; 7]);
        let stats_input = replay_with_context(&MatchConfig::default(), &log(&sides));

        assert!(stats_input[48].is_tiebreak);
        assert_eq!(stats_input[48].game_number_in_set, 13);
        let last = stats_input.last().expect("Has points");
        assert_eq!(last.outcome, PointOutcome::Set);

        let stats = compute_stats(&stats_input);
        assert_eq!(stats.tiebreaks, 1);
        assert_eq!(stats.sides.one.tiebreaks_won, 1);
        assert_eq!(stats.average_tiebreak_margin, 7.0);

        // The only set point is side one's at 6-0 in the tiebreak.
        let one = &stats.sides.one;
        assert_eq!(one.set_points, Conversion { chances: 1, converted: 1 });
        assert_eq!(one.set_point_win_rate(), 1.0);
        assert_eq!(stats.sides.two.set_point_win_rate(), 0.0);
        assert_eq!(one.normal_points, Conversion { chances: 54, converted: 30 });
        assert_eq!(stats.sides.two.normal_points.converted, 24);
    }

    #[test]
    fn test_tiebreak_margin_after_close_tiebreak() {
        let mut sides = Vec::new();
        for _ in 0..6 {
            sides.extend(game(One));
            sides.extend(game(Two));
        }
        // 6-6 in the tiebreak, then side two takes two in a row: 8-6.
        for _ in 0..6 {
            sides.extend([One, Two]);
        }
        sides.extend([Two, Two]);
        let stats = compute_stats(&replay_with_context(&MatchConfig::default(), &log(&sides)));

        assert_eq!(stats.tiebreaks, 1);
        assert_eq!(stats.sides.two.tiebreaks_won, 1);
        assert_eq!(stats.average_tiebreak_margin, 2.0);
    }

    #[test]
    fn test_match_point_win_rate() {
        let config = MatchConfig::default().with_sets_to_win(1);
        let mut sides: Vec<Side> = (0..5).flat_map(|_| game(One)).collect();
        // 40-0 at 5-0: match point saved, then converted at 40-15.
        sides.extend([One, One, One, Two, One]);
        let stats = compute_stats(&replay_with_context(&config, &log(&sides)));

        let one = &stats.sides.one;
        assert_eq!(one.match_points, Conversion { chances: 2, converted: 1 });
        assert_eq!(one.match_point_win_rate(), 0.5);
        assert_eq!(stats.sides.two.match_point_win_rate(), 0.0);
    }

    #[test]
    fn test_basic_momentum() {
        let contexts = replay_with_context(&MatchConfig::default(), &log(&[One, Two, One, One]));
        let momentum = compute_momentum(&contexts);
        assert_eq!(momentum.basic, vec![1.0, 0.0, 1.0, 2.0]);
        assert_eq!(momentum.per_set_basic, vec![vec![1.0, 0.0, 1.0, 2.0]]);
    }

    #[test]
    fn test_momentum_restarts_each_set() {
        let config = MatchConfig::default();
        let mut sides: Vec<Side> = (0..6).flat_map(|_| game(One)).collect();
        sides.extend([Two, Two]);
        let momentum = compute_momentum(&replay_with_context(&config, &log(&sides)));

        assert_eq!(momentum.per_set_basic.len(), 2);
        assert_eq!(momentum.per_set_basic[0].last(), Some(&24.0));
        assert_eq!(momentum.per_set_basic[1], vec![-1.0, -2.0]);
        assert_eq!(momentum.basic.last(), Some(&22.0));
    }

    #[test]
    fn test_weighted_momentum_deuce_and_set_point() {
        let config = MatchConfig::default().with_sets_to_win(1);
        // 40-40 then side one wins two points: both played from deuce.
        let contexts = replay_with_context(&config, &log(&[One, One, One, Two, Two, Two, One, One]));
        let momentum = compute_momentum(&contexts);
        assert_eq!(momentum.weighted[5], 0.0);
        assert_eq!(momentum.weighted[6], 1.5);
        assert_eq!(momentum.weighted[7], 3.0);

        // At 5-0, 40-0 the next point is a set point worth five.
        let mut sides: Vec<Side> = (0..5).flat_map(|_| game(One)).collect();
        sides.extend([One, One, One, Two]);
        let contexts = replay_with_context(&config, &log(&sides));
        let momentum = compute_momentum(&contexts);
        let len = momentum.weighted.len();
        assert_eq!(momentum.weighted[len - 1] - momentum.weighted[len - 2], -5.0);
    }

    #[test]
    fn test_pace() {
        let mut sides = game(One);
        sides.extend([Two, Two]);
        let pace = compute_pace(&replay_with_context(&MatchConfig::default(), &log(&sides)));

        assert_eq!(pace.point_intervals, vec![30.0; 5]);
        assert_eq!(pace.average_interval, 30.0);
        assert_eq!(pace.total_duration, 150.0);
        assert_eq!(pace.per_game.len(), 2);
        assert_eq!(pace.per_game[0].seconds, 90.0);
        assert_eq!(pace.per_game[1].seconds, 30.0);
        assert_eq!(pace.per_set.len(), 1);
        assert_eq!(pace.per_set[0].seconds, 150.0);
    }

    #[test]
    fn test_pace_empty_and_single() {
        assert_eq!(compute_pace(&[]), Pace::default());
        let pace = compute_pace(&replay_with_context(&MatchConfig::default(), &log(&[One])));
        assert!(pace.point_intervals.is_empty());
        assert_eq!(pace.average_interval, 0.0);
        assert_eq!(pace.total_duration, 0.0);
        assert_eq!(pace.per_game.len(), 1);
    }

    #[test]
    fn test_stats_streaks_and_conversion() {
        let mut sides = game(One);
        sides.extend(game(One));
        sides.extend([Two, Two, Two, One, One, One, Two, One, One, One]);
        let stats = compute_stats(&replay_with_context(&MatchConfig::default(), &log(&sides)));
        let one = &stats.sides.one;
        let two = &stats.sides.two;

        assert_eq!(stats.total_points, 18);
        assert_eq!(one.points_won, 14);
        assert_eq!(two.points_won, 4);
        assert_eq!(one.longest_point_streak, 8);
        assert_eq!(one.longest_point_drought, 3);
        assert_eq!(two.longest_point_drought, 8);
        assert_eq!(one.most_games_in_a_row, 3);
        assert_eq!(two.most_games_in_a_row, 0);

        // Two games at 40-0, then Ad in the deuce game.
        assert_eq!(one.game_points, Conversion { chances: 3, converted: 3 });
        // Side two led 40-0, 40-15, 40-30 and had Ad once, winning none.
        assert_eq!(two.game_points, Conversion { chances: 4, converted: 0 });
        assert_eq!(two.game_points.rate(), 0.0);

        assert_eq!(stats.deuce_games, 1);
        assert_eq!(one.deuce_games_won, 1);
        // Deuce, Ad two, deuce again: reached twice.
        assert_eq!(stats.total_deuce_count, 2);
        assert_eq!(stats.average_deuces_per_deuce_game, 2.0);

        // No set was ever at stake.
        assert_eq!(one.normal_points, Conversion { chances: 18, converted: 14 });
        assert_eq!(two.normal_point_win_rate(), 4.0 / 18.0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.average_deuces_per_deuce_game, 0.0);
        assert_eq!(stats.average_tiebreak_margin, 0.0);
        assert_eq!(stats.sides.one.longest_point_drought, 0);
        assert_eq!(stats.sides.one.normal_point_win_rate(), 0.0);
    }
}
