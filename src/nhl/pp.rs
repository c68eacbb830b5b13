//! Power-play block reconstruction.
//!
//! The NHL feed does not report power-play intervals directly; they have to
//! be inferred by replaying the ordered play-by-play event log. This module
//! extracts penalty and goal events, cancels coinciding penalties, and runs a
//! single chronological pass that tracks which penalties are being served on
//! each bench to produce the intervals where one team holds a numerical
//! advantage.
//!
//! The pass is pure: it reads nothing but the payload and is deterministic
//! for a given event log.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cli::types::TeamId;
use crate::nhl::types::{PeriodDescriptor, PlayByPlay, GAME_TYPE_PLAYOFFS};
use crate::util::parse_clock;
use crate::Result;


/// Length of a regulation period in seconds.
pub const PERIOD_SECONDS: u32 = 1200;
/// Length of regular-season overtime in seconds.
pub const REGULAR_OT_SECONDS: u32 = 300;
/// Length of one minor-penalty segment in seconds.
const SEGMENT_SECONDS: u32 = 120;

/// Penalty classes that put a team short-handed.
///
/// Misconducts, game misconducts, and penalty shots are filtered out during
/// extraction: the penalized team keeps five skaters for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyKind {
    Minor,
    BenchMinor,
    DoubleMinor,
    /// Majors and match penalties. Never shortened by a goal.
    Major,
}

impl PenaltyKind {
    /// Default length in minutes when the feed omits `duration`.
    pub fn default_minutes(&self) -> u32 {
        match self {
            PenaltyKind::Minor | PenaltyKind::BenchMinor => 2,
            PenaltyKind::DoubleMinor => 4,
            PenaltyKind::Major => 5,
        }
    }
}

/// A penalty that creates (or stacks toward) a numerical advantage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyEvent {
    pub team: TeamId,
    /// Absolute game seconds at which the penalty was assessed.
    pub start: u32,
    pub kind: PenaltyKind,
    /// Full length in seconds.
    pub seconds: u32,
}

/// A goal, in absolute game seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalEvent {
    pub team: TeamId,
    pub time: u32,
}

/// Skater advantage during a block. Even-strength states (4v4, 3v3) from
/// coinciding penalties are not power plays and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    FiveOnFour,
    FiveOnThree,
    FourOnThree,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::FiveOnFour => write!(f, "5v4"),
            Strength::FiveOnThree => write!(f, "5v3"),
            Strength::FourOnThree => write!(f, "4v3"),
        }
    }
}

impl std::str::FromStr for Strength {
    type Err = crate::NhlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "5v4" => Ok(Strength::FiveOnFour),
            "5v3" => Ok(Strength::FiveOnThree),
            "4v3" => Ok(Strength::FourOnThree),
            _ => Err(crate::NhlError::InvalidValue {
                value: format!("unknown strength: {}", s),
            }),
        }
    }
}

/// Why a block closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockEnd {
    /// The penalty clock ran out.
    Expired,
    /// A power-play goal terminated a minor.
    Goal,
    /// Another penalty started and changed the strength.
    NewPenalty,
    /// The event log ended with the advantage still open.
    GameEnd,
}

impl fmt::Display for BlockEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockEnd::Expired => write!(f, "expired"),
            BlockEnd::Goal => write!(f, "goal"),
            BlockEnd::NewPenalty => write!(f, "new-penalty"),
            BlockEnd::GameEnd => write!(f, "game-end"),
        }
    }
}

impl std::str::FromStr for BlockEnd {
    type Err = crate::NhlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "expired" => Ok(BlockEnd::Expired),
            "goal" => Ok(BlockEnd::Goal),
            "new-penalty" => Ok(BlockEnd::NewPenalty),
            "game-end" => Ok(BlockEnd::GameEnd),
            _ => Err(crate::NhlError::InvalidValue {
                value: format!("unknown block end: {}", s),
            }),
        }
    }
}

/// A reconstructed interval during which `team` held a numerical advantage.
///
/// Blocks are split whenever the strength changes, so a 5v3 inside a longer
/// advantage shows up as three blocks (5v4, 5v3, 5v4). Times are absolute
/// game seconds and may span period boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerPlayBlock {
    pub team: TeamId,
    pub start: u32,
    pub end: u32,
    pub strength: Strength,
    /// Goals scored by the advantage team during the block.
    pub goals_for: u32,
    pub ended_by: BlockEnd,
}

impl PowerPlayBlock {
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// Absolute game seconds at which a period begins.
///
/// Regulation periods are 20 minutes. Regular-season overtime is 5 minutes
/// starting at 60:00; playoff overtimes are full periods.
pub fn period_start_seconds(period: u32, game_type: u8) -> u32 {
    let period = period.max(1);
    if game_type == GAME_TYPE_PLAYOFFS {
        return (period - 1) * PERIOD_SECONDS;
    }
    match period {
        1..=4 => (period - 1) * PERIOD_SECONDS,
        // Past regular-season OT lies the shootout; events there are
        // filtered out before this matters.
        _ => 3 * PERIOD_SECONDS + REGULAR_OT_SECONDS,
    }
}

/// Convert a period descriptor plus elapsed clock into absolute game seconds.
pub fn absolute_seconds(descriptor: &PeriodDescriptor, clock: &str, game_type: u8) -> Result<u32> {
    Ok(period_start_seconds(descriptor.number, game_type) + parse_clock(clock)?)
}

fn is_shootout(play_period: &PeriodDescriptor) -> bool {
    play_period.period_type.as_deref() == Some("SO")
}

/// Pull advantage-creating penalties out of the event log.
///
/// Plays without an owning team are skipped (partial feed rows show up in
/// live data). A missing `duration` falls back to the default length for the
/// penalty class; a missing `typeCode` is classified from the duration.
pub fn extract_penalty_events(pbp: &PlayByPlay) -> Result<Vec<PenaltyEvent>> {
    let mut penalties = Vec::new();

    for play in &pbp.plays {
        if play.type_desc_key != "penalty" || is_shootout(&play.period_descriptor) {
            continue;
        }
        let Some(details) = &play.details else {
            continue;
        };
        let Some(team) = details.event_owner_team_id else {
            continue;
        };

        let kind = match details.type_code.as_deref() {
            Some("MIN") => {
                if details.duration.unwrap_or(2) >= 4 {
                    PenaltyKind::DoubleMinor
                } else {
                    PenaltyKind::Minor
                }
            }
            Some("BEN") => PenaltyKind::BenchMinor,
            Some("MAJ") | Some("MAT") => PenaltyKind::Major,
            // Misconducts and penalty shots leave both teams at full strength.
            Some("MIS") | Some("GMIS") | Some("PS") => continue,
            Some(_) => continue,
            None => match details.duration {
                Some(m) if m >= 5 => PenaltyKind::Major,
                Some(4) => PenaltyKind::DoubleMinor,
                Some(_) | None => PenaltyKind::Minor,
            },
        };

        let minutes = details.duration.unwrap_or_else(|| kind.default_minutes());
        let start = absolute_seconds(&play.period_descriptor, &play.time_in_period, pbp.game_type)?;

        penalties.push(PenaltyEvent {
            team,
            start,
            kind,
            seconds: minutes * 60,
        });
    }

    penalties.sort_by_key(|p| p.start);
    Ok(penalties)
}

/// Pull goals (all strengths) out of the event log.
pub fn extract_goal_events(pbp: &PlayByPlay) -> Result<Vec<GoalEvent>> {
    let mut goals = Vec::new();

    for play in &pbp.plays {
        if play.type_desc_key != "goal" || is_shootout(&play.period_descriptor) {
            continue;
        }
        let Some(team) = play.details.as_ref().and_then(|d| d.event_owner_team_id) else {
            continue;
        };

        goals.push(GoalEvent {
            team,
            time: absolute_seconds(&play.period_descriptor, &play.time_in_period, pbp.game_type)?,
        });
    }

    goals.sort_by_key(|g| g.time);
    Ok(goals)
}

/// Cancel coinciding penalties.
///
/// Penalties of equal length assessed to both teams at the same timestamp
/// offset each other: the teams play 4-on-4 (or 3-on-3) and no advantage
/// exists. Matching is pairwise per duration, so a 2+2 against one team and
/// a lone 2 against the other cancels one pair and leaves a real power play.
pub fn cancel_coincident(mut penalties: Vec<PenaltyEvent>) -> Vec<PenaltyEvent> {
    penalties.sort_by_key(|p| p.start);

    let mut kept: Vec<PenaltyEvent> = Vec::with_capacity(penalties.len());
    let mut i = 0;
    while i < penalties.len() {
        let start = penalties[i].start;
        let mut j = i;
        while j < penalties.len() && penalties[j].start == start {
            j += 1;
        }

        let mut group: Vec<Option<PenaltyEvent>> =
            penalties[i..j].iter().cloned().map(Some).collect();
        for a in 0..group.len() {
            let Some(pa) = group[a].clone() else { continue };
            for b in (a + 1)..group.len() {
                let Some(pb) = group[b].clone() else { continue };
                if pa.team != pb.team && pa.seconds == pb.seconds {
                    group[a] = None;
                    group[b] = None;
                    break;
                }
            }
        }
        kept.extend(group.into_iter().flatten());

        i = j;
    }

    kept
}

/// A penalty currently being served.
///
/// `segment_end` tracks the end of the current 2-minute portion: for a minor
/// it equals `end`, for a double minor it starts 120 seconds in. A power-play
/// goal wipes out the remainder of the current portion only.
#[derive(Debug, Clone)]
struct Serving {
    team: TeamId,
    kind: PenaltyKind,
    started: u32,
    end: u32,
    segment_end: u32,
}

impl Serving {
    fn begin(team: TeamId, kind: PenaltyKind, now: u32, seconds: u32) -> Self {
        let end = now + seconds;
        let segment_end = match kind {
            PenaltyKind::Major => end,
            _ => (now + SEGMENT_SECONDS).min(end),
        };
        Serving {
            team,
            kind,
            started: now,
            end,
            segment_end,
        }
    }

    /// Apply a power-play goal at `now`. Returns `true` when the penalty is
    /// fully terminated.
    fn apply_goal(&mut self, now: u32) -> bool {
        debug_assert!(self.kind != PenaltyKind::Major);
        // Segments completed before the goal stay completed.
        while self.segment_end < self.end && self.segment_end <= now {
            self.segment_end = (self.segment_end + SEGMENT_SECONDS).min(self.end);
        }
        let remainder = self.end - self.segment_end;
        if remainder == 0 {
            return true;
        }
        // Double minor: the clock jumps to the start of the next segment.
        self.end = now + remainder;
        self.segment_end = (now + SEGMENT_SECONDS).min(self.end);
        false
    }
}

/// A penalty waiting for a bench slot (third concurrent penalty).
#[derive(Debug, Clone)]
struct Pending {
    team: TeamId,
    kind: PenaltyKind,
    seconds: u32,
}

/// Simulation state: serving and queued penalties for both teams.
struct BenchState {
    home: TeamId,
    away: TeamId,
    serving: Vec<Serving>,
    pending: Vec<Pending>,
}

impl BenchState {
    fn new(home: TeamId, away: TeamId) -> Self {
        BenchState {
            home,
            away,
            serving: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn serving_count(&self, team: TeamId) -> usize {
        self.serving.iter().filter(|s| s.team == team).count()
    }

    /// Current advantage, if any. A team serves at most two penalties at
    /// once, so skaters never drop below three.
    fn advantage(&self) -> Option<(TeamId, Strength)> {
        let home_serving = self.serving_count(self.home);
        let away_serving = self.serving_count(self.away);
        let (adv_team, adv_serving, short_serving) = match home_serving.cmp(&away_serving) {
            std::cmp::Ordering::Less => (self.home, home_serving, away_serving),
            std::cmp::Ordering::Greater => (self.away, away_serving, home_serving),
            std::cmp::Ordering::Equal => return None,
        };

        let strength = match (5 - adv_serving, 5 - short_serving) {
            (5, 4) => Strength::FiveOnFour,
            (5, 3) => Strength::FiveOnThree,
            (4, 3) => Strength::FourOnThree,
            // serving counts are clamped to 0..=2 per team
            _ => unreachable!("serving counts out of range"),
        };
        Some((adv_team, strength))
    }

    fn next_expiry(&self) -> Option<u32> {
        self.serving.iter().map(|s| s.end).min()
    }

    /// Start serving a penalty, or queue it when both slots are taken.
    fn assess(&mut self, penalty: &PenaltyEvent) {
        if self.serving_count(penalty.team) < 2 {
            self.serving.push(Serving::begin(
                penalty.team,
                penalty.kind,
                penalty.start,
                penalty.seconds,
            ));
        } else {
            self.pending.push(Pending {
                team: penalty.team,
                kind: penalty.kind,
                seconds: penalty.seconds,
            });
        }
    }

    /// Remove every penalty expiring exactly at `now`, then fill freed slots
    /// from the queue (stacked penalties start when a serving one ends).
    fn expire(&mut self, now: u32) {
        self.serving.retain(|s| s.end != now);
        self.promote(now);
    }

    fn promote(&mut self, now: u32) {
        for team in [self.home, self.away] {
            while self.serving_count(team) < 2 {
                let Some(pos) = self.pending.iter().position(|p| p.team == team) else {
                    break;
                };
                let p = self.pending.remove(pos);
                self.serving
                    .push(Serving::begin(p.team, p.kind, now, p.seconds));
            }
        }
    }

    /// Apply a power-play goal against `team`: the earliest-started serving
    /// minor (or bench minor / double-minor segment) comes off. Majors are
    /// never shortened. Returns `true` when the bench state changed.
    fn goal_against(&mut self, team: TeamId, now: u32) -> bool {
        let target = self
            .serving
            .iter()
            .enumerate()
            .filter(|(_, s)| s.team == team && s.kind != PenaltyKind::Major)
            .min_by_key(|(_, s)| s.started)
            .map(|(idx, _)| idx);

        let Some(idx) = target else {
            return false;
        };

        if self.serving[idx].apply_goal(now) {
            self.serving.remove(idx);
            self.promote(now);
            true
        } else {
            // Double minor lost its current segment but keeps serving.
            false
        }
    }
}

/// Tracks the currently open block across state transitions.
struct BlockTracker {
    open: Option<PowerPlayBlock>,
    blocks: Vec<PowerPlayBlock>,
}

impl BlockTracker {
    fn new() -> Self {
        BlockTracker {
            open: None,
            blocks: Vec::new(),
        }
    }

    fn record_goal(&mut self, team: TeamId) {
        if let Some(block) = self.open.as_mut() {
            if block.team == team {
                block.goals_for += 1;
            }
        }
    }

    /// Close/open blocks as needed when the bench state may have changed.
    fn transition(&mut self, now: u32, state: Option<(TeamId, Strength)>, reason: BlockEnd) {
        let current = self.open.as_ref().map(|b| (b.team, b.strength));
        if current == state {
            return;
        }

        if let Some(mut block) = self.open.take() {
            block.end = now;
            block.ended_by = reason;
            if block.end > block.start {
                self.blocks.push(block);
            } else if block.goals_for > 0 {
                // A goal landed in the instant between an expiry and the
                // termination it caused. The block has no width, but the goal
                // belongs to the advantage that just closed at this second.
                if let Some(last) = self
                    .blocks
                    .last_mut()
                    .filter(|b| b.team == block.team && b.end == block.start)
                {
                    last.goals_for += block.goals_for;
                }
            }
        }

        if let Some((team, strength)) = state {
            self.open = Some(PowerPlayBlock {
                team,
                start: now,
                end: now,
                strength,
                goals_for: 0,
                ended_by: reason,
            });
        }
    }

    fn finish(mut self, horizon: u32) -> Vec<PowerPlayBlock> {
        self.transition(horizon, None, BlockEnd::GameEnd);
        self.blocks
    }
}

/// Replay the event log and reconstruct all power-play blocks.
///
/// Event ordering at identical timestamps: expiries first, then goals, then
/// new penalties. A goal at the exact second a penalty expires therefore does
/// not terminate the next one, and a penalty assessed on a goal play (delayed
/// call) is not wiped out by that goal.
pub fn reconstruct_power_plays(pbp: &PlayByPlay) -> Result<Vec<PowerPlayBlock>> {
    let penalties = cancel_coincident(extract_penalty_events(pbp)?);
    let goals = extract_goal_events(pbp)?;
    let horizon = game_horizon(pbp)?;

    let mut state = BenchState::new(pbp.home_team.id, pbp.away_team.id);
    let mut tracker = BlockTracker::new();

    let mut next_penalty = 0usize;
    let mut next_goal = 0usize;

    loop {
        // (time, tie-break rank): expiry 0, goal 1, penalty start 2
        let mut candidate: Option<(u32, u8)> = None;
        let mut consider = |time: Option<u32>, rank: u8| {
            if let Some(t) = time {
                if t <= horizon && candidate.map_or(true, |(ct, cr)| (t, rank) < (ct, cr)) {
                    candidate = Some((t, rank));
                }
            }
        };
        consider(state.next_expiry(), 0);
        consider(goals.get(next_goal).map(|g| g.time), 1);
        consider(penalties.get(next_penalty).map(|p| p.start), 2);

        let Some((now, rank)) = candidate else {
            break;
        };

        match rank {
            0 => {
                state.expire(now);
                tracker.transition(now, state.advantage(), BlockEnd::Expired);
            }
            1 => {
                let goal = goals[next_goal];
                next_goal += 1;
                tracker.record_goal(goal.team);

                let opponent = if goal.team == pbp.home_team.id {
                    pbp.away_team.id
                } else {
                    pbp.home_team.id
                };
                // Only a goal at numerical advantage terminates a penalty.
                if state.serving_count(opponent) > state.serving_count(goal.team)
                    && state.goal_against(opponent, now)
                {
                    tracker.transition(now, state.advantage(), BlockEnd::Goal);
                }
            }
            _ => {
                let penalty = &penalties[next_penalty];
                next_penalty += 1;
                state.assess(penalty);
                tracker.transition(now, state.advantage(), BlockEnd::NewPenalty);
            }
        }
    }

    Ok(tracker.finish(horizon))
}

/// Last observable moment of the game: the maximum absolute timestamp in the
/// event log (shootout excluded). Blocks never extend past it.
fn game_horizon(pbp: &PlayByPlay) -> Result<u32> {
    let mut horizon = 0u32;
    for play in &pbp.plays {
        if is_shootout(&play.period_descriptor) {
            continue;
        }
        let t = absolute_seconds(&play.period_descriptor, &play.time_in_period, pbp.game_type)?;
        horizon = horizon.max(t);
    }
    if horizon == 0 {
        horizon = 3 * PERIOD_SECONDS;
    }
    Ok(horizon)
}
