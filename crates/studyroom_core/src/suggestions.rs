//! crates/studyroom_core/src/suggestions.rs
//!
//! The suggestion ranking engine: scores already-accessible rooms with an
//! additive heuristic and keeps the top few as "suggested for you".
//!
//! The weights live in [`weight`] as named constants so the policy can be
//! audited and tested in isolation. `now` is an explicit argument; repeated
//! calls with identical inputs return identical output.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Room, RoomKind, RoomStatus};

/// How many suggestions a caller gets unless it asks otherwise.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// The scoring policy table. Higher totals win; a total of exactly zero means
/// "no signal" and drops the room from the output.
pub mod weight {
    /// A live mentor-led (complement) session dominates everything else.
    pub const MENTOR_LIVE: f64 = 1000.0;
    /// Per buddy currently in the room.
    pub const BUDDY_PRESENT: f64 = 100.0;
    /// Per active participant in a live room.
    pub const LIVE_PARTICIPANT: f64 = 20.0;
    /// Extra for a live room that is interactive rather than silent.
    pub const LIVE_INTERACTIVE_BONUS: f64 = 50.0;

    /// Mentor session about to start: `MENTOR_STARTING_BASE - secs / MENTOR_STARTING_DECAY`,
    /// considered within the hour before start and floored at zero.
    pub const MENTOR_STARTING_BASE: f64 = 500.0;
    pub const MENTOR_STARTING_DECAY: f64 = 2.0;
    pub const MENTOR_STARTING_WINDOW_SECS: i64 = 3_600;

    /// Ordinary scheduled room about to start, same shape over a 30 minute window.
    pub const STARTING_BASE: f64 = 200.0;
    pub const STARTING_DECAY: f64 = 2.5;
    pub const STARTING_WINDOW_SECS: i64 = 1_800;
}

/// Scores one room against the policy table.
///
/// A participant counts as a buddy when the snapshot flagged them or the
/// caller's buddy set contains them. Time-proximity terms clamp at zero so a
/// room far from its start never scores below what its other terms earned.
pub fn score_room(room: &Room, buddies: &HashSet<Uuid>, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    if room.is_complement && room.status == RoomStatus::Live {
        score += weight::MENTOR_LIVE;
    }

    let buddy_count = room
        .active_participants()
        .filter(|p| p.is_buddy || buddies.contains(&p.user_id))
        .count();
    score += weight::BUDDY_PRESENT * buddy_count as f64;

    if room.status == RoomStatus::Live {
        score += weight::LIVE_PARTICIPANT * room.active_participants().count() as f64;
        if room.kind == RoomKind::Interactive {
            score += weight::LIVE_INTERACTIVE_BONUS;
        }
    }

    if room.status == RoomStatus::Scheduled {
        let seconds_until_start = (room.starts_at - now).num_seconds();
        let (base, decay, window) = if room.is_complement {
            (
                weight::MENTOR_STARTING_BASE,
                weight::MENTOR_STARTING_DECAY,
                weight::MENTOR_STARTING_WINDOW_SECS,
            )
        } else {
            (
                weight::STARTING_BASE,
                weight::STARTING_DECAY,
                weight::STARTING_WINDOW_SECS,
            )
        };
        if (0..=window).contains(&seconds_until_start) {
            let term = base - seconds_until_start as f64 / decay;
            score += term.max(0.0);
        }
    }

    score
}

/// Ranks accessible rooms into at most `max_results` suggestions.
///
/// Rooms the user currently sits in are skipped (a participant entry with no
/// `left_at`); rooms scoring zero are dropped; the rest sort by score
/// descending, with ties keeping the original pool order.
pub fn rank_suggestions(
    accessible_rooms: &[Room],
    user_id: Uuid,
    buddies: &HashSet<Uuid>,
    now: DateTime<Utc>,
    max_results: usize,
) -> Vec<Room> {
    let mut scored: Vec<(&Room, f64)> = accessible_rooms
        .iter()
        .filter(|room| !room.has_active_member(user_id))
        .map(|room| (room, score_room(room, buddies, now)))
        .filter(|(_, score)| *score > 0.0)
        .collect();

    // Stable sort keeps pool order for equal scores, which makes the output
    // deterministic for identical inputs.
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    scored
        .into_iter()
        .take(max_results)
        .map(|(room, _)| room.clone())
        .collect()
}
