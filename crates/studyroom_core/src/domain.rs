//! crates/studyroom_core/src/domain.rs
//!
//! Defines the pure, core data structures for the platform.
//! These records arrive from the hosting application as already-validated,
//! JSON-shaped snapshots; nothing in here touches storage or the network.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Courses and Purchases
//=========================================================================================

/// A single lesson within a course.
///
/// `is_owned` is the lesson-level ownership flag carried by the catalog feed.
/// It is honored alongside purchase-set membership when resolving access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub is_owned: bool,
}

/// A purchasable course, optionally part of a bundle ("pack").
///
/// `total_lessons` may exceed the number of listed lessons (e.g. a partially
/// loaded catalog entry); it must never be smaller, and the resolver treats a
/// smaller value as malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub pack_id: Option<String>,
    pub lessons: Vec<Lesson>,
    pub total_lessons: u32,
}

/// The set of opaque tokens a user has unlocked.
///
/// Tokens take one of three forms: `course-<id>` (full course), `pack-<id>`
/// (bundle), or a bare lesson id. A token implies nothing beyond what it
/// explicitly encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseSet(HashSet<String>);

impl PurchaseSet {
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        self.0.insert(token.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for PurchaseSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for PurchaseSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}

//=========================================================================================
// Access Records
//=========================================================================================

/// How a user came to hold (or not hold) full access to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// A course token, legacy bare course id, or pack token matched.
    FullCourse,
    /// Every lesson of the course is individually owned.
    AllLessonsIndividually,
    /// Anything less than the above, including zero ownership.
    Partial,
}

/// The resolved entitlement of one user for one course.
///
/// Invariant: `has_full_access` is true iff `access_reason` is `FullCourse`
/// or `AllLessonsIndividually`. Safe to cache per (user, course) until the
/// user's `PurchaseSet` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub user_id: Uuid,
    pub course_id: String,
    pub has_full_access: bool,
    pub owned_lesson_ids: BTreeSet<String>,
    pub total_lessons: u32,
    pub access_reason: AccessReason,
}

//=========================================================================================
// Study Rooms
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Scheduled,
    Live,
    Ended,
    Cancelled,
}

/// A presentation/grouping hint for the caller. The accessibility filter does
/// not enforce visibility; only the allow-list is a hard gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomVisibility {
    Public,
    BuddiesOnly,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Silent,
    Interactive,
}

/// A user's membership in a room. Leaving soft-deletes the entry via
/// `left_at`; participant history is never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: Uuid,
    pub is_buddy: bool,
    pub left_at: Option<DateTime<Utc>>,
}

/// A scheduled or live collaborative session, optionally scoped to a course.
///
/// Rooms without a `course_id` are unlinked and open to everyone.
/// `is_complement` marks a privileged mentor-led session, which dominates
/// ordinary rooms in suggestion ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub course_id: Option<String>,
    pub name: String,
    pub requires_full_access: bool,
    pub allowed_user_ids: Option<Vec<Uuid>>,
    pub visibility: RoomVisibility,
    pub status: RoomStatus,
    pub starts_at: DateTime<Utc>,
    pub kind: RoomKind,
    pub is_complement: bool,
    pub participants: Vec<Participant>,
}

impl Room {
    /// Participants currently in the room (no `left_at` marker).
    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.left_at.is_none())
    }

    /// Whether the user is currently in the room.
    pub fn has_active_member(&self, user_id: Uuid) -> bool {
        self.active_participants().any(|p| p.user_id == user_id)
    }
}

//=========================================================================================
// Notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RoomOpened,
    FriendJoined,
    RoomStarting,
    RoomEnding,
    CourseRoomAvailable,
}

/// A notification record produced by the factory.
///
/// Created once per triggering event. `is_read` is the only field that ever
/// mutates, and that mutation belongs to the hosting notification store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub study_room_id: Uuid,
    pub target_user_id: Uuid,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

/// Optional context for rendering a notification message. Missing fields
/// degrade to neutral placeholder text; they never make rendering fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMeta {
    pub course_name: Option<String>,
    pub room_name: Option<String>,
    pub friends_present: Option<u32>,
    pub total_participants: Option<u32>,
}

//=========================================================================================
// Header Aggregate
//=========================================================================================

/// A UI-agnostic summary of a user's live study activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderState {
    pub has_active_rooms: bool,
    /// Sums active buddy memberships across rooms; a buddy sitting in two
    /// rooms counts twice. This is an activity signal, not a head count.
    pub friends_in_rooms: usize,
    pub accessible_rooms_count: usize,
    pub unread_notifications: Vec<Notification>,
}

//=========================================================================================
// Snapshot
//=========================================================================================

/// One consistent view of the input feed: course catalog, per-user purchase
/// sets, the room pool, buddy edges, and per-user notification feeds.
///
/// The hosting layer is responsible for replacing snapshots wholesale so that
/// a single resolution pass never observes a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub courses: Vec<Course>,
    pub purchases: HashMap<Uuid, PurchaseSet>,
    pub rooms: Vec<Room>,
    pub buddies: HashMap<Uuid, HashSet<Uuid>>,
    pub notifications: HashMap<Uuid, Vec<Notification>>,
}
