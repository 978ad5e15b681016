//! services/api/src/web/dto.rs
//!
//! Wire-facing mirrors of the core domain types, carrying the OpenAPI schema
//! derives the core deliberately does not depend on. Conversions in both
//! directions keep the core crate free of HTTP concerns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studyroom_core::domain::{
    AccessReason, AccessRecord, Course, HeaderState, Lesson, Notification, NotificationKind,
    NotificationMeta, Participant, PurchaseSet, Room, RoomKind, RoomStatus, RoomVisibility,
    Snapshot,
};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Catalog
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonDto {
    pub id: String,
    #[serde(default)]
    pub is_owned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: String,
    pub pack_id: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonDto>,
    pub total_lessons: u32,
}

impl From<LessonDto> for Lesson {
    fn from(dto: LessonDto) -> Self {
        Self {
            id: dto.id,
            is_owned: dto.is_owned,
        }
    }
}

impl From<CourseDto> for Course {
    fn from(dto: CourseDto) -> Self {
        Self {
            id: dto.id,
            pack_id: dto.pack_id,
            lessons: dto.lessons.into_iter().map(Into::into).collect(),
            total_lessons: dto.total_lessons,
        }
    }
}

//=========================================================================================
// Rooms
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatusDto {
    Scheduled,
    Live,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomVisibilityDto {
    Public,
    BuddiesOnly,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomKindDto {
    Silent,
    Interactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDto {
    pub user_id: Uuid,
    #[serde(default)]
    pub is_buddy: bool,
    pub left_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: Uuid,
    pub course_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub requires_full_access: bool,
    pub allowed_user_ids: Option<Vec<Uuid>>,
    pub visibility: RoomVisibilityDto,
    pub status: RoomStatusDto,
    pub starts_at: DateTime<Utc>,
    pub kind: RoomKindDto,
    #[serde(default)]
    pub is_complement: bool,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

impl From<RoomStatusDto> for RoomStatus {
    fn from(dto: RoomStatusDto) -> Self {
        match dto {
            RoomStatusDto::Scheduled => Self::Scheduled,
            RoomStatusDto::Live => Self::Live,
            RoomStatusDto::Ended => Self::Ended,
            RoomStatusDto::Cancelled => Self::Cancelled,
        }
    }
}

impl From<RoomStatus> for RoomStatusDto {
    fn from(status: RoomStatus) -> Self {
        match status {
            RoomStatus::Scheduled => Self::Scheduled,
            RoomStatus::Live => Self::Live,
            RoomStatus::Ended => Self::Ended,
            RoomStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<RoomVisibilityDto> for RoomVisibility {
    fn from(dto: RoomVisibilityDto) -> Self {
        match dto {
            RoomVisibilityDto::Public => Self::Public,
            RoomVisibilityDto::BuddiesOnly => Self::BuddiesOnly,
            RoomVisibilityDto::Private => Self::Private,
        }
    }
}

impl From<RoomVisibility> for RoomVisibilityDto {
    fn from(visibility: RoomVisibility) -> Self {
        match visibility {
            RoomVisibility::Public => Self::Public,
            RoomVisibility::BuddiesOnly => Self::BuddiesOnly,
            RoomVisibility::Private => Self::Private,
        }
    }
}

impl From<RoomKindDto> for RoomKind {
    fn from(dto: RoomKindDto) -> Self {
        match dto {
            RoomKindDto::Silent => Self::Silent,
            RoomKindDto::Interactive => Self::Interactive,
        }
    }
}

impl From<RoomKind> for RoomKindDto {
    fn from(kind: RoomKind) -> Self {
        match kind {
            RoomKind::Silent => Self::Silent,
            RoomKind::Interactive => Self::Interactive,
        }
    }
}

impl From<ParticipantDto> for Participant {
    fn from(dto: ParticipantDto) -> Self {
        Self {
            user_id: dto.user_id,
            is_buddy: dto.is_buddy,
            left_at: dto.left_at,
        }
    }
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            user_id: participant.user_id,
            is_buddy: participant.is_buddy,
            left_at: participant.left_at,
        }
    }
}

impl From<RoomDto> for Room {
    fn from(dto: RoomDto) -> Self {
        Self {
            id: dto.id,
            course_id: dto.course_id,
            name: dto.name,
            requires_full_access: dto.requires_full_access,
            allowed_user_ids: dto.allowed_user_ids,
            visibility: dto.visibility.into(),
            status: dto.status.into(),
            starts_at: dto.starts_at,
            kind: dto.kind.into(),
            is_complement: dto.is_complement,
            participants: dto.participants.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            course_id: room.course_id,
            name: room.name,
            requires_full_access: room.requires_full_access,
            allowed_user_ids: room.allowed_user_ids,
            visibility: room.visibility.into(),
            status: room.status.into(),
            starts_at: room.starts_at,
            kind: room.kind.into(),
            is_complement: room.is_complement,
            participants: room.participants.into_iter().map(Into::into).collect(),
        }
    }
}

//=========================================================================================
// Access Records
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessReasonDto {
    FullCourse,
    AllLessonsIndividually,
    Partial,
}

impl From<AccessReason> for AccessReasonDto {
    fn from(reason: AccessReason) -> Self {
        match reason {
            AccessReason::FullCourse => Self::FullCourse,
            AccessReason::AllLessonsIndividually => Self::AllLessonsIndividually,
            AccessReason::Partial => Self::Partial,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessRecordDto {
    pub user_id: Uuid,
    pub course_id: String,
    pub has_full_access: bool,
    /// Sorted for stable output.
    pub owned_lesson_ids: Vec<String>,
    pub total_lessons: u32,
    pub access_reason: AccessReasonDto,
}

impl From<AccessRecord> for AccessRecordDto {
    fn from(record: AccessRecord) -> Self {
        Self {
            user_id: record.user_id,
            course_id: record.course_id,
            has_full_access: record.has_full_access,
            owned_lesson_ids: record.owned_lesson_ids.into_iter().collect(),
            total_lessons: record.total_lessons,
            access_reason: record.access_reason.into(),
        }
    }
}

//=========================================================================================
// Notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKindDto {
    RoomOpened,
    FriendJoined,
    RoomStarting,
    RoomEnding,
    CourseRoomAvailable,
}

impl From<NotificationKindDto> for NotificationKind {
    fn from(dto: NotificationKindDto) -> Self {
        match dto {
            NotificationKindDto::RoomOpened => Self::RoomOpened,
            NotificationKindDto::FriendJoined => Self::FriendJoined,
            NotificationKindDto::RoomStarting => Self::RoomStarting,
            NotificationKindDto::RoomEnding => Self::RoomEnding,
            NotificationKindDto::CourseRoomAvailable => Self::CourseRoomAvailable,
        }
    }
}

impl From<NotificationKind> for NotificationKindDto {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::RoomOpened => Self::RoomOpened,
            NotificationKind::FriendJoined => Self::FriendJoined,
            NotificationKind::RoomStarting => Self::RoomStarting,
            NotificationKind::RoomEnding => Self::RoomEnding,
            NotificationKind::CourseRoomAvailable => Self::CourseRoomAvailable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: Uuid,
    pub kind: NotificationKindDto,
    pub message: String,
    pub study_room_id: Uuid,
    pub target_user_id: Uuid,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<NotificationDto> for Notification {
    fn from(dto: NotificationDto) -> Self {
        Self {
            id: dto.id,
            kind: dto.kind.into(),
            message: dto.message,
            study_room_id: dto.study_room_id,
            target_user_id: dto.target_user_id,
            is_read: dto.is_read,
            timestamp: dto.timestamp,
        }
    }
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind.into(),
            message: notification.message,
            study_room_id: notification.study_room_id,
            target_user_id: notification.target_user_id,
            is_read: notification.is_read,
            timestamp: notification.timestamp,
        }
    }
}

/// Request payload for the notification factory endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuildNotificationRequest {
    pub kind: NotificationKindDto,
    pub study_room_id: Uuid,
    pub target_user_id: Uuid,
    pub course_name: Option<String>,
    pub room_name: Option<String>,
    pub friends_present: Option<u32>,
    pub total_participants: Option<u32>,
}

impl BuildNotificationRequest {
    pub fn into_meta(self) -> (NotificationKind, Uuid, Uuid, NotificationMeta) {
        (
            self.kind.into(),
            self.study_room_id,
            self.target_user_id,
            NotificationMeta {
                course_name: self.course_name,
                room_name: self.room_name,
                friends_present: self.friends_present,
                total_participants: self.total_participants,
            },
        )
    }
}

//=========================================================================================
// Header Aggregate
//=========================================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HeaderStateDto {
    pub has_active_rooms: bool,
    pub friends_in_rooms: usize,
    pub accessible_rooms_count: usize,
    pub unread_notifications: Vec<NotificationDto>,
}

impl From<HeaderState> for HeaderStateDto {
    fn from(state: HeaderState) -> Self {
        Self {
            has_active_rooms: state.has_active_rooms,
            friends_in_rooms: state.friends_in_rooms,
            accessible_rooms_count: state.accessible_rooms_count,
            unread_notifications: state
                .unread_notifications
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

//=========================================================================================
// Snapshot Ingestion
//=========================================================================================

/// The full input feed pushed by the hosting layer: course catalog, per-user
/// purchase tokens, the room pool, buddy edges, and notification feeds.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub courses: Vec<CourseDto>,
    #[serde(default)]
    pub purchases: HashMap<Uuid, Vec<String>>,
    #[serde(default)]
    pub rooms: Vec<RoomDto>,
    #[serde(default)]
    pub buddies: HashMap<Uuid, Vec<Uuid>>,
    #[serde(default)]
    pub notifications: HashMap<Uuid, Vec<NotificationDto>>,
}

impl From<SnapshotPayload> for Snapshot {
    fn from(payload: SnapshotPayload) -> Self {
        Self {
            courses: payload.courses.into_iter().map(Into::into).collect(),
            purchases: payload
                .purchases
                .into_iter()
                .map(|(user, tokens)| (user, tokens.into_iter().collect::<PurchaseSet>()))
                .collect(),
            rooms: payload.rooms.into_iter().map(Into::into).collect(),
            buddies: payload
                .buddies
                .into_iter()
                .map(|(user, peers)| (user, peers.into_iter().collect()))
                .collect(),
            notifications: payload
                .notifications
                .into_iter()
                .map(|(user, feed)| (user, feed.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

//=========================================================================================
// Query Parameters
//=========================================================================================

/// Query parameters for the suggestion endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct SuggestionParams {
    /// Caps the number of suggestions; clamped to the configured maximum.
    pub limit: Option<usize>,
}
