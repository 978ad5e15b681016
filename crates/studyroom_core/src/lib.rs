//! crates/studyroom_core/src/lib.rs
//!
//! The pure policy core of the study platform: entitlement resolution, room
//! accessibility filtering, notification building, suggestion ranking, and
//! the header aggregate. Every component is a stateless transform over
//! immutable snapshot data supplied through [`ports::SnapshotService`].

pub mod domain;
pub mod entitlements;
pub mod header;
pub mod notifications;
pub mod ports;
pub mod rooms;
pub mod suggestions;

pub use domain::{
    AccessReason, AccessRecord, Course, HeaderState, Lesson, Notification, NotificationKind,
    NotificationMeta, Participant, PurchaseSet, Room, RoomKind, RoomStatus, RoomVisibility,
    Snapshot,
};
pub use entitlements::{resolve_access, resolve_access_map};
pub use header::compute_header_state;
pub use notifications::build_notification;
pub use ports::{PortError, PortResult, SnapshotService};
pub use rooms::filter_accessible_rooms;
pub use suggestions::{rank_suggestions, score_room, DEFAULT_MAX_SUGGESTIONS};
