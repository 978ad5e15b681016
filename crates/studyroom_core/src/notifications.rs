//! crates/studyroom_core/src/notifications.rs
//!
//! The notification factory: maps a room life-cycle event to exactly one
//! message template and stamps out a fresh `Notification` record.
//!
//! Message rendering is total. Absent metadata fields fall back to neutral
//! wording; the factory never fails, whatever the caller forgot to supply.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Notification, NotificationKind, NotificationMeta};

/// Builds a notification for a qualifying room event.
///
/// The id is freshly generated per call (unique within the process, so
/// upstream dedup can key on it), `is_read` starts false, and the timestamp
/// is capture-time.
pub fn build_notification(
    kind: NotificationKind,
    study_room_id: Uuid,
    target_user_id: Uuid,
    meta: &NotificationMeta,
) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        kind,
        message: render_message(kind, meta),
        study_room_id,
        target_user_id,
        is_read: false,
        timestamp: Utc::now(),
    }
}

fn render_message(kind: NotificationKind, meta: &NotificationMeta) -> String {
    let room = meta.room_name.as_deref();
    let course = meta.course_name.as_deref();

    match kind {
        NotificationKind::RoomOpened => match room {
            Some(room) => format!("\"{room}\" is now open. Jump in while it is quiet."),
            None => "A study room you follow is now open.".to_owned(),
        },
        NotificationKind::FriendJoined => {
            let room = room.unwrap_or("a study room");
            match meta.friends_present {
                Some(n) if n > 1 => format!("{n} of your buddies are studying in {room}."),
                _ => format!("A buddy just joined {room}."),
            }
        }
        NotificationKind::RoomStarting => {
            let room = room.unwrap_or("A study room");
            match course {
                Some(course) => format!("{room} for {course} is starting in a few minutes."),
                None => format!("{room} is starting in a few minutes."),
            }
        }
        NotificationKind::RoomEnding => {
            let room = room.unwrap_or("A study room");
            match meta.total_participants {
                Some(n) => format!("{room} is wrapping up after hosting {n} participants."),
                None => format!("{room} is wrapping up."),
            }
        }
        NotificationKind::CourseRoomAvailable => match course {
            Some(course) => format!("A new study room is available for {course}."),
            None => "A new study room is available for one of your courses.".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn full_meta() -> NotificationMeta {
        NotificationMeta {
            course_name: Some("Rust 101".to_owned()),
            room_name: Some("Evening sprint".to_owned()),
            friends_present: Some(3),
            total_participants: Some(7),
        }
    }

    #[rstest]
    #[case::opened(NotificationKind::RoomOpened, "\"Evening sprint\" is now open")]
    #[case::friend(NotificationKind::FriendJoined, "3 of your buddies")]
    #[case::starting(NotificationKind::RoomStarting, "Evening sprint for Rust 101 is starting")]
    #[case::ending(NotificationKind::RoomEnding, "after hosting 7 participants")]
    #[case::available(NotificationKind::CourseRoomAvailable, "available for Rust 101")]
    fn each_kind_renders_its_template(#[case] kind: NotificationKind, #[case] expected: &str) {
        let notification =
            build_notification(kind, Uuid::new_v4(), Uuid::new_v4(), &full_meta());
        assert!(
            notification.message.contains(expected),
            "message {:?} missing {expected:?}",
            notification.message
        );
    }

    #[rstest]
    #[case(NotificationKind::RoomOpened)]
    #[case(NotificationKind::FriendJoined)]
    #[case(NotificationKind::RoomStarting)]
    #[case(NotificationKind::RoomEnding)]
    #[case(NotificationKind::CourseRoomAvailable)]
    fn empty_metadata_still_renders(#[case] kind: NotificationKind) {
        let notification = build_notification(
            kind,
            Uuid::new_v4(),
            Uuid::new_v4(),
            &NotificationMeta::default(),
        );
        assert!(!notification.message.is_empty());
    }

    #[test]
    fn single_friend_uses_singular_wording() {
        let meta = NotificationMeta {
            friends_present: Some(1),
            room_name: Some("Focus hall".to_owned()),
            ..Default::default()
        };
        let notification =
            build_notification(NotificationKind::FriendJoined, Uuid::new_v4(), Uuid::new_v4(), &meta);
        assert_eq!(notification.message, "A buddy just joined Focus hall.");
    }

    #[test]
    fn records_start_unread_with_fresh_ids() {
        let target = Uuid::new_v4();
        let room_id = Uuid::new_v4();
        let a = build_notification(
            NotificationKind::RoomOpened,
            room_id,
            target,
            &NotificationMeta::default(),
        );
        let b = build_notification(
            NotificationKind::RoomOpened,
            room_id,
            target,
            &NotificationMeta::default(),
        );

        assert!(!a.is_read);
        assert_eq!(a.target_user_id, target);
        assert_eq!(a.study_room_id, room_id);
        assert_ne!(a.id, b.id);
    }
}
