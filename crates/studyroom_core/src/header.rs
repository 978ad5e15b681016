//! crates/studyroom_core/src/header.rs
//!
//! The header aggregate computer: folds a user's accessible rooms and
//! notification feed into the small summary that drives a badge in the
//! hosting UI.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::{HeaderState, Notification, Room, RoomStatus};

/// Computes the header summary for one user.
///
/// `friends_in_rooms` sums active buddy memberships across all accessible
/// rooms; a buddy present in two rooms is counted twice on purpose, since the
/// number is an activity signal rather than a unique-person count. Unread
/// notifications keep their feed order.
pub fn compute_header_state(
    accessible_rooms: &[Room],
    notifications: &[Notification],
    buddy_ids: &HashSet<Uuid>,
) -> HeaderState {
    let has_active_rooms = accessible_rooms
        .iter()
        .any(|room| matches!(room.status, RoomStatus::Live | RoomStatus::Scheduled));

    let friends_in_rooms = accessible_rooms
        .iter()
        .flat_map(Room::active_participants)
        .filter(|p| buddy_ids.contains(&p.user_id))
        .count();

    HeaderState {
        has_active_rooms,
        friends_in_rooms,
        accessible_rooms_count: accessible_rooms.len(),
        unread_notifications: notifications
            .iter()
            .filter(|n| !n.is_read)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotificationKind, Participant, RoomKind, RoomVisibility};
    use crate::notifications::build_notification;
    use chrono::Utc;

    fn room(status: RoomStatus, participants: Vec<Participant>) -> Room {
        Room {
            id: Uuid::new_v4(),
            course_id: None,
            name: "Library".to_owned(),
            requires_full_access: false,
            allowed_user_ids: None,
            visibility: RoomVisibility::Public,
            status,
            starts_at: Utc::now(),
            kind: RoomKind::Silent,
            is_complement: false,
            participants,
        }
    }

    fn member(user_id: Uuid) -> Participant {
        Participant {
            user_id,
            is_buddy: false,
            left_at: None,
        }
    }

    #[test]
    fn buddies_are_counted_once_per_room() {
        let buddy = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let rooms = vec![
            room(RoomStatus::Live, vec![member(buddy), member(stranger)]),
            room(RoomStatus::Live, vec![member(buddy)]),
        ];
        let buddies = HashSet::from([buddy]);

        let state = compute_header_state(&rooms, &[], &buddies);

        // The same buddy in two rooms registers twice.
        assert_eq!(state.friends_in_rooms, 2);
        assert_eq!(state.accessible_rooms_count, 2);
        assert!(state.has_active_rooms);
    }

    #[test]
    fn departed_buddies_are_ignored() {
        let buddy = Uuid::new_v4();
        let mut departed = member(buddy);
        departed.left_at = Some(Utc::now());
        let rooms = vec![room(RoomStatus::Live, vec![departed])];

        let state = compute_header_state(&rooms, &[], &HashSet::from([buddy]));

        assert_eq!(state.friends_in_rooms, 0);
    }

    #[test]
    fn ended_rooms_are_not_active() {
        let rooms = vec![
            room(RoomStatus::Ended, vec![]),
            room(RoomStatus::Cancelled, vec![]),
        ];

        let state = compute_header_state(&rooms, &[], &HashSet::new());

        assert!(!state.has_active_rooms);
        assert_eq!(state.accessible_rooms_count, 2);
    }

    #[test]
    fn unread_notifications_keep_feed_order() {
        let user = Uuid::new_v4();
        let mut feed: Vec<Notification> = (0..3)
            .map(|_| {
                build_notification(
                    NotificationKind::RoomOpened,
                    Uuid::new_v4(),
                    user,
                    &Default::default(),
                )
            })
            .collect();
        feed[1].is_read = true;

        let state = compute_header_state(&[], &feed, &HashSet::new());

        assert_eq!(
            state.unread_notifications.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![feed[0].id, feed[2].id]
        );
    }
}
