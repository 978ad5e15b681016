//! crates/studyroom_core/src/rooms.rs
//!
//! The room accessibility filter: narrows a pool of study rooms down to the
//! ones a user may join, given their resolved access records.
//!
//! Entitlement checks sit on a user-trust boundary, so every ambiguous case
//! fails closed: a linked room whose course has no access record is excluded
//! rather than surfaced.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{AccessRecord, Room};

/// Filters a room pool down to the rooms the user may join.
///
/// Rules, in order:
/// - an allow-list that does not contain the user excludes the room (an
///   explicit invite list is a hard gate, regardless of visibility);
/// - a room without a `course_id` is otherwise open to everyone;
/// - a linked room whose course id has no access record is excluded (room
///   pool and catalog may come from skewed snapshots; deny by default);
/// - a room requiring full access excludes users whose record lacks it.
///
/// The filter is monotonic: granting more entitlements can only grow the
/// result, never shrink it.
pub fn filter_accessible_rooms(
    rooms: &[Room],
    access_by_course: &HashMap<String, AccessRecord>,
    user_id: Uuid,
) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| is_accessible(room, access_by_course, user_id))
        .cloned()
        .collect()
}

fn is_accessible(
    room: &Room,
    access_by_course: &HashMap<String, AccessRecord>,
    user_id: Uuid,
) -> bool {
    if let Some(allowed) = &room.allowed_user_ids {
        if !allowed.contains(&user_id) {
            return false;
        }
    }

    let Some(course_id) = &room.course_id else {
        // Unlinked rooms are open.
        return true;
    };

    let Some(record) = access_by_course.get(course_id) else {
        return false;
    };

    !room.requires_full_access || record.has_full_access
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccessReason, Course, Lesson, PurchaseSet, RoomKind, RoomStatus, RoomVisibility,
    };
    use crate::entitlements::resolve_access_map;
    use chrono::Utc;
    use std::collections::HashSet;

    fn room(course_id: Option<&str>, requires_full_access: bool) -> Room {
        Room {
            id: Uuid::new_v4(),
            course_id: course_id.map(str::to_owned),
            name: "Evening session".to_owned(),
            requires_full_access,
            allowed_user_ids: None,
            visibility: RoomVisibility::Public,
            status: RoomStatus::Live,
            starts_at: Utc::now(),
            kind: RoomKind::Silent,
            is_complement: false,
            participants: vec![],
        }
    }

    fn full_record(user_id: Uuid, course_id: &str) -> AccessRecord {
        AccessRecord {
            user_id,
            course_id: course_id.to_owned(),
            has_full_access: true,
            owned_lesson_ids: Default::default(),
            total_lessons: 0,
            access_reason: AccessReason::FullCourse,
        }
    }

    fn partial_record(user_id: Uuid, course_id: &str) -> AccessRecord {
        AccessRecord {
            has_full_access: false,
            access_reason: AccessReason::Partial,
            ..full_record(user_id, course_id)
        }
    }

    #[test]
    fn unlinked_rooms_are_always_accessible() {
        let user_id = Uuid::new_v4();
        let rooms = vec![room(None, true)];

        let accessible = filter_accessible_rooms(&rooms, &HashMap::new(), user_id);

        assert_eq!(accessible.len(), 1);
    }

    #[test]
    fn missing_access_record_excludes_linked_room() {
        let user_id = Uuid::new_v4();
        let rooms = vec![room(Some("rust-101"), false)];

        let accessible = filter_accessible_rooms(&rooms, &HashMap::new(), user_id);

        assert!(accessible.is_empty());
    }

    #[test]
    fn full_access_requirement_excludes_partial_owners() {
        let user_id = Uuid::new_v4();
        let rooms = vec![room(Some("rust-101"), true)];
        let access =
            HashMap::from([("rust-101".to_owned(), partial_record(user_id, "rust-101"))]);

        let accessible = filter_accessible_rooms(&rooms, &access, user_id);

        assert!(accessible.is_empty());
    }

    #[test]
    fn partial_access_suffices_for_open_course_rooms() {
        let user_id = Uuid::new_v4();
        let rooms = vec![room(Some("rust-101"), false)];
        let access =
            HashMap::from([("rust-101".to_owned(), partial_record(user_id, "rust-101"))]);

        let accessible = filter_accessible_rooms(&rooms, &access, user_id);

        assert_eq!(accessible.len(), 1);
    }

    #[test]
    fn allow_list_is_a_hard_gate() {
        let user_id = Uuid::new_v4();
        let invited = Uuid::new_v4();
        let mut gated = room(Some("rust-101"), false);
        gated.allowed_user_ids = Some(vec![invited]);
        // Even an unlinked room honors its invite list.
        let mut gated_unlinked = room(None, false);
        gated_unlinked.allowed_user_ids = Some(vec![invited]);
        let rooms = vec![gated, gated_unlinked];
        let access = HashMap::from([("rust-101".to_owned(), full_record(user_id, "rust-101"))]);

        assert!(filter_accessible_rooms(&rooms, &access, user_id).is_empty());

        let access = HashMap::from([("rust-101".to_owned(), full_record(invited, "rust-101"))]);
        assert_eq!(filter_accessible_rooms(&rooms, &access, invited).len(), 2);
    }

    #[test]
    fn adding_entitlements_never_shrinks_the_result() {
        // Superset property: grow the purchase set one token at a time and
        // check every previously accessible room stays accessible.
        let user_id = Uuid::new_v4();
        let courses = vec![
            Course {
                id: "rust-101".to_owned(),
                pack_id: Some("bundle".to_owned()),
                lessons: vec![
                    Lesson { id: "L1".to_owned(), is_owned: false },
                    Lesson { id: "L2".to_owned(), is_owned: false },
                ],
                total_lessons: 2,
            },
            Course {
                id: "go-201".to_owned(),
                pack_id: None,
                lessons: vec![Lesson { id: "G1".to_owned(), is_owned: false }],
                total_lessons: 1,
            },
        ];
        let rooms = vec![
            room(None, false),
            room(Some("rust-101"), false),
            room(Some("rust-101"), true),
            room(Some("go-201"), true),
            room(Some("orphaned-course"), false),
        ];

        let mut purchases = PurchaseSet::new();
        let mut previous: HashSet<Uuid> = HashSet::new();
        for token in ["L1", "L2", "pack-bundle", "course-go-201"] {
            purchases.insert(token);
            let access = resolve_access_map(&courses, &purchases, user_id);
            let current: HashSet<Uuid> = filter_accessible_rooms(&rooms, &access, user_id)
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert!(
                previous.is_subset(&current),
                "adding {token} removed rooms from the result"
            );
            previous = current;
        }

        // With everything purchased, only the orphaned room stays excluded.
        assert_eq!(previous.len(), 4);
    }
}
