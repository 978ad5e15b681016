//! crates/studyroom_core/src/entitlements.rs
//!
//! The entitlement resolver: classifies a user's access level for a course
//! from their fragmented purchase history (full-course tokens, pack tokens,
//! and individually purchased lessons).
//!
//! Resolution is a pure function over immutable inputs. It never errors:
//! malformed catalog data fails closed to `Partial` access.

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::domain::{AccessReason, AccessRecord, Course, PurchaseSet};

/// Builds the purchase token granting full access to a course.
pub fn course_token(course_id: &str) -> String {
    format!("course-{course_id}")
}

/// Builds the purchase token granting access to a bundle.
pub fn pack_token(pack_id: &str) -> String {
    format!("pack-{pack_id}")
}

/// Resolves a user's access level for one course.
///
/// Full access is granted when either:
/// 1. the purchase set holds the course token, the bare course id (a legacy
///    alias still present in older purchase records), or the course's pack
///    token (`FullCourse`); or
/// 2. every lesson of the course is individually owned, via the purchase set
///    or the lesson-level ownership flag (`AllLessonsIndividually`).
///
/// Anything less resolves to `Partial` with the owned subset listed. A course
/// with zero lessons can never satisfy rule 2.
pub fn resolve_access(course: &Course, purchases: &PurchaseSet, user_id: Uuid) -> AccessRecord {
    // A catalog entry may list fewer lessons than it claims to have
    // (total_lessons is the authoritative count for partially loaded
    // courses). A total smaller than the listed lessons is malformed; taking
    // the max keeps rule 2 unreachable rather than trivially satisfiable.
    let total_lessons = course.total_lessons.max(course.lessons.len() as u32);

    let full_course = purchases.contains(&course_token(&course.id))
        || purchases.contains(&course.id)
        || course
            .pack_id
            .as_deref()
            .is_some_and(|pack_id| purchases.contains(&pack_token(pack_id)));

    if full_course {
        return AccessRecord {
            user_id,
            course_id: course.id.clone(),
            has_full_access: true,
            owned_lesson_ids: course.lessons.iter().map(|l| l.id.clone()).collect(),
            total_lessons,
            access_reason: AccessReason::FullCourse,
        };
    }

    let owned_lesson_ids: BTreeSet<String> = course
        .lessons
        .iter()
        .filter(|lesson| lesson.is_owned || purchases.contains(&lesson.id))
        .map(|lesson| lesson.id.clone())
        .collect();

    let owns_all = total_lessons > 0 && owned_lesson_ids.len() as u32 == total_lessons;
    let access_reason = if owns_all {
        AccessReason::AllLessonsIndividually
    } else {
        AccessReason::Partial
    };

    AccessRecord {
        user_id,
        course_id: course.id.clone(),
        has_full_access: owns_all,
        owned_lesson_ids,
        total_lessons,
        access_reason,
    }
}

/// Resolves access for every course in the catalog, keyed by course id.
///
/// This is the map the room accessibility filter consumes.
pub fn resolve_access_map(
    courses: &[Course],
    purchases: &PurchaseSet,
    user_id: Uuid,
) -> HashMap<String, AccessRecord> {
    courses
        .iter()
        .map(|course| (course.id.clone(), resolve_access(course, purchases, user_id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lesson;
    use rstest::rstest;

    fn lesson(id: &str) -> Lesson {
        Lesson {
            id: id.to_owned(),
            is_owned: false,
        }
    }

    fn three_lesson_course() -> Course {
        Course {
            id: "rust-101".to_owned(),
            pack_id: Some("systems-bundle".to_owned()),
            lessons: vec![lesson("L1"), lesson("L2"), lesson("L3")],
            total_lessons: 3,
        }
    }

    #[rstest]
    #[case::course_token("course-rust-101")]
    #[case::legacy_bare_id("rust-101")]
    #[case::pack_token("pack-systems-bundle")]
    fn course_level_tokens_grant_full_access(#[case] token: &str) {
        let course = three_lesson_course();
        let purchases: PurchaseSet = [token].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::FullCourse);
    }

    #[test]
    fn course_token_short_circuits_lesson_ownership() {
        // Full-course ownership wins even when no lesson is individually owned.
        let course = three_lesson_course();
        let purchases: PurchaseSet = ["course-rust-101"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert_eq!(record.access_reason, AccessReason::FullCourse);
        assert_eq!(record.owned_lesson_ids.len(), 3);
    }

    #[test]
    fn owning_every_lesson_individually_grants_full_access() {
        let course = three_lesson_course();
        let purchases: PurchaseSet = ["L1", "L2", "L3"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::AllLessonsIndividually);
        assert_eq!(
            record.owned_lesson_ids,
            ["L1", "L2", "L3"].map(str::to_owned).into()
        );
    }

    #[test]
    fn lesson_flag_and_purchase_set_are_unioned() {
        // L1 comes from the catalog flag, L2 and L3 from the purchase set.
        let mut course = three_lesson_course();
        course.lessons[0].is_owned = true;
        let purchases: PurchaseSet = ["L2", "L3"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::AllLessonsIndividually);
    }

    #[test]
    fn partial_ownership_resolves_to_partial() {
        let course = three_lesson_course();
        let purchases: PurchaseSet = ["L1"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(!record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::Partial);
        assert_eq!(record.owned_lesson_ids, ["L1".to_owned()].into());
    }

    #[test]
    fn zero_lesson_course_never_reaches_all_lessons() {
        let course = Course {
            id: "empty".to_owned(),
            pack_id: None,
            lessons: vec![],
            total_lessons: 0,
        };

        let record = resolve_access(&course, &PurchaseSet::new(), Uuid::new_v4());

        assert!(!record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::Partial);
    }

    #[test]
    fn unlisted_lessons_keep_access_partial() {
        // total_lessons claims more lessons than the catalog entry lists;
        // owning the listed ones is not enough.
        let mut course = three_lesson_course();
        course.total_lessons = 5;
        let purchases: PurchaseSet = ["L1", "L2", "L3"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(!record.has_full_access);
        assert_eq!(record.access_reason, AccessReason::Partial);
    }

    #[test]
    fn malformed_total_below_listed_lessons_fails_closed() {
        let mut course = three_lesson_course();
        course.total_lessons = 1;
        let purchases: PurchaseSet = ["L1"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        // The listed lesson count wins, so one lesson out of three stays Partial.
        assert_eq!(record.total_lessons, 3);
        assert!(!record.has_full_access);
    }

    #[test]
    fn tokens_for_other_courses_grant_nothing() {
        let course = three_lesson_course();
        let purchases: PurchaseSet =
            ["course-other", "pack-other", "X1"].into_iter().collect();

        let record = resolve_access(&course, &purchases, Uuid::new_v4());

        assert!(!record.has_full_access);
        assert!(record.owned_lesson_ids.is_empty());
    }

    #[test]
    fn access_map_covers_every_course() {
        let courses = vec![
            three_lesson_course(),
            Course {
                id: "go-201".to_owned(),
                pack_id: None,
                lessons: vec![lesson("G1")],
                total_lessons: 1,
            },
        ];
        let purchases: PurchaseSet = ["course-rust-101"].into_iter().collect();
        let user_id = Uuid::new_v4();

        let map = resolve_access_map(&courses, &purchases, user_id);

        assert_eq!(map.len(), 2);
        assert!(map["rust-101"].has_full_access);
        assert!(!map["go-201"].has_full_access);
    }
}
