//! services/api/src/adapters/snapshot.rs
//!
//! This module contains the snapshot adapter, the concrete implementation of
//! the `SnapshotService` port from the core crate. It holds the most recent
//! snapshot pushed by the hosting application in memory and hands out clones
//! of it, so each resolution pass reads one consistent view.

use std::collections::HashSet;

use async_trait::async_trait;
use studyroom_core::domain::{Course, Notification, PurchaseSet, Room, Snapshot};
use studyroom_core::ports::{PortError, PortResult, SnapshotService};
use tokio::sync::RwLock;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An in-memory snapshot store that implements the `SnapshotService` port.
///
/// The hosting layer replaces the snapshot wholesale via `replace_snapshot`;
/// readers never see a half-applied update.
#[derive(Default)]
pub struct InMemorySnapshotAdapter {
    store: RwLock<Snapshot>,
}

impl InMemorySnapshotAdapter {
    /// Creates an adapter pre-seeded with a snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            store: RwLock::new(initial),
        }
    }
}

#[async_trait]
impl SnapshotService for InMemorySnapshotAdapter {
    async fn course_catalog(&self) -> PortResult<Vec<Course>> {
        Ok(self.store.read().await.courses.clone())
    }

    async fn course_by_id(&self, course_id: &str) -> PortResult<Course> {
        self.store
            .read()
            .await
            .courses
            .iter()
            .find(|course| course.id == course_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("course {course_id}")))
    }

    async fn purchases_for_user(&self, user_id: Uuid) -> PortResult<PurchaseSet> {
        // An unknown user simply has not purchased anything.
        Ok(self
            .store
            .read()
            .await
            .purchases
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn buddies_for_user(&self, user_id: Uuid) -> PortResult<HashSet<Uuid>> {
        Ok(self
            .store
            .read()
            .await
            .buddies
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn notifications_for_user(&self, user_id: Uuid) -> PortResult<Vec<Notification>> {
        Ok(self
            .store
            .read()
            .await
            .notifications
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn room_pool(&self) -> PortResult<Vec<Room>> {
        Ok(self.store.read().await.rooms.clone())
    }

    async fn replace_snapshot(&self, snapshot: Snapshot) -> PortResult<()> {
        *self.store.write().await = snapshot;
        Ok(())
    }
}
