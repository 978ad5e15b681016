//! crates/studyroom_core/src/ports.rs
//!
//! Defines the service contract (trait) through which the hosting layer
//! supplies input snapshots to the core. This trait forms the boundary of
//! the hexagonal architecture, keeping the policy logic independent of how
//! catalog, purchase, room, and buddy data is actually stored or synced.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Course, Notification, PurchaseSet, Room, Snapshot};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of whatever backs the snapshot
/// (an in-memory store, a database, an upstream service).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Snapshot Port (Trait)
//=========================================================================================

/// Supplies consistent, immutable input snapshots to the core components.
///
/// Implementations must hand out data from a single snapshot per call; the
/// core never observes partial updates. Users absent from a per-user map are
/// not errors: they simply have empty purchases, buddies, or feeds.
#[async_trait]
pub trait SnapshotService: Send + Sync {
    // --- Catalog ---
    async fn course_catalog(&self) -> PortResult<Vec<Course>>;

    async fn course_by_id(&self, course_id: &str) -> PortResult<Course>;

    // --- Per-user feeds ---
    async fn purchases_for_user(&self, user_id: Uuid) -> PortResult<PurchaseSet>;

    async fn buddies_for_user(&self, user_id: Uuid) -> PortResult<HashSet<Uuid>>;

    async fn notifications_for_user(&self, user_id: Uuid) -> PortResult<Vec<Notification>>;

    // --- Rooms ---
    async fn room_pool(&self) -> PortResult<Vec<Room>>;

    // --- Snapshot replacement ---
    /// Replaces the whole snapshot atomically with a fresher one.
    async fn replace_snapshot(&self, snapshot: Snapshot) -> PortResult<()>;
}
