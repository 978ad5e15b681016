//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Every handler is a stateless, idempotent read over the snapshot the
//! hosting layer pushed last; the only write is the snapshot replacement
//! itself.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use studyroom_core::{
    build_notification, compute_header_state, filter_accessible_rooms, rank_suggestions,
    resolve_access, resolve_access_map,
    domain::Room,
    ports::{PortError, PortResult},
};
use tracing::error;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::web::dto::{
    AccessRecordDto, BuildNotificationRequest, HeaderStateDto, NotificationDto, RoomDto,
    SnapshotPayload, SuggestionParams,
};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        put_snapshot_handler,
        get_access_handler,
        list_rooms_handler,
        list_suggestions_handler,
        get_header_handler,
        build_notification_handler,
    ),
    components(schemas(
        SnapshotPayload,
        crate::web::dto::CourseDto,
        crate::web::dto::LessonDto,
        RoomDto,
        crate::web::dto::ParticipantDto,
        crate::web::dto::RoomStatusDto,
        crate::web::dto::RoomVisibilityDto,
        crate::web::dto::RoomKindDto,
        AccessRecordDto,
        crate::web::dto::AccessReasonDto,
        NotificationDto,
        crate::web::dto::NotificationKindDto,
        BuildNotificationRequest,
        HeaderStateDto,
    )),
    tags(
        (name = "Study Room Core API", description = "Entitlement resolution, room visibility, and suggestion ranking over host-supplied snapshots.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Helpers
//=========================================================================================

/// Maps a port failure to an HTTP response.
fn port_error_response(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, what),
        PortError::Unexpected(msg) => {
            error!("Snapshot port failure: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Resolves the user's entitlements against the catalog and filters the room
/// pool down to what they may join. Shared by the room, suggestion, and
/// header endpoints.
async fn accessible_rooms_for(app_state: &AppState, user_id: Uuid) -> PortResult<Vec<Room>> {
    let courses = app_state.snapshot.course_catalog().await?;
    let purchases = app_state.snapshot.purchases_for_user(user_id).await?;
    let access = resolve_access_map(&courses, &purchases, user_id);
    let rooms = app_state.snapshot.room_pool().await?;
    Ok(filter_accessible_rooms(&rooms, &access, user_id))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Replace the current input snapshot.
///
/// The hosting layer pushes a complete, consistent view (catalog, purchase
/// sets, room pool, buddy edges, notification feeds) whenever its own state
/// changes. Partial updates are not supported by design.
#[utoipa::path(
    put,
    path = "/snapshot",
    request_body = SnapshotPayload,
    responses(
        (status = 204, description = "Snapshot replaced"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn put_snapshot_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SnapshotPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    app_state
        .snapshot
        .replace_snapshot(payload.into())
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve one user's access level for one course.
#[utoipa::path(
    get,
    path = "/users/{user_id}/courses/{course_id}/access",
    responses(
        (status = 200, description = "Resolved access record", body = AccessRecordDto),
        (status = 404, description = "Unknown course"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("user_id" = Uuid, Path, description = "The user whose access to resolve."),
        ("course_id" = String, Path, description = "The course to resolve against.")
    )
)]
pub async fn get_access_handler(
    State(app_state): State<Arc<AppState>>,
    Path((user_id, course_id)): Path<(Uuid, String)>,
) -> Result<Json<AccessRecordDto>, (StatusCode, String)> {
    let course = app_state
        .snapshot
        .course_by_id(&course_id)
        .await
        .map_err(port_error_response)?;
    let purchases = app_state
        .snapshot
        .purchases_for_user(user_id)
        .await
        .map_err(port_error_response)?;

    let record = resolve_access(&course, &purchases, user_id);
    Ok(Json(record.into()))
}

/// List the rooms the user may join.
#[utoipa::path(
    get,
    path = "/users/{user_id}/rooms",
    responses(
        (status = 200, description = "Accessible rooms", body = [RoomDto]),
        (status = 500, description = "Internal server error")
    ),
    params(("user_id" = Uuid, Path, description = "The user to filter the room pool for."))
)]
pub async fn list_rooms_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<RoomDto>>, (StatusCode, String)> {
    let rooms = accessible_rooms_for(&app_state, user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}

/// Rank the user's accessible rooms into a short suggestion list.
#[utoipa::path(
    get,
    path = "/users/{user_id}/suggestions",
    responses(
        (status = 200, description = "Ranked suggestions, best first", body = [RoomDto]),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("user_id" = Uuid, Path, description = "The user to suggest rooms to."),
        SuggestionParams
    )
)]
pub async fn list_suggestions_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<RoomDto>>, (StatusCode, String)> {
    let accessible = accessible_rooms_for(&app_state, user_id)
        .await
        .map_err(port_error_response)?;
    let buddies = app_state
        .snapshot
        .buddies_for_user(user_id)
        .await
        .map_err(port_error_response)?;

    let max_results = params
        .limit
        .unwrap_or(app_state.config.max_suggestions)
        .min(app_state.config.max_suggestions);
    let ranked = rank_suggestions(&accessible, user_id, &buddies, Utc::now(), max_results);
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

/// Compute the header summary badge for the user.
#[utoipa::path(
    get,
    path = "/users/{user_id}/header",
    responses(
        (status = 200, description = "Header aggregate", body = HeaderStateDto),
        (status = 500, description = "Internal server error")
    ),
    params(("user_id" = Uuid, Path, description = "The user to summarize for."))
)]
pub async fn get_header_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<HeaderStateDto>, (StatusCode, String)> {
    let accessible = accessible_rooms_for(&app_state, user_id)
        .await
        .map_err(port_error_response)?;
    let notifications = app_state
        .snapshot
        .notifications_for_user(user_id)
        .await
        .map_err(port_error_response)?;
    let buddies = app_state
        .snapshot
        .buddies_for_user(user_id)
        .await
        .map_err(port_error_response)?;

    let state = compute_header_state(&accessible, &notifications, &buddies);
    Ok(Json(state.into()))
}

/// Build a notification record for a qualifying room event.
///
/// The factory itself is pure; persisting the record and later flipping its
/// read flag is the hosting layer's job.
#[utoipa::path(
    post,
    path = "/notifications",
    request_body = BuildNotificationRequest,
    responses(
        (status = 201, description = "Notification built", body = NotificationDto)
    )
)]
pub async fn build_notification_handler(
    Json(request): Json<BuildNotificationRequest>,
) -> (StatusCode, Json<NotificationDto>) {
    let (kind, study_room_id, target_user_id, meta) = request.into_meta();
    let notification = build_notification(kind, study_room_id, target_user_id, &meta);
    (StatusCode::CREATED, Json(notification.into()))
}

//=========================================================================================
// Handler Tests
//=========================================================================================
