use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::room::{RoomStatus, STATUS_MSG};
use serde::{Deserialize, Serialize};
use service::room::domain::{Room, RoomFilter, RoomInput};
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring of the room name
    pub name: Option<String>,
    pub size: Option<i32>,
    pub is_available: Option<bool>,
}

impl From<ListQuery> for RoomFilter {
    fn from(q: ListQuery) -> Self {
        RoomFilter { name: q.name, size: q.size, is_available: q.is_available }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// Required for Maintenance and Unavailable
    pub details: Option<String>,
}

/// Room representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
    pub size: i32,
    pub is_available: bool,
    #[schema(example = "Available")]
    pub status: String,
    pub additional_details: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(r: Room) -> Self {
        RoomResponse {
            id: r.id,
            name: r.name,
            size: r.size,
            is_available: r.is_available,
            status: r.status.to_string(),
            additional_details: r.additional_details,
        }
    }
}

// Missing fields fall through to the validator instead of a JSON rejection.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: i32,
    #[serde(default)]
    #[schema(example = "Available")]
    pub status: String,
    #[serde(default)]
    pub additional_details: Option<String>,
}

impl From<CreateRoomRequest> for RoomInput {
    fn from(r: CreateRoomRequest) -> Self {
        RoomInput { name: r.name, size: r.size, status: r.status, additional_details: r.additional_details }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: i32,
    #[serde(default)]
    #[schema(example = "Booked")]
    pub status: String,
    #[serde(default)]
    pub additional_details: Option<String>,
}

impl From<UpdateRoomRequest> for RoomInput {
    fn from(r: UpdateRoomRequest) -> Self {
        RoomInput { name: r.name, size: r.size, status: r.status, additional_details: r.additional_details }
    }
}

#[utoipa::path(
    get, path = "/api/rooms", tag = "rooms",
    params(ListQuery),
    responses(
        (status = 200, description = "Rooms matching every filter", body = [RoomResponse]),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("api_key" = []))
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = state.rooms.list_rooms(q.into()).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

#[utoipa::path(
    get, path = "/api/rooms/{id}", tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "OK", body = RoomResponse),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<RoomResponse>, ApiError> {
    let room = state.rooms.get_room_by_id(id).await?;
    Ok(Json(room.into()))
}

#[utoipa::path(
    post, path = "/api/rooms", tag = "rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Created", body = RoomResponse),
        (status = 400, description = "Validation Error")
    ),
    security(("api_key" = []))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CreateRoomRequest>) -> Result<impl IntoResponse, ApiError> {
    let room = state.rooms.create_room(input.into()).await?;
    let location = format!("/api/rooms/{}", room.id);
    info!(id = room.id, %location, "created room");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(RoomResponse::from(room))))
}

#[utoipa::path(
    put, path = "/api/rooms/{id}", tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Route id does not match body id, or validation error"),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateRoomRequest>,
) -> Result<StatusCode, ApiError> {
    if id != input.id {
        warn!(path_id = id, body_id = input.id, "room id mismatch");
        return Err(ApiError::BadRequest("Route id does not match body id.".into()));
    }
    if state.rooms.update_room(id, input.into()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("room not found".into()))
    }
}

#[utoipa::path(
    patch, path = "/api/rooms/{id}/status", tag = "rooms",
    params(("id" = i32, Path, description = "Room ID"), StatusQuery),
    request_body(content = String, description = "New status name", example = json!("Maintenance")),
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Invalid status or missing details"),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<StatusQuery>,
    Json(status): Json<String>,
) -> Result<StatusCode, ApiError> {
    let status: RoomStatus = status.parse().map_err(|_| ApiError::BadRequest(STATUS_MSG.into()))?;
    if state.rooms.set_room_status(id, status, q.details).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("room not found".into()))
    }
}
