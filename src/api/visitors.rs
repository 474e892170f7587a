//! Visitors API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::visitor::{
        LastVisitor, MessageResponse, NewVisitor, UpdateVisitorRequest, VisitorResponse,
        VisitorSummary,
    },
};

/// Record a new visitor
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = NewVisitor,
    responses(
        (status = 201, description = "Visitor added", body = VisitorResponse),
        (status = 400, description = "Invalid visitor data", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_visitor(
    State(state): State<crate::AppState>,
    Json(data): Json<NewVisitor>,
) -> AppResult<(StatusCode, Json<VisitorResponse>)> {
    let response = state.services.visitors.add(&data).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List all visitors (id and name)
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    responses(
        (status = 200, description = "Visitor list", body = Vec<VisitorSummary>),
        (status = 404, description = "No visitors recorded", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<VisitorSummary>>> {
    let visitors = state.services.visitors.list().await?;
    Ok(Json(visitors))
}

/// Delete every visitor
#[utoipa::path(
    delete,
    path = "/visitors",
    tag = "visitors",
    responses(
        (status = 200, description = "All visitors deleted", body = MessageResponse),
        (status = 404, description = "No visitors recorded", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_visitors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.visitors.delete_all().await?;
    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// Id of the most recently added visitor
#[utoipa::path(
    get,
    path = "/visitors/last",
    tag = "visitors",
    responses(
        (status = 200, description = "Last visitor id", body = LastVisitor),
        (status = 404, description = "No visitors recorded", body = crate::error::ErrorResponse)
    )
)]
pub async fn view_last_visitor(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LastVisitor>> {
    let id = state.services.visitors.last().await?;
    Ok(Json(LastVisitor { id }))
}

/// Get a visitor by ID
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor details", body = VisitorResponse),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn view_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VisitorResponse>> {
    let response = state.services.visitors.get(&id).await?;
    Ok(Json(response))
}

/// Update a single visitor field
#[utoipa::path(
    patch,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor ID")),
    request_body = UpdateVisitorRequest,
    responses(
        (status = 200, description = "Visitor updated", body = VisitorResponse),
        (status = 400, description = "Malformed ID, field or value", body = crate::error::ErrorResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateVisitorRequest>,
) -> AppResult<Json<VisitorResponse>> {
    let response = state
        .services
        .visitors
        .update(&id, &data.column, &data.value)
        .await?;
    Ok(Json(response))
}

/// Delete a visitor
#[utoipa::path(
    delete,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor deleted", body = VisitorResponse),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VisitorResponse>> {
    let response = state.services.visitors.delete(&id).await?;
    Ok(Json(response))
}
