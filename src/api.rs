use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, warn};

use crate::{
    domain::{BoardId, ColumnId, TaskId},
    error::KanbanError,
    storage::Storage,
};

// ── Shared application state ──────────────────────────────────────────

pub type SharedStorage = Arc<dyn Storage>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateBoardRequest {
    pub name: Option<String>,
}

impl CreateBoardRequest {
    /// Parses a board body where an empty body means "all defaults"
    fn from_body(body: &[u8]) -> Result<Self, KanbanError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| KanbanError::InvalidArgument(format!("invalid board body: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateColumnRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    pub target_column_id: String,
    pub new_order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTaskRequest {
    pub new_order: i64,
}

// ── Error handling ────────────────────────────────────────────────────

pub struct ApiError(KanbanError);

impl From<KanbanError> for ApiError {
    fn from(err: KanbanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            err if err.is_not_found() => {
                warn!(error = %err, "Unresolved identifier");
                StatusCode::NOT_FOUND.into_response()
            }
            KanbanError::InvalidArgument(msg) => {
                warn!(error = %msg, "Rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": msg })),
                )
                    .into_response()
            }
            err => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedStorage> {
    Router::new()
        .route("/boards", post(create_board))
        .route("/boards/{board_id}/columns", post(create_column))
        .route("/boards/{board_id}/view", get(view_board))
        .route("/columns/{column_id}/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{task_id}/move", put(move_task))
        .route("/tasks/{task_id}/reorder", put(reorder_task))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn create_board(
    State(storage): State<SharedStorage>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = CreateBoardRequest::from_body(&body)?;
    let board = storage.create_board(req.name).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

async fn create_column(
    State(storage): State<SharedStorage>,
    Path(board_id): Path<String>,
    Json(req): Json<CreateColumnRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id: BoardId = board_id.parse()?;
    let column = storage.create_column(&board_id, req.name).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

async fn create_task(
    State(storage): State<SharedStorage>,
    Path(column_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let column_id: ColumnId = column_id.parse()?;
    let task = storage.create_task(&column_id, req.title).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks(
    State(storage): State<SharedStorage>,
    Path(column_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let column_id: ColumnId = column_id.parse()?;
    let tasks = storage.list_tasks(&column_id).await?;
    Ok(Json(tasks))
}

async fn move_task(
    State(storage): State<SharedStorage>,
    Path(task_id): Path<String>,
    Json(req): Json<MoveTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task_id: TaskId = task_id.parse()?;
    let target: ColumnId = req.target_column_id.parse()?;
    let task = storage.move_task(&task_id, &target, req.new_order).await?;
    Ok(Json(task))
}

async fn reorder_task(
    State(storage): State<SharedStorage>,
    Path(task_id): Path<String>,
    Json(req): Json<ReorderTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task_id: TaskId = task_id.parse()?;
    let task = storage.reorder_task(&task_id, req.new_order).await?;
    Ok(Json(task))
}

async fn view_board(
    State(storage): State<SharedStorage>,
    Path(board_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id: BoardId = board_id.parse()?;
    let board = storage.view_board(&board_id).await?;
    Ok(Json(board))
}
