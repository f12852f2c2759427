//! HTTP surface for the permission engine
//!
//! Stateless: the browser owns its selections and posts them with each call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::graph::{graph_view, GraphView};
use crate::selection::{ExpandedGroups, Selection};
use crate::tree::PermissionTree;
use crate::view::{tree_rows, TreeRow};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    #[serde(default)]
    selection: Selection,
    id: String,
}

#[derive(Debug, Deserialize)]
struct RowsRequest {
    #[serde(default)]
    selection: Selection,
    #[serde(default)]
    expanded: ExpandedGroups,
}

#[derive(Debug, Deserialize)]
struct GraphRequest {
    #[serde(default)]
    selection: Selection,
}

#[derive(Debug, Serialize)]
struct SelectionResponse {
    selection: Selection,
}

#[derive(Debug, Serialize)]
struct LabelResponse {
    id: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// ============================================================================
// App State
// ============================================================================

#[derive(Clone)]
struct AppState {
    tree: &'static PermissionTree,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_tree(State(state): State<AppState>) -> Json<&'static PermissionTree> {
    Json(state.tree)
}

async fn get_label(State(state): State<AppState>, Path(id): Path<String>) -> Json<LabelResponse> {
    let label = state.tree.lookup_label(&id);
    Json(LabelResponse { id, label })
}

async fn toggle_selection(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<SelectionResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "id must not be empty".to_string() }),
        ));
    }
    let selection = req.selection.toggle_in(state.tree, &req.id);
    Ok(Json(SelectionResponse { selection }))
}

async fn selection_rows(State(state): State<AppState>, Json(req): Json<RowsRequest>) -> Json<Vec<TreeRow>> {
    Json(tree_rows(state.tree, &req.selection, &req.expanded))
}

async fn selection_graph(State(state): State<AppState>, Json(req): Json<GraphRequest>) -> Json<GraphView> {
    Json(graph_view(state.tree, &req.selection))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(tree: &'static PermissionTree) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tree", get(get_tree))
        .route("/labels/:id", get(get_label))
        .route("/selection/toggle", post(toggle_selection))
        .route("/selection/rows", post(selection_rows))
        .route("/selection/graph", post(selection_graph))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { tree })
}
