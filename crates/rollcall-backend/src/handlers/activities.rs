use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rollcall::data::{Confirmation, ParticipantQuery};
use rollcall::errors::ActivityError;
use rollcall::log;

use crate::services::ActivityService;

/// Handler to list every activity with its current roster
pub async fn list(State(state): State<Arc<crate::AppState>>) -> impl IntoResponse {
    match state.activities.list().await {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to list activities",
        )
            .into_response(),
    }
}

/// Handler to sign an email up for an activity
pub async fn signup(
    State(state): State<Arc<crate::AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> impl IntoResponse {
    match state.activities.signup(&name, &query.email).await {
        Ok(()) => {
            log::debug!("Signed up {} for {}", query.email, name);
            (
                StatusCode::OK,
                Json(Confirmation {
                    message: format!("Signed up {} for {}", query.email, name),
                }),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Handler to remove an email from an activity's roster
pub async fn remove(
    State(state): State<Arc<crate::AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> impl IntoResponse {
    match state.activities.remove(&name, &query.email).await {
        Ok(()) => {
            log::debug!("Removed {} from {}", query.email, name);
            (
                StatusCode::OK,
                Json(Confirmation {
                    message: format!("Removed {} from {}", query.email, name),
                }),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ActivityError) -> Response {
    let status = match err {
        ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
        ActivityError::AlreadyRegistered { .. }
        | ActivityError::NotRegistered { .. }
        | ActivityError::CapacityReached(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string()).into_response()
}
