use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use rollcall::errors::Report;
use rollcall::log;

mod handlers;
mod services;

use services::ActivityServiceInMemory;

/// Shared state handed to every request handler.
pub struct AppState {
    pub activities: ActivityServiceInMemory,
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    // Setup logging
    rollcall::log::setup()?;

    // Capacity enforcement is off unless asked for, matching the observed
    // behavior where max_participants is informational only
    let enforce_capacity = std::env::var("ROLLCALL_ENFORCE_CAPACITY")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    if enforce_capacity {
        log::info!("Capacity enforcement enabled");
    }

    let state = Arc::new(AppState {
        activities: ActivityServiceInMemory::seeded(enforce_capacity),
    });

    // Setup the routes
    let app = router(state);

    // Setup the server
    let addr: SocketAddr = std::env::var("ROLLCALL_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Starting server on http://{}", listener.local_addr()?);
    log::info!("Press Ctrl+C to stop the server");

    // Start the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutting down server");

    Ok(())
}

/// Setup the routes for the server and configure CORS
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/activities", get(handlers::activities::list))
        .route(
            "/activities/{name}/signup",
            post(handlers::activities::signup),
        )
        .route(
            "/activities/{name}/participants",
            delete(handlers::activities::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = if cfg!(debug_assertions) {
        let dev_ports = [3000, 8000, 8080, 8081, 5173];
        let mut allowed_origins = Vec::new();
        for port in dev_ports {
            allowed_origins.push(format!("http://localhost:{}", port));
            allowed_origins.push(format!("http://127.0.0.1:{}", port));
        }
        allowed_origins
            .iter()
            .map(|origin| origin.parse().expect("static origin is a valid header"))
            .collect()
    } else {
        // Production origins - add your domains here
        vec![]
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use rollcall::data::Activity;

    use crate::services::ActivityService;

    fn test_app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState {
            activities: ActivityServiceInMemory::seeded(false),
        });
        (state.clone(), router(state))
    }

    async fn body_json<T: rollcall::serde::de::DeserializeOwned>(
        response: axum::response::Response,
    ) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        rollcall::serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_activities_returns_seeded_names() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/activities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let activities: HashMap<String, Activity> = body_json(response).await;
        for name in ["Chess Club", "Programming Class", "Gym Class"] {
            assert!(activities.contains_key(name), "missing {name}");
        }
    }

    #[tokio::test]
    async fn signup_duplicate_then_remove_round_trip() {
        let (state, app) = test_app();
        let uri = "/activities/Chess%20Club/signup?email=testuser@example.com";

        // First signup succeeds
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let confirmation: rollcall::data::Confirmation = body_json(response).await;
        assert!(confirmation.message.contains("testuser@example.com"));

        // Repeating the same call is a bad request
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The roster holds the email exactly once
        let activities = state.activities.list().await.unwrap();
        let count = activities["Chess Club"]
            .participants
            .iter()
            .filter(|p| *p == "testuser@example.com")
            .count();
        assert_eq!(count, 1);

        // Removal succeeds and the email is gone afterwards
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/activities/Chess%20Club/participants?email=testuser@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let activities = state.activities.list().await.unwrap();
        assert!(!activities["Chess Club"].is_registered("testuser@example.com"));
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let (_state, app) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/activities/No%20Such%20Club/signup?email=someone@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/activities/No%20Such%20Club/participants?email=someone@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn removing_absent_participant_is_bad_request() {
        let (state, app) = test_app();
        let before = state.activities.list().await.unwrap()["Chess Club"].clone();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/activities/Chess%20Club/participants?email=stranger@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let after = state.activities.list().await.unwrap()["Chess Club"].clone();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn capacity_enforcement_rejects_full_roster_over_http() {
        let state = Arc::new(AppState {
            activities: ActivityServiceInMemory::seeded(true),
        });
        let app = router(state);

        // Chess Club seeds 2 of 12, so fill the remaining seats
        for n in 0..10 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(format!(
                            "/activities/Chess%20Club/signup?email=student{n}@example.com"
                        ))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/activities/Chess%20Club/signup?email=overflow@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
