use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::state::AppState;

/// Full HTTP surface of the service
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .route("/api/ping", get(handlers::system::ping))
        .merge(auth_routes())
        .merge(catalog_routes())
        .merge(student_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::{auth, users};

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/users", get(users::list))
}

fn catalog_routes() -> Router<AppState> {
    use handlers::{courses, lessons};

    Router::new()
        .route("/api/courses", get(courses::list).post(courses::create))
        .route("/api/courses/:id", get(courses::get).delete(courses::delete))
        .route("/api/lessons", post(lessons::create))
        .route("/api/lessons/:id", delete(lessons::delete))
}

fn student_routes() -> Router<AppState> {
    use handlers::{enrollments, lessons, progress, quiz};

    Router::new()
        // Enrollment pair travels in the body for both create and delete
        .route(
            "/api/enrollments",
            post(enrollments::create).delete(enrollments::delete),
        )
        .route("/api/enrollments/:email", get(enrollments::list))
        .route("/api/progress", post(progress::update))
        .route("/api/progress/:email/:course_id", get(progress::get))
        .route("/api/quiz/submit", post(quiz::submit))
        .route("/api/quiz/result/:email/:course_id", get(quiz::result))
        .route("/api/lessons/complete", post(lessons::complete))
        .route("/api/lessons/completed/:email/:course_id", get(lessons::completed))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
