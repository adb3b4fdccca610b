use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). These routes cover the read side of the events
/// calendar and the venue directory, plus the registration gateway.
///
/// Security Mandate:
/// All data retrieval handlers in this module must default to the approved
/// listing at the Repository level. The pending moderation queues are only
/// reachable through these routes when the optional session carries the admin
/// role; anonymous callers can never see unreviewed submissions.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /register
        // Endpoint for new user creation and initial profile setup. Credentials
        // are owned by the identity provider; only the mirrored profile lives here.
        .route("/register", post(handlers::register))
        // GET /events?status=...&date=...&category=...&venueId=...&featured=...
        // Lists approved events with venue, categories and like counts.
        // `status=pending` is the moderation queue and requires the admin role.
        .route("/events", get(handlers::list_events))
        // GET /events/{id}
        // Retrieves a single approved event. Pending and cancelled events look
        // like 404s to anonymous callers.
        .route("/events/{id}", get(handlers::get_event))
        // GET /venues?status=...
        // The venue directory with per-venue event counts (all statuses).
        .route("/venues", get(handlers::list_venues))
        // GET /venues/{id}
        // Retrieves a single venue together with its approved events.
        .route("/venues/{id}", get(handlers::get_venue))
        // GET /likes
        // Like counts for every event; when a valid session is presented the
        // response also carries the caller's own liked event ids.
        .route("/likes", get(handlers::get_likes))
}
