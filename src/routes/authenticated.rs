use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any user who has successfully passed the
/// authentication layer. This module implements all core application features
/// for a signed-in user: event submission (one-off and recurring), venue
/// submission, likes, and profile self-service.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `AuthUser` extractor middleware
/// being present on the router layer above this module. This guarantees that
/// all handlers receive a validated `AuthUser` struct containing the user's ID
/// and role.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET/PUT/DELETE /me
        // Profile self-service: read the profile, rename it, or delete the
        // account entirely (likes cascade away, submissions are detached).
        .route(
            "/me",
            get(handlers::get_me)
                .put(handlers::update_me)
                .delete(handlers::delete_me),
        )
        // GET /me/events
        // Lists the caller's own submissions regardless of moderation status,
        // so pending and cancelled ones stay visible to their submitter.
        .route("/me/events", get(handlers::get_my_events))
        // POST /events
        // Submits a new event. Recurring submissions are expanded into a full
        // parent-plus-children series in a single transaction; admins and
        // trusted submitters skip the moderation queue.
        .route("/events", post(handlers::create_event))
        // POST /venues
        // Submits a new venue to the directory (pending unless admin).
        .route("/venues", post(handlers::create_venue))
        // POST /likes
        // Toggles the caller's like on an event. The composite primary key on
        // the `likes` table makes double-liking impossible.
        .route("/likes", post(handlers::toggle_like))
}
