use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the 'admin' role.
/// These endpoints provide moderation over both submission queues (events and
/// venues) and statistical oversight.
///
/// Access Control:
/// This entire router is nested behind the authentication middleware, and every
/// handler additionally checks for `role='admin'` before doing anything. An
/// authenticated non-admin therefore receives 403, not 401.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/stats
        // Retrieves core dashboard metrics (totals plus both pending queues).
        .route("/stats", get(handlers::get_admin_stats))
        // POST /admin/events/{id}/approve
        // Approves a single pending event and returns the updated record.
        .route("/events/{id}/approve", post(handlers::approve_event))
        // POST /admin/events/{id}/reject
        // Rejects a pending event by deleting it outright.
        .route("/events/{id}/reject", post(handlers::reject_event))
        // POST /admin/events/{id}/cancel
        // Marks an approved event cancelled without deleting the record.
        .route("/events/{id}/cancel", post(handlers::cancel_event))
        // POST /admin/events/{parent_id}/approve-recurring
        // Approves every still-pending event of a recurring series in one
        // statement: the parent itself and all children referencing it.
        .route(
            "/events/{parent_id}/approve-recurring",
            post(handlers::approve_recurring),
        )
        // POST /admin/events/{parent_id}/reject-recurring
        // Deletes every still-pending event of a recurring series. Instances
        // approved individually beforehand are left untouched.
        .route(
            "/events/{parent_id}/reject-recurring",
            post(handlers::reject_recurring),
        )
        // POST /admin/venues/{id}/approve
        // Approves a pending venue, making it visible in the public directory.
        .route("/venues/{id}/approve", post(handlers::approve_venue))
        // POST /admin/venues/{id}/reject
        // Rejects a venue by deleting it; dependent events cascade away.
        .route("/venues/{id}/reject", post(handlers::reject_venue))
}
