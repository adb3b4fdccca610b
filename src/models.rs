use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Status & role vocabulary ---
//
// Statuses and roles are stored as plain text columns; these constants are the
// only values the application ever writes.

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const ROLE_USER: &str = "user";
pub const ROLE_ORGANIZER: &str = "organizer";
pub const ROLE_ADMIN: &str = "admin";

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The user's canonical identity record stored in the `profiles` table. The
/// primary key is the UUID issued by the external identity provider, so the
/// local row mirrors the provider's `auth.users` entry one-to-one.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    // The RBAC field: 'user', 'organizer' or 'admin'.
    pub role: String,
    // Organizers may attach the venue they represent at registration time.
    pub venue_name: Option<String>,
    // Trusted submitters skip the moderation queue on event submission.
    pub is_trusted: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Venue
///
/// A location entity that events reference, from the `venues` table. Venues go
/// through the same pending/approved moderation flow as events; deleting a
/// venue cascades to its events at the schema level.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    // 'pending' | 'approved'.
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Event
///
/// A raw event row from the `events` table. Listing endpoints never return
/// this directly; the repository enriches it into an [`EventResponse`] with
/// the venue record, flattened category names and the like count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    // Wall-clock times are kept as "HH:MM" strings, matching the wire format.
    pub start_time: String,
    pub end_time: Option<String>,
    pub venue_id: Uuid,
    pub price: Option<String>,
    pub ticket_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    // 'pending' | 'approved' | 'cancelled'.
    pub status: String,
    // Nullable: detached when the submitting account is deleted.
    pub submitted_by: Option<Uuid>,

    // Recurrence fields. A recurring submission produces one parent row plus
    // child rows carrying `parent_event_id`.
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    // 0-6, Sunday-based day of week of the series.
    pub recurrence_day: Option<i32>,
    pub recurrence_end_date: Option<NaiveDate>,
    pub parent_event_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like
///
/// A join record expressing a user's interest in an event. Uniqueness per
/// (user, event) pair is the composite primary key on the `likes` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Like {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

// --- Enriched Response Shapes (Output) ---

/// EventResponse
///
/// The UI-ready event shape: the event row joined with its venue, the category
/// names flattened to strings, and the current like count.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub price: Option<String>,
    pub ticket_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub status: String,
    pub venue: Venue,
    pub categories: Vec<String>,
    pub like_count: i64,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    pub recurrence_day: Option<i32>,
    pub recurrence_end_date: Option<NaiveDate>,
    pub parent_event_id: Option<Uuid>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// VenueResponse
///
/// Directory listing shape: the venue row plus how many events reference it.
/// FromRow because the listing query computes the count in SQL.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VenueResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub event_count: i64,
}

/// VenueDetailResponse
///
/// Venue detail page shape: the venue plus its approved events.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VenueDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub events: Vec<EventResponse>,
}

/// UserProfile
///
/// The authenticated user's own profile shape (GET /me). Moderation-internal
/// fields such as `is_trusted` are not exposed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub venue_name: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            venue_name: user.venue_name,
            created_at: user.created_at,
        }
    }
}

/// AdminDashboardStats
///
/// Output schema for the administrative dashboard (GET /admin/stats): totals
/// plus the two moderation queues.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminDashboardStats {
    pub total_events: i64,
    pub total_venues: i64,
    pub total_users: i64,
    pub total_likes: i64,
    pub pending_events: i64,
    pub pending_venues: i64,
}

// --- Request Payloads (Input Schemas) ---

/// RegisterRequest
///
/// Input payload for the public registration endpoint (POST /register). The
/// password is only passed through to the external identity provider and never
/// persisted or logged by this application.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    // Defaults to 'user' when absent.
    pub role: Option<String>,
    // Only kept when registering as an organizer.
    pub venue_name: Option<String>,
}

/// CreateEventRequest
///
/// Input payload for submitting a new event (POST /events). The venue is
/// referenced either by `venue_id` or described inline with the two
/// `new_venue_*` fields; inline venues are deduplicated case-insensitively by
/// name before being created.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub venue_id: Option<Uuid>,
    pub new_venue_name: Option<String>,
    pub new_venue_address: Option<String>,
    pub categories: Vec<String>,
    pub price: Option<String>,
    pub ticket_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    // 'weekly' | 'biweekly' | 'monthly'.
    pub recurrence_pattern: Option<String>,
    pub recurrence_end_date: Option<NaiveDate>,
}

/// CreateVenueRequest
///
/// Input payload for submitting a venue directly (POST /venues).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

/// ToggleLikeRequest
///
/// Input payload for the like toggle (POST /likes).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToggleLikeRequest {
    pub event_id: Uuid,
}

/// UpdateProfileRequest
///
/// Input payload for updating the authenticated user's display name (PUT /me).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProfileRequest {
    pub name: String,
}

// --- Response Envelopes ---
//
// The wire format wraps every payload in a named envelope (`{ "events": [...] }`,
// `{ "venue": ... }`), which the frontend relies on.

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventEnvelope {
    pub event: EventResponse,
}

/// Returned by POST /events: the parent event plus the total number of rows
/// created (1 for a one-off, N for a recurring series).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventCreatedResponse {
    pub event: EventResponse,
    pub total_created: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VenueListResponse {
    pub venues: Vec<VenueResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VenueEnvelope {
    pub venue: Venue,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VenueDetailEnvelope {
    pub venue: VenueDetailResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

/// Returned by GET /likes: like counts for every event, plus the ids the
/// caller has liked (empty for anonymous callers).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LikesResponse {
    pub likes: Vec<Uuid>,
    pub like_counts: HashMap<Uuid, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Returned by the recurring-series moderation endpoints with the number of
/// pending rows the operation touched.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SeriesModerationResponse {
    pub success: bool,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
