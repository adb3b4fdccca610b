use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        AdminDashboardStats, CreateEventRequest, CreateVenueRequest, EventCreatedResponse,
        EventEnvelope, EventListResponse, LikesResponse, ROLE_ADMIN, ROLE_ORGANIZER, ROLE_USER,
        RegisterRequest, STATUS_APPROVED, STATUS_CANCELLED, STATUS_PENDING,
        SeriesModerationResponse, SuccessResponse, ToggleLikeRequest, ToggleLikeResponse,
        UpdateProfileRequest, UserEnvelope, VenueDetailEnvelope, VenueEnvelope,
        VenueListResponse,
    },
    recurrence::{expand_recurrence, recurrence_weekday},
    repository::{EventSubmission, NewUser},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// EventFilter
///
/// Accepted query parameters for the event listing (GET /events). Anything
/// other than `status=pending` lists approved events.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    /// 'approved' (default) or 'pending' (admin only).
    pub status: Option<String>,
    /// Restrict to a single calendar date.
    pub date: Option<NaiveDate>,
    /// Restrict to events carrying this category name.
    pub category: Option<String>,
    /// Restrict to a single venue.
    pub venue_id: Option<Uuid>,
    /// When true, only featured events.
    pub featured: Option<bool>,
}

/// VenueFilter
///
/// Accepted query parameters for the venue directory (GET /venues).
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VenueFilter {
    /// 'approved' (default), 'pending' or 'all'; everything except 'approved'
    /// is admin only.
    pub status: Option<String>,
}

/// SupabaseAuthResponse
///
/// Minimal deserialization of the identity provider's signup response; only
/// the new user's UUID matters here.
#[derive(Deserialize)]
struct SupabaseAuthResponse {
    id: Uuid,
}

fn require_admin(user: &AuthUser) -> Result<(), ApiError> {
    if user.role != ROLE_ADMIN {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

// --- Public Handlers ---

/// register
///
/// [Public Route] New user registration. Delegates the credential handling to
/// the identity provider's signup endpoint, then mirrors the provider-issued
/// UUID into the local `profiles` table so role lookups stay in one place.
///
/// Callers cannot self-assign the admin role: anything other than 'organizer'
/// registers as a plain user.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = UserEnvelope),
        (status = 400, description = "Invalid payload or provider rejection")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    if payload.email.trim().is_empty()
        || payload.password.is_empty()
        || payload.name.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Email, password, and name are required".to_string(),
        ));
    }

    let role = if payload.role.as_deref() == Some(ROLE_ORGANIZER) {
        ROLE_ORGANIZER
    } else {
        ROLE_USER
    };

    // Step 1: the identity provider owns the credentials.
    let client = reqwest::Client::new();
    let auth_url = format!("{}/auth/v1/signup", state.config.supabase_url);
    let response = client
        .post(auth_url)
        .header("apikey", &state.config.supabase_key)
        .json(&serde_json::json!({ "email": payload.email, "password": payload.password }))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("identity provider signup error: {:?}", e);
            ApiError::Internal
        })?;

    if !response.status().is_success() {
        // Duplicate email, weak password, etc.
        return Err(ApiError::Validation(
            "Registration was rejected by the identity provider".to_string(),
        ));
    }

    // Step 2: extract the canonical user ID from the provider response.
    let supabase_user = response
        .json::<SupabaseAuthResponse>()
        .await
        .map_err(|e| {
            tracing::error!("identity provider response decode error: {:?}", e);
            ApiError::Internal
        })?;

    // Step 3: mirror the profile locally, keyed by the provider UUID.
    let venue_name = (role == ROLE_ORGANIZER)
        .then(|| payload.venue_name.clone())
        .flatten();
    let user = state
        .repo
        .create_user(NewUser {
            id: supabase_user.id,
            email: payload.email.to_lowercase(),
            name: payload.name,
            role: role.to_string(),
            venue_name,
        })
        .await
        .ok_or(ApiError::Internal)?;

    Ok(Json(UserEnvelope { user: user.into() }))
}

/// list_events
///
/// [Public Route] Lists events with venue, category names and like counts,
/// ordered by date then start time. `status=pending` exposes the moderation
/// queue and is therefore admin only; every other status value falls back to
/// the approved listing.
#[utoipa::path(
    get,
    path = "/events",
    params(EventFilter),
    responses(
        (status = 200, description = "Filtered events", body = EventListResponse),
        (status = 403, description = "Pending listing requested without admin role")
    )
)]
pub async fn list_events(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<EventListResponse>, ApiError> {
    let status = match filter.status.as_deref() {
        Some(STATUS_PENDING) => {
            match user {
                Some(ref user) if user.role == ROLE_ADMIN => {}
                _ => return Err(ApiError::Forbidden),
            }
            STATUS_PENDING
        }
        _ => STATUS_APPROVED,
    };

    let events = state
        .repo
        .list_events(
            status,
            filter.date,
            filter.category,
            filter.venue_id,
            filter.featured.unwrap_or(false),
        )
        .await;
    Ok(Json(EventListResponse { events }))
}

/// get_event
///
/// [Public Route] Single approved event by ID. Pending and cancelled events
/// are indistinguishable from nonexistent ones to anonymous callers.
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Found", body = EventEnvelope),
        (status = 404, description = "Not found or not approved")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventEnvelope>, ApiError> {
    match state.repo.get_approved_event(id).await {
        Some(event) => Ok(Json(EventEnvelope { event })),
        None => Err(ApiError::NotFound("Event")),
    }
}

/// list_venues
///
/// [Public Route] The venue directory with per-venue event counts, ordered by
/// name. Only the approved listing is anonymous; 'pending' and 'all' expose
/// the moderation queue and require the admin role.
#[utoipa::path(
    get,
    path = "/venues",
    params(VenueFilter),
    responses(
        (status = 200, description = "Venues", body = VenueListResponse),
        (status = 403, description = "Non-approved listing requested without admin role")
    )
)]
pub async fn list_venues(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Query(filter): Query<VenueFilter>,
) -> Result<Json<VenueListResponse>, ApiError> {
    let status = filter
        .status
        .unwrap_or_else(|| STATUS_APPROVED.to_string());

    let repo_status = if status == STATUS_APPROVED {
        Some(STATUS_APPROVED.to_string())
    } else {
        match user {
            Some(ref user) if user.role == ROLE_ADMIN => {}
            _ => return Err(ApiError::Forbidden),
        }
        if status == "all" { None } else { Some(status) }
    };

    let venues = state.repo.list_venues(repo_status.as_deref()).await;
    Ok(Json(VenueListResponse { venues }))
}

/// get_venue
///
/// [Public Route] A single venue with its approved events.
#[utoipa::path(
    get,
    path = "/venues/{id}",
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses(
        (status = 200, description = "Found", body = VenueDetailEnvelope),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueDetailEnvelope>, ApiError> {
    match state.repo.get_venue_detail(id).await {
        Some(venue) => Ok(Json(VenueDetailEnvelope { venue })),
        None => Err(ApiError::NotFound("Venue")),
    }
}

/// get_likes
///
/// [Public Route, session-aware] Like counts for every event, plus the ids the
/// caller has liked when a valid session is presented. Anonymous callers get
/// the counts with an empty `likes` list.
#[utoipa::path(
    get,
    path = "/likes",
    responses((status = 200, description = "Likes", body = LikesResponse))
)]
pub async fn get_likes(
    user: Option<AuthUser>,
    State(state): State<AppState>,
) -> Json<LikesResponse> {
    let like_counts = state.repo.like_counts().await;
    let likes = match user {
        Some(user) => state.repo.liked_event_ids(user.id).await,
        None => vec![],
    };
    Json(LikesResponse { likes, like_counts })
}

// --- Authenticated Handlers ---

/// get_me
///
/// [Authenticated Route] The authenticated user's profile.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile", body = UserEnvelope))
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let user = state.repo.get_user(id).await.ok_or(ApiError::Unauthorized)?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

/// update_me
///
/// [Authenticated Route] Updates the caller's display name.
#[utoipa::path(
    put,
    path = "/me",
    request_body = UpdateProfileRequest,
    responses((status = 200, description = "Updated", body = UserEnvelope))
)]
pub async fn update_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    match state.repo.update_user_name(id, name).await {
        Some(user) => Ok(Json(UserEnvelope { user: user.into() })),
        None => Err(ApiError::NotFound("User")),
    }
}

/// delete_me
///
/// [Authenticated Route] Deletes the caller's account. The schema cascades
/// the user's likes away and detaches their submissions.
#[utoipa::path(
    delete,
    path = "/me",
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 404, description = "Already gone")
    )
)]
pub async fn delete_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if state.repo.delete_user(id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(ApiError::NotFound("User"))
    }
}

/// get_my_events
///
/// [Authenticated Route] The caller's submissions, newest first, including
/// pending and cancelled ones so the moderation state is visible.
#[utoipa::path(
    get,
    path = "/me/events",
    responses((status = 200, description = "My submissions", body = EventListResponse))
)]
pub async fn get_my_events(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<EventListResponse> {
    let events = state.repo.get_my_events(id).await;
    Json(EventListResponse { events })
}

/// create_event
///
/// [Authenticated Route] Event submission. Resolves the venue (existing id, or
/// an inline venue deduplicated case-insensitively by name), decides the
/// moderation status (admins and trusted submitters skip the queue), expands
/// recurring submissions into a parent-plus-children series, and stores the
/// whole batch transactionally.
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Created", body = EventCreatedResponse),
        (status = 400, description = "Missing required fields or venue")
    )
)]
pub async fn create_event(
    AuthUser { id: user_id, role }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<EventCreatedResponse>, ApiError> {
    if payload.title.trim().is_empty()
        || payload.description.trim().is_empty()
        || payload.start_time.trim().is_empty()
        || payload.categories.is_empty()
    {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    // Venue resolution: an explicit id wins; otherwise an inline venue must be
    // fully described. Inline names are matched against existing venues first
    // so resubmissions do not multiply the directory.
    let venue_id = match payload.venue_id {
        Some(id) => id,
        None => {
            let (Some(name), Some(address)) = (
                payload.new_venue_name.as_deref(),
                payload.new_venue_address.as_deref(),
            ) else {
                return Err(ApiError::Validation("Venue is required".to_string()));
            };
            match state.repo.find_venue_by_name(name).await {
                Some(existing) => existing.id,
                None => {
                    // New venues enter the moderation queue unless an admin
                    // submits them.
                    let venue_status = if role == ROLE_ADMIN {
                        STATUS_APPROVED
                    } else {
                        STATUS_PENDING
                    };
                    let venue = state
                        .repo
                        .create_venue(
                            CreateVenueRequest {
                                name: name.to_string(),
                                address: address.to_string(),
                                neighborhood: None,
                                website: None,
                                image_url: None,
                            },
                            venue_status,
                        )
                        .await
                        .ok_or(ApiError::Internal)?;
                    venue.id
                }
            }
        }
    };

    // Admins and trusted submitters skip moderation.
    let trusted = state
        .repo
        .get_user(user_id)
        .await
        .map(|u| u.is_trusted)
        .unwrap_or(false);
    let status = if role == ROLE_ADMIN || trusted {
        STATUS_APPROVED
    } else {
        STATUS_PENDING
    };

    let recurring = payload.is_recurring && payload.recurrence_pattern.is_some();
    let dates = match payload.recurrence_pattern.as_deref() {
        Some(pattern) if payload.is_recurring => {
            expand_recurrence(payload.date, pattern, payload.recurrence_end_date)
        }
        _ => vec![payload.date],
    };

    let submission = EventSubmission {
        title: payload.title,
        description: payload.description,
        dates,
        start_time: payload.start_time,
        end_time: payload.end_time,
        venue_id,
        price: payload.price,
        ticket_url: payload.ticket_url,
        image_url: payload.image_url,
        status: status.to_string(),
        submitted_by: Some(user_id),
        categories: payload.categories,
        is_recurring: recurring,
        recurrence_pattern: recurring.then(|| payload.recurrence_pattern.clone()).flatten(),
        recurrence_day: recurring.then(|| recurrence_weekday(payload.date)),
        recurrence_end_date: recurring.then(|| payload.recurrence_end_date).flatten(),
    };

    let (event, total_created) = state
        .repo
        .create_event(submission)
        .await
        .ok_or(ApiError::Internal)?;

    Ok(Json(EventCreatedResponse {
        event,
        total_created,
    }))
}

/// create_venue
///
/// [Authenticated Route] Direct venue submission. Admin submissions are
/// approved immediately; everything else joins the moderation queue.
#[utoipa::path(
    post,
    path = "/venues",
    request_body = CreateVenueRequest,
    responses(
        (status = 200, description = "Created", body = VenueEnvelope),
        (status = 400, description = "Name and address are required")
    )
)]
pub async fn create_venue(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<Json<VenueEnvelope>, ApiError> {
    if payload.name.trim().is_empty() || payload.address.trim().is_empty() {
        return Err(ApiError::Validation(
            "Name and address are required".to_string(),
        ));
    }

    let status = if role == ROLE_ADMIN {
        STATUS_APPROVED
    } else {
        STATUS_PENDING
    };
    let venue = state
        .repo
        .create_venue(payload, status)
        .await
        .ok_or(ApiError::Internal)?;
    Ok(Json(VenueEnvelope { venue }))
}

/// toggle_like
///
/// [Authenticated Route] Flips the caller's like for an event and returns the
/// new state plus the updated count. Toggling twice restores the original
/// state; the composite primary key on `likes` makes double-insertion
/// impossible.
#[utoipa::path(
    post,
    path = "/likes",
    request_body = ToggleLikeRequest,
    responses(
        (status = 200, description = "Toggled", body = ToggleLikeResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn toggle_like(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<Json<ToggleLikeResponse>, ApiError> {
    if !state.repo.event_exists(payload.event_id).await {
        return Err(ApiError::NotFound("Event"));
    }
    let result = state
        .repo
        .toggle_like(user_id, payload.event_id)
        .await
        .ok_or(ApiError::Internal)?;
    Ok(Json(result))
}

// --- Admin Handlers ---

/// get_admin_stats
///
/// [Admin Route] Dashboard counters: totals plus the two moderation queues.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Stats", body = AdminDashboardStats),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn get_admin_stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardStats>, ApiError> {
    require_admin(&user)?;
    Ok(Json(state.repo.get_stats().await))
}

/// approve_event
///
/// [Admin Route] Approves a single pending event.
#[utoipa::path(
    post,
    path = "/admin/events/{id}/approve",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Approved", body = EventEnvelope),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_event(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventEnvelope>, ApiError> {
    require_admin(&user)?;
    match state.repo.set_event_status(id, STATUS_APPROVED).await {
        Some(event) => Ok(Json(EventEnvelope { event })),
        None => Err(ApiError::NotFound("Event")),
    }
}

/// reject_event
///
/// [Admin Route] Rejects a pending event by deleting it.
#[utoipa::path(
    post,
    path = "/admin/events/{id}/reject",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Rejected", body = SuccessResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_event(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&user)?;
    if state.repo.delete_event(id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(ApiError::NotFound("Event"))
    }
}

/// cancel_event
///
/// [Admin Route] Marks an event cancelled. The row is kept so the listing can
/// be restored, but it vanishes from the approved listings.
#[utoipa::path(
    post,
    path = "/admin/events/{id}/cancel",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Cancelled", body = SuccessResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_event(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&user)?;
    match state.repo.set_event_status(id, STATUS_CANCELLED).await {
        Some(_) => Ok(Json(SuccessResponse { success: true })),
        None => Err(ApiError::NotFound("Event")),
    }
}

/// approve_recurring
///
/// [Admin Route] Approves a whole recurring series at once: every pending
/// event whose id or parent reference matches the given parent id. Returns
/// how many rows were approved (0 when nothing was pending).
#[utoipa::path(
    post,
    path = "/admin/events/{parent_id}/approve-recurring",
    params(("parent_id" = Uuid, Path, description = "Parent event ID")),
    responses(
        (status = 200, description = "Series approved", body = SeriesModerationResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn approve_recurring(
    user: AuthUser,
    State(state): State<AppState>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<SeriesModerationResponse>, ApiError> {
    require_admin(&user)?;
    let count = state.repo.approve_series(parent_id).await;
    Ok(Json(SeriesModerationResponse {
        success: true,
        count,
    }))
}

/// reject_recurring
///
/// [Admin Route] Rejects a whole recurring series: deletes every pending event
/// of the series, leaving already-approved instances untouched.
#[utoipa::path(
    post,
    path = "/admin/events/{parent_id}/reject-recurring",
    params(("parent_id" = Uuid, Path, description = "Parent event ID")),
    responses(
        (status = 200, description = "Series rejected", body = SeriesModerationResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn reject_recurring(
    user: AuthUser,
    State(state): State<AppState>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<SeriesModerationResponse>, ApiError> {
    require_admin(&user)?;
    let count = state.repo.reject_series(parent_id).await;
    Ok(Json(SeriesModerationResponse {
        success: true,
        count,
    }))
}

/// approve_venue
///
/// [Admin Route] Approves a pending venue.
#[utoipa::path(
    post,
    path = "/admin/venues/{id}/approve",
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses(
        (status = 200, description = "Approved", body = VenueEnvelope),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_venue(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueEnvelope>, ApiError> {
    require_admin(&user)?;
    match state.repo.set_venue_status(id, STATUS_APPROVED).await {
        Some(venue) => Ok(Json(VenueEnvelope { venue })),
        None => Err(ApiError::NotFound("Venue")),
    }
}

/// reject_venue
///
/// [Admin Route] Rejects a venue by deleting it. Dependent events are removed
/// by the schema cascade.
#[utoipa::path(
    post,
    path = "/admin/venues/{id}/reject",
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses(
        (status = 200, description = "Rejected", body = SuccessResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_venue(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&user)?;
    if state.repo.delete_venue(id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(ApiError::NotFound("Venue"))
    }
}
