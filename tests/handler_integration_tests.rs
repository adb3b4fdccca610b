use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use happenings::{
    AppState,
    auth::AuthUser,
    config::AppConfig,
    error::ApiError,
    handlers::{self, EventFilter, VenueFilter},
    models::{
        AdminDashboardStats, CreateEventRequest, CreateVenueRequest, EventResponse,
        ToggleLikeRequest, ToggleLikeResponse, UpdateProfileRequest, User, Venue,
        VenueDetailResponse, VenueResponse,
    },
    repository::{EventSubmission, NewUser, Repository},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::test;
use uuid::Uuid;

// --- MOCK REPOSITORY IMPLEMENTATION ---

// This struct is the central control point for testing handler logic.
// Handlers rely on the Repository trait, so we mock the trait implementation.
#[derive(Default)]
pub struct MockRepoControl {
    // Pre-canned outputs for handler requests
    pub events_to_return: Vec<EventResponse>,
    pub event_to_return: Option<EventResponse>,
    pub venues_to_return: Vec<VenueResponse>,
    pub venue_detail_to_return: Option<VenueDetailResponse>,
    pub venue_to_return: Option<Venue>,
    pub find_venue_result: Option<Venue>,
    pub user_to_return: Option<User>,
    pub toggle_result: Option<ToggleLikeResponse>,
    pub stats_to_return: AdminDashboardStats,
    pub liked_ids: Vec<Uuid>,
    pub counts: HashMap<Uuid, i64>,

    // Behavior switches
    pub create_event_fails: bool,
    pub delete_result: bool,
    pub series_count: u64,
    pub event_exists_result: bool,

    // Captured input so tests can verify what the handler actually submitted
    pub captured_submission: Arc<Mutex<Option<EventSubmission>>>,
}

#[async_trait]
impl Repository for MockRepoControl {
    async fn list_events(
        &self,
        _status: &str,
        _date: Option<NaiveDate>,
        _category: Option<String>,
        _venue_id: Option<Uuid>,
        _featured: bool,
    ) -> Vec<EventResponse> {
        self.events_to_return.clone()
    }
    async fn get_approved_event(&self, _id: Uuid) -> Option<EventResponse> {
        self.event_to_return.clone()
    }
    async fn get_my_events(&self, _user_id: Uuid) -> Vec<EventResponse> {
        self.events_to_return.clone()
    }
    async fn create_event(&self, submission: EventSubmission) -> Option<(EventResponse, i64)> {
        if self.create_event_fails {
            return None;
        }
        let total = submission.dates.len() as i64;
        *self.captured_submission.lock().unwrap() = Some(submission);
        Some((EventResponse::default(), total))
    }
    async fn set_event_status(&self, _id: Uuid, _status: &str) -> Option<EventResponse> {
        self.event_to_return.clone()
    }
    async fn delete_event(&self, _id: Uuid) -> bool {
        self.delete_result
    }
    async fn approve_series(&self, _parent_id: Uuid) -> u64 {
        self.series_count
    }
    async fn reject_series(&self, _parent_id: Uuid) -> u64 {
        self.series_count
    }
    async fn event_exists(&self, _id: Uuid) -> bool {
        self.event_exists_result
    }

    async fn list_venues(&self, _status: Option<&str>) -> Vec<VenueResponse> {
        self.venues_to_return.clone()
    }
    async fn get_venue_detail(&self, _id: Uuid) -> Option<VenueDetailResponse> {
        self.venue_detail_to_return.clone()
    }
    async fn create_venue(&self, _req: CreateVenueRequest, _status: &str) -> Option<Venue> {
        self.venue_to_return.clone()
    }
    async fn find_venue_by_name(&self, _name: &str) -> Option<Venue> {
        self.find_venue_result.clone()
    }
    async fn set_venue_status(&self, _id: Uuid, _status: &str) -> Option<Venue> {
        self.venue_to_return.clone()
    }
    async fn delete_venue(&self, _id: Uuid) -> bool {
        self.delete_result
    }

    async fn get_user(&self, _id: Uuid) -> Option<User> {
        self.user_to_return.clone()
    }
    async fn create_user(&self, user: NewUser) -> Option<User> {
        Some(User {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            venue_name: user.venue_name,
            ..User::default()
        })
    }
    async fn update_user_name(&self, _id: Uuid, _name: &str) -> Option<User> {
        self.user_to_return.clone()
    }
    async fn delete_user(&self, _id: Uuid) -> bool {
        self.delete_result
    }

    async fn liked_event_ids(&self, _user_id: Uuid) -> Vec<Uuid> {
        self.liked_ids.clone()
    }
    async fn like_counts(&self) -> HashMap<Uuid, i64> {
        self.counts.clone()
    }
    async fn toggle_like(&self, _user_id: Uuid, _event_id: Uuid) -> Option<ToggleLikeResponse> {
        self.toggle_result.clone()
    }

    async fn get_stats(&self) -> AdminDashboardStats {
        self.stats_to_return.clone()
    }
}

// --- TEST UTILITIES ---

const TEST_ID: Uuid = Uuid::from_u128(123);
const TEST_ADMIN_ID: Uuid = Uuid::from_u128(456);

// Creates an AppState using the mock repository
fn create_test_state(repo_control: MockRepoControl) -> AppState {
    AppState {
        repo: Arc::new(repo_control),
        config: AppConfig::default(),
    }
}

// Creates AuthUser values for direct handler calls
fn admin_user() -> AuthUser {
    AuthUser {
        id: TEST_ADMIN_ID,
        role: "admin".to_string(),
    }
}
fn regular_user() -> AuthUser {
    AuthUser {
        id: TEST_ID,
        role: "user".to_string(),
    }
}

fn empty_event_filter() -> EventFilter {
    EventFilter {
        status: None,
        date: None,
        category: None,
        venue_id: None,
        featured: None,
    }
}

fn valid_event_payload() -> CreateEventRequest {
    CreateEventRequest {
        title: "Open Mic Night".to_string(),
        description: "Weekly open mic".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
        start_time: "19:00".to_string(),
        venue_id: Some(Uuid::from_u128(99)),
        categories: vec!["music".to_string()],
        ..CreateEventRequest::default()
    }
}

// --- LISTING TESTS ---

#[test]
async fn test_list_events_pending_requires_admin() {
    let state = create_test_state(MockRepoControl::default());

    let filter = EventFilter {
        status: Some("pending".to_string()),
        ..empty_event_filter()
    };
    // Anonymous caller asking for the moderation queue
    let result = handlers::list_events(None, State(state), Query(filter)).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[test]
async fn test_list_events_pending_as_admin() {
    let state = create_test_state(MockRepoControl {
        events_to_return: vec![EventResponse::default()],
        ..MockRepoControl::default()
    });

    let filter = EventFilter {
        status: Some("pending".to_string()),
        ..empty_event_filter()
    };
    let result = handlers::list_events(Some(admin_user()), State(state), Query(filter)).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    assert_eq!(body.events.len(), 1);
}

#[test]
async fn test_list_events_unknown_status_falls_back_to_approved() {
    // A made-up status must not leak anything; the handler collapses it to the
    // approved listing instead of passing it through.
    let state = create_test_state(MockRepoControl::default());

    let filter = EventFilter {
        status: Some("cancelled".to_string()),
        ..empty_event_filter()
    };
    let result = handlers::list_events(None, State(state), Query(filter)).await;

    assert!(result.is_ok());
}

#[test]
async fn test_get_event_not_found() {
    let state = create_test_state(MockRepoControl {
        event_to_return: None,
        ..MockRepoControl::default()
    });

    let result = handlers::get_event(State(state), Path(TEST_ID)).await;

    assert!(matches!(result, Err(ApiError::NotFound("Event"))));
}

#[test]
async fn test_list_venues_all_requires_admin() {
    let state = create_test_state(MockRepoControl::default());

    let filter = VenueFilter {
        status: Some("all".to_string()),
    };
    let result = handlers::list_venues(Some(regular_user()), State(state), Query(filter)).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[test]
async fn test_list_venues_default_is_public() {
    let state = create_test_state(MockRepoControl {
        venues_to_return: vec![VenueResponse::default()],
        ..MockRepoControl::default()
    });

    let result =
        handlers::list_venues(None, State(state), Query(VenueFilter { status: None })).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    assert_eq!(body.venues.len(), 1);
}

// --- SUBMISSION TESTS ---

#[test]
async fn test_create_event_missing_fields() {
    let state = create_test_state(MockRepoControl::default());

    let payload = CreateEventRequest {
        title: "  ".to_string(),
        ..valid_event_payload()
    };
    let result = handlers::create_event(regular_user(), State(state), Json(payload)).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
async fn test_create_event_requires_some_venue() {
    let state = create_test_state(MockRepoControl::default());

    // Neither venue_id nor the inline venue fields
    let payload = CreateEventRequest {
        venue_id: None,
        ..valid_event_payload()
    };
    let result = handlers::create_event(regular_user(), State(state), Json(payload)).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
async fn test_create_event_regular_user_is_pending() {
    let captured = Arc::new(Mutex::new(None));
    let state = create_test_state(MockRepoControl {
        captured_submission: captured.clone(),
        // Untrusted submitter profile
        user_to_return: Some(User {
            id: TEST_ID,
            role: "user".to_string(),
            is_trusted: false,
            ..User::default()
        }),
        ..MockRepoControl::default()
    });

    let result =
        handlers::create_event(regular_user(), State(state), Json(valid_event_payload())).await;

    assert!(result.is_ok());
    let submission = captured.lock().unwrap().clone().unwrap();
    assert_eq!(submission.status, "pending");
    assert_eq!(submission.dates.len(), 1);
    assert_eq!(submission.submitted_by, Some(TEST_ID));
}

#[test]
async fn test_create_event_trusted_user_skips_moderation() {
    let captured = Arc::new(Mutex::new(None));
    let state = create_test_state(MockRepoControl {
        captured_submission: captured.clone(),
        user_to_return: Some(User {
            id: TEST_ID,
            role: "user".to_string(),
            is_trusted: true,
            ..User::default()
        }),
        ..MockRepoControl::default()
    });

    let result =
        handlers::create_event(regular_user(), State(state), Json(valid_event_payload())).await;

    assert!(result.is_ok());
    let submission = captured.lock().unwrap().clone().unwrap();
    assert_eq!(submission.status, "approved");
}

#[test]
async fn test_create_event_recurring_expands_series() {
    let captured = Arc::new(Mutex::new(None));
    let state = create_test_state(MockRepoControl {
        captured_submission: captured.clone(),
        ..MockRepoControl::default()
    });

    let payload = CreateEventRequest {
        date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
        is_recurring: true,
        recurrence_pattern: Some("weekly".to_string()),
        recurrence_end_date: NaiveDate::from_ymd_opt(2026, 9, 25),
        ..valid_event_payload()
    };
    let result = handlers::create_event(regular_user(), State(state), Json(payload)).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    // Sep 4, 11, 18, 25
    assert_eq!(body.total_created, 4);

    let submission = captured.lock().unwrap().clone().unwrap();
    assert_eq!(submission.dates.len(), 4);
    assert!(submission.is_recurring);
    // Sep 4 2026 is a Friday
    assert_eq!(submission.recurrence_day, Some(5));
}

#[test]
async fn test_create_event_inline_venue_reuses_existing() {
    let captured = Arc::new(Mutex::new(None));
    let existing_venue_id = Uuid::from_u128(777);
    let state = create_test_state(MockRepoControl {
        captured_submission: captured.clone(),
        find_venue_result: Some(Venue {
            id: existing_venue_id,
            name: "The Grad Club".to_string(),
            ..Venue::default()
        }),
        ..MockRepoControl::default()
    });

    let payload = CreateEventRequest {
        venue_id: None,
        new_venue_name: Some("the grad club".to_string()),
        new_venue_address: Some("162 Barrie St".to_string()),
        ..valid_event_payload()
    };
    let result = handlers::create_event(regular_user(), State(state), Json(payload)).await;

    assert!(result.is_ok());
    let submission = captured.lock().unwrap().clone().unwrap();
    assert_eq!(submission.venue_id, existing_venue_id);
}

#[test]
async fn test_create_venue_validation() {
    let state = create_test_state(MockRepoControl::default());

    let payload = CreateVenueRequest {
        name: "Somewhere".to_string(),
        address: "".to_string(),
        ..CreateVenueRequest::default()
    };
    let result = handlers::create_venue(regular_user(), State(state), Json(payload)).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

// --- LIKE TESTS ---

#[test]
async fn test_toggle_like_unknown_event() {
    let state = create_test_state(MockRepoControl {
        event_exists_result: false,
        ..MockRepoControl::default()
    });

    let payload = ToggleLikeRequest { event_id: TEST_ID };
    let result = handlers::toggle_like(regular_user(), State(state), Json(payload)).await;

    assert!(matches!(result, Err(ApiError::NotFound("Event"))));
}

#[test]
async fn test_toggle_like_success() {
    let state = create_test_state(MockRepoControl {
        event_exists_result: true,
        toggle_result: Some(ToggleLikeResponse {
            liked: true,
            like_count: 3,
        }),
        ..MockRepoControl::default()
    });

    let payload = ToggleLikeRequest { event_id: TEST_ID };
    let result = handlers::toggle_like(regular_user(), State(state), Json(payload)).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    assert!(body.liked);
    assert_eq!(body.like_count, 3);
}

#[test]
async fn test_get_likes_anonymous_has_counts_only() {
    let mut counts = HashMap::new();
    counts.insert(TEST_ID, 5i64);
    let state = create_test_state(MockRepoControl {
        liked_ids: vec![TEST_ID],
        counts,
        ..MockRepoControl::default()
    });

    let Json(body) = handlers::get_likes(None, State(state)).await;

    assert!(body.likes.is_empty());
    assert_eq!(body.like_counts.get(&TEST_ID), Some(&5));
}

// --- PROFILE TESTS ---

#[test]
async fn test_update_me_rejects_blank_name() {
    let state = create_test_state(MockRepoControl::default());

    let payload = UpdateProfileRequest {
        name: "   ".to_string(),
    };
    let result = handlers::update_me(regular_user(), State(state), Json(payload)).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
async fn test_delete_me_success() {
    let state = create_test_state(MockRepoControl {
        delete_result: true,
        ..MockRepoControl::default()
    });

    let result = handlers::delete_me(regular_user(), State(state)).await;

    assert!(result.is_ok());
    assert!(result.unwrap().success);
}

// --- ADMIN MODERATION TESTS ---

#[test]
async fn test_admin_stats_forbidden_for_regular_user() {
    let state = create_test_state(MockRepoControl::default());

    let result = handlers::get_admin_stats(regular_user(), State(state)).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[test]
async fn test_admin_stats_success() {
    let state = create_test_state(MockRepoControl {
        stats_to_return: AdminDashboardStats {
            total_events: 10,
            pending_events: 2,
            ..AdminDashboardStats::default()
        },
        ..MockRepoControl::default()
    });

    let result = handlers::get_admin_stats(admin_user(), State(state)).await;

    assert!(result.is_ok());
    let Json(stats) = result.unwrap();
    assert_eq!(stats.total_events, 10);
    assert_eq!(stats.pending_events, 2);
}

#[test]
async fn test_approve_event_success() {
    let state = create_test_state(MockRepoControl {
        event_to_return: Some(EventResponse {
            status: "approved".to_string(),
            ..EventResponse::default()
        }),
        ..MockRepoControl::default()
    });

    let result = handlers::approve_event(admin_user(), State(state), Path(TEST_ID)).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    assert_eq!(body.event.status, "approved");
}

#[test]
async fn test_approve_event_forbidden_for_regular_user() {
    let state = create_test_state(MockRepoControl::default());

    let result = handlers::approve_event(regular_user(), State(state), Path(TEST_ID)).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[test]
async fn test_reject_event_not_found() {
    let state = create_test_state(MockRepoControl {
        delete_result: false,
        ..MockRepoControl::default()
    });

    let result = handlers::reject_event(admin_user(), State(state), Path(TEST_ID)).await;

    assert!(matches!(result, Err(ApiError::NotFound("Event"))));
}

#[test]
async fn test_approve_recurring_reports_count() {
    let state = create_test_state(MockRepoControl {
        series_count: 12,
        ..MockRepoControl::default()
    });

    let result = handlers::approve_recurring(admin_user(), State(state), Path(TEST_ID)).await;

    assert!(result.is_ok());
    let Json(body) = result.unwrap();
    assert!(body.success);
    assert_eq!(body.count, 12);
}

#[test]
async fn test_reject_venue_success() {
    let state = create_test_state(MockRepoControl {
        delete_result: true,
        ..MockRepoControl::default()
    });

    let result = handlers::reject_venue(admin_user(), State(state), Path(TEST_ID)).await;

    assert!(result.is_ok());
    assert!(result.unwrap().success);
}
