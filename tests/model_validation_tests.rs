use chrono::NaiveDate;
use happenings::models::{
    CreateEventRequest, EventCreatedResponse, LikesResponse, ToggleLikeResponse, User, UserProfile,
};
use uuid::Uuid;

// The frontend consumes camelCase keys exclusively; these tests pin the wire
// shape so a serde attribute regression cannot slip through silently.

#[test]
fn test_event_request_accepts_camel_case_keys() {
    let json = r#"{
        "title": "Trivia Night",
        "description": "Weekly trivia",
        "date": "2026-09-02",
        "startTime": "20:00",
        "venueId": "00000000-0000-0000-0000-000000000001",
        "categories": ["trivia"],
        "isRecurring": true,
        "recurrencePattern": "weekly",
        "recurrenceEndDate": "2026-10-28"
    }"#;

    let req: CreateEventRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.start_time, "20:00");
    assert!(req.is_recurring);
    assert_eq!(req.recurrence_pattern.as_deref(), Some("weekly"));
    assert_eq!(
        req.recurrence_end_date,
        NaiveDate::from_ymd_opt(2026, 10, 28)
    );
}

#[test]
fn test_event_request_is_recurring_defaults_to_false() {
    // isRecurring is optional on the wire
    let json = r#"{
        "title": "One-off",
        "description": "Single show",
        "date": "2026-09-02",
        "startTime": "20:00",
        "categories": []
    }"#;

    let req: CreateEventRequest = serde_json::from_str(json).unwrap();
    assert!(!req.is_recurring);
    assert!(req.venue_id.is_none());
}

#[test]
fn test_created_response_uses_total_created_key() {
    let response = EventCreatedResponse {
        total_created: 4,
        ..EventCreatedResponse::default()
    };

    let json_output = serde_json::to_string(&response).unwrap();
    assert!(json_output.contains(r#""totalCreated":4"#));
    assert!(!json_output.contains("total_created"));
}

#[test]
fn test_toggle_like_response_shape() {
    let response = ToggleLikeResponse {
        liked: true,
        like_count: 7,
    };

    let json_output = serde_json::to_string(&response).unwrap();
    assert!(json_output.contains(r#""liked":true"#));
    assert!(json_output.contains(r#""likeCount":7"#));
}

#[test]
fn test_likes_response_shape() {
    let response = LikesResponse::default();

    let json_output = serde_json::to_string(&response).unwrap();
    assert!(json_output.contains(r#""likes":[]"#));
    assert!(json_output.contains(r#""likeCounts":{}"#));
}

#[test]
fn test_user_profile_hides_trust_flag() {
    // is_trusted drives moderation internally and must not be exposed on /me
    let user = User {
        id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        name: "A".to_string(),
        role: "organizer".to_string(),
        venue_name: Some("The Mansion".to_string()),
        is_trusted: true,
        ..User::default()
    };

    let profile: UserProfile = user.into();
    let json_output = serde_json::to_string(&profile).unwrap();

    assert!(json_output.contains(r#""venueName":"The Mansion""#));
    assert!(!json_output.contains("isTrusted"));
    assert!(!json_output.contains("is_trusted"));
}
