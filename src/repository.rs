use crate::models::{
    AdminDashboardStats, CreateVenueRequest, Event, EventResponse, ToggleLikeResponse, User,
    Venue, VenueDetailResponse, VenueResponse,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// NewUser
///
/// Profile row to mirror after the identity provider accepts a signup. The id
/// is the provider-issued UUID; timestamps and trust flags come from column
/// defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub venue_name: Option<String>,
}

/// EventSubmission
///
/// A fully resolved event submission, ready for insertion: the venue has been
/// resolved to an id, the moderation status decided, and recurring submissions
/// expanded to the concrete series dates. The first date becomes the parent
/// row; the rest become children carrying `parent_event_id`.
#[derive(Debug, Clone)]
pub struct EventSubmission {
    pub title: String,
    pub description: String,
    pub dates: Vec<NaiveDate>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub venue_id: Uuid,
    pub price: Option<String>,
    pub ticket_url: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub submitted_by: Option<Uuid>,
    pub categories: Vec<String>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    pub recurrence_day: Option<i32>,
    pub recurrence_end_date: Option<NaiveDate>,
}

/// Repository Trait
///
/// The abstract contract for all persistence operations, letting handlers talk
/// to the data layer without knowing the implementation (Postgres in the
/// application, a mock in handler tests).
///
/// Error convention: database failures are logged at the implementation level
/// and collapse into empty vectors, `None`, `false` or zero counts, so the
/// handlers' response mapping stays uniform.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Events ---
    // Listing with filters. The caller decides the status; the handler layer
    // only ever passes 'pending' after an admin check.
    async fn list_events(
        &self,
        status: &str,
        date: Option<NaiveDate>,
        category: Option<String>,
        venue_id: Option<Uuid>,
        featured: bool,
    ) -> Vec<EventResponse>;
    // Single approved event for the public detail endpoint.
    async fn get_approved_event(&self, id: Uuid) -> Option<EventResponse>;
    // The caller's own submissions, newest first, regardless of status.
    async fn get_my_events(&self, user_id: Uuid) -> Vec<EventResponse>;
    // Inserts a series (parent + children + categories) transactionally.
    // Returns the enriched parent and the number of rows created.
    async fn create_event(&self, submission: EventSubmission) -> Option<(EventResponse, i64)>;
    // Moderation: status transition on a single event.
    async fn set_event_status(&self, id: Uuid, status: &str) -> Option<EventResponse>;
    // Moderation: rejection removes the row.
    async fn delete_event(&self, id: Uuid) -> bool;
    // Series moderation: only pending rows of the series are touched.
    async fn approve_series(&self, parent_id: Uuid) -> u64;
    async fn reject_series(&self, parent_id: Uuid) -> u64;
    async fn event_exists(&self, id: Uuid) -> bool;

    // --- Venues ---
    // None lists every venue; Some filters by status.
    async fn list_venues(&self, status: Option<&str>) -> Vec<VenueResponse>;
    async fn get_venue_detail(&self, id: Uuid) -> Option<VenueDetailResponse>;
    async fn create_venue(&self, req: CreateVenueRequest, status: &str) -> Option<Venue>;
    // Case-insensitive lookup used to deduplicate inline venue submissions.
    async fn find_venue_by_name(&self, name: &str) -> Option<Venue>;
    async fn set_venue_status(&self, id: Uuid, status: &str) -> Option<Venue>;
    // Venue rejection; dependent events are removed by the schema cascade.
    async fn delete_venue(&self, id: Uuid) -> bool;

    // --- Users ---
    async fn get_user(&self, id: Uuid) -> Option<User>;
    async fn create_user(&self, user: NewUser) -> Option<User>;
    async fn update_user_name(&self, id: Uuid, name: &str) -> Option<User>;
    async fn delete_user(&self, id: Uuid) -> bool;

    // --- Likes ---
    async fn liked_event_ids(&self, user_id: Uuid) -> Vec<Uuid>;
    async fn like_counts(&self) -> HashMap<Uuid, i64>;
    // Idempotent flip: removes the like if present, inserts it otherwise, and
    // reports the resulting state and count.
    async fn toggle_like(&self, user_id: Uuid, event_id: Uuid) -> Option<ToggleLikeResponse>;

    // --- Admin ---
    async fn get_stats(&self) -> AdminDashboardStats;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

const EVENT_COLUMNS: &str = "id, title, description, date, start_time, end_time, venue_id, \
     price, ticket_url, image_url, featured, status, submitted_by, is_recurring, \
     recurrence_pattern, recurrence_day, recurrence_end_date, parent_event_id, \
     created_at, updated_at";

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// enrich
    ///
    /// Turns raw event rows into response shapes by batch-loading the referenced
    /// venues, the flattened category names and the like counts, then stitching
    /// them together in memory. Three follow-up queries regardless of result
    /// size, instead of a per-event N+1.
    async fn enrich(&self, events: Vec<Event>) -> Vec<EventResponse> {
        if events.is_empty() {
            return vec![];
        }

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let mut venue_ids: Vec<Uuid> = events.iter().map(|e| e.venue_id).collect();
        venue_ids.sort_unstable();
        venue_ids.dedup();

        let venues: HashMap<Uuid, Venue> =
            sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ANY($1)")
                .bind(&venue_ids)
                .fetch_all(&self.pool)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("enrich venues error: {:?}", e);
                    vec![]
                })
                .into_iter()
                .map(|v| (v.id, v))
                .collect();

        let mut categories: HashMap<Uuid, Vec<String>> = HashMap::new();
        let category_rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT event_id, name FROM event_categories WHERE event_id = ANY($1) ORDER BY name",
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("enrich categories error: {:?}", e);
            vec![]
        });
        for (event_id, name) in category_rows {
            categories.entry(event_id).or_default().push(name);
        }

        let like_counts: HashMap<Uuid, i64> = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT event_id, COUNT(*) FROM likes WHERE event_id = ANY($1) GROUP BY event_id",
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("enrich like counts error: {:?}", e);
            vec![]
        })
        .into_iter()
        .collect();

        let mut responses = Vec::with_capacity(events.len());
        for event in events {
            // The FK guarantees the venue exists; a miss here means the row
            // vanished mid-assembly, so the event is dropped from the page.
            let Some(venue) = venues.get(&event.venue_id).cloned() else {
                tracing::warn!("event {} references missing venue {}", event.id, event.venue_id);
                continue;
            };
            responses.push(EventResponse {
                id: event.id,
                title: event.title,
                description: event.description,
                date: event.date,
                start_time: event.start_time,
                end_time: event.end_time,
                price: event.price,
                ticket_url: event.ticket_url,
                image_url: event.image_url,
                featured: event.featured,
                status: event.status,
                venue,
                categories: categories.remove(&event.id).unwrap_or_default(),
                like_count: like_counts.get(&event.id).copied().unwrap_or(0),
                is_recurring: event.is_recurring,
                recurrence_pattern: event.recurrence_pattern,
                recurrence_day: event.recurrence_day,
                recurrence_end_date: event.recurrence_end_date,
                parent_event_id: event.parent_event_id,
                created_at: event.created_at,
            });
        }
        responses
    }

    async fn enrich_one(&self, event: Event) -> Option<EventResponse> {
        self.enrich(vec![event]).await.into_iter().next()
    }

    /// insert_series
    ///
    /// Transactional insert of the parent event, its children (one per extra
    /// date) and the category rows for every instance. Returns the parent row
    /// and the total number of events created.
    async fn insert_series(&self, sub: &EventSubmission) -> Result<(Event, i64), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let insert_sql = format!(
            "INSERT INTO events (id, title, description, date, start_time, end_time, venue_id, \
             price, ticket_url, image_url, status, submitted_by, is_recurring, \
             recurrence_pattern, recurrence_day, recurrence_end_date, parent_event_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {EVENT_COLUMNS}"
        );

        let mut parent: Option<Event> = None;
        let mut total = 0i64;

        for date in &sub.dates {
            let id = Uuid::new_v4();
            let event = sqlx::query_as::<_, Event>(&insert_sql)
                .bind(id)
                .bind(&sub.title)
                .bind(&sub.description)
                .bind(date)
                .bind(&sub.start_time)
                .bind(&sub.end_time)
                .bind(sub.venue_id)
                .bind(&sub.price)
                .bind(&sub.ticket_url)
                .bind(&sub.image_url)
                .bind(&sub.status)
                .bind(sub.submitted_by)
                .bind(sub.is_recurring)
                .bind(&sub.recurrence_pattern)
                .bind(sub.recurrence_day)
                .bind(sub.recurrence_end_date)
                .bind(parent.as_ref().map(|p| p.id))
                .fetch_one(&mut *tx)
                .await?;

            for name in &sub.categories {
                sqlx::query(
                    "INSERT INTO event_categories (event_id, name) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(event.id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
            }

            total += 1;
            if parent.is_none() {
                parent = Some(event);
            }
        }

        tx.commit().await?;

        // dates is validated non-empty before submission reaches the repository.
        match parent {
            Some(parent) => Ok((parent, total)),
            None => Err(sqlx::Error::RowNotFound),
        }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// list_events
    ///
    /// Flexible filtering via QueryBuilder for safe parameterization. The
    /// status is always bound; the handler layer guarantees non-admins can
    /// only reach this with 'approved'.
    async fn list_events(
        &self,
        status: &str,
        date: Option<NaiveDate>,
        category: Option<String>,
        venue_id: Option<Uuid>,
        featured: bool,
    ) -> Vec<EventResponse> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM events WHERE status = ");
        builder.push_bind(status.to_string());

        if let Some(d) = date {
            builder.push(" AND date = ");
            builder.push_bind(d);
        }
        if let Some(v) = venue_id {
            builder.push(" AND venue_id = ");
            builder.push_bind(v);
        }
        if featured {
            builder.push(" AND featured = true");
        }
        if let Some(c) = category {
            builder.push(" AND id IN (SELECT event_id FROM event_categories WHERE name = ");
            builder.push_bind(c);
            builder.push(")");
        }

        builder.push(" ORDER BY date ASC, start_time ASC");

        let events = match builder.build_query_as::<Event>().fetch_all(&self.pool).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("list_events error: {:?}", e);
                return vec![];
            }
        };
        self.enrich(events).await
    }

    /// get_approved_event
    ///
    /// Public detail retrieval; pending and cancelled events are invisible here.
    async fn get_approved_event(&self, id: Uuid) -> Option<EventResponse> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = $1 AND status = 'approved'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_approved_event error: {:?}", e);
            None
        })?;
        self.enrich_one(event).await
    }

    /// get_my_events
    ///
    /// All submissions by a user including pending and cancelled ones, so the
    /// submitter can watch their moderation queue.
    async fn get_my_events(&self, user_id: Uuid) -> Vec<EventResponse> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE submitted_by = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_my_events error: {:?}", e);
            vec![]
        });
        self.enrich(events).await
    }

    async fn create_event(&self, submission: EventSubmission) -> Option<(EventResponse, i64)> {
        match self.insert_series(&submission).await {
            Ok((parent, total)) => {
                let parent = self.enrich_one(parent).await?;
                Some((parent, total))
            }
            Err(e) => {
                tracing::error!("create_event error: {:?}", e);
                None
            }
        }
    }

    /// set_event_status
    ///
    /// Single-event moderation (approve, cancel). Returns None when the id
    /// does not exist.
    async fn set_event_status(&self, id: Uuid, status: &str) -> Option<EventResponse> {
        let sql = format!(
            "UPDATE events SET status = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("set_event_status error: {:?}", e);
                None
            })?;
        self.enrich_one(event).await
    }

    async fn delete_event(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_event error: {:?}", e);
                false
            }
        }
    }

    /// approve_series
    ///
    /// Approves every pending event whose id or parent_event_id matches, i.e.
    /// the parent and all of its children in one statement.
    async fn approve_series(&self, parent_id: Uuid) -> u64 {
        match sqlx::query(
            "UPDATE events SET status = 'approved', updated_at = NOW() \
             WHERE (id = $1 OR parent_event_id = $1) AND status = 'pending'",
        )
        .bind(parent_id)
        .execute(&self.pool)
        .await
        {
            Ok(res) => res.rows_affected(),
            Err(e) => {
                tracing::error!("approve_series error: {:?}", e);
                0
            }
        }
    }

    /// reject_series
    ///
    /// Deletes every pending event of the series. Already-approved instances
    /// are deliberately left alone.
    async fn reject_series(&self, parent_id: Uuid) -> u64 {
        match sqlx::query(
            "DELETE FROM events WHERE (id = $1 OR parent_event_id = $1) AND status = 'pending'",
        )
        .bind(parent_id)
        .execute(&self.pool)
        .await
        {
            Ok(res) => res.rows_affected(),
            Err(e) => {
                tracing::error!("reject_series error: {:?}", e);
                0
            }
        }
    }

    async fn event_exists(&self, id: Uuid) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("event_exists error: {:?}", e);
                false
            })
    }

    /// list_venues
    ///
    /// Directory listing with per-venue event counts, ordered by name.
    async fn list_venues(&self, status: Option<&str>) -> Vec<VenueResponse> {
        let result = match status {
            Some(status) => {
                sqlx::query_as::<_, VenueResponse>(
                    "SELECT v.id, v.name, v.address, v.neighborhood, v.website, v.image_url, \
                            v.status, v.created_at, COUNT(e.id) AS event_count \
                     FROM venues v LEFT JOIN events e ON e.venue_id = v.id \
                     WHERE v.status = $1 \
                     GROUP BY v.id ORDER BY v.name ASC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, VenueResponse>(
                    "SELECT v.id, v.name, v.address, v.neighborhood, v.website, v.image_url, \
                            v.status, v.created_at, COUNT(e.id) AS event_count \
                     FROM venues v LEFT JOIN events e ON e.venue_id = v.id \
                     GROUP BY v.id ORDER BY v.name ASC",
                )
                .fetch_all(&self.pool)
                .await
            }
        };
        result.unwrap_or_else(|e| {
            tracing::error!("list_venues error: {:?}", e);
            vec![]
        })
    }

    /// get_venue_detail
    ///
    /// The venue page: the venue itself plus its approved events.
    async fn get_venue_detail(&self, id: Uuid) -> Option<VenueDetailResponse> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_venue_detail error: {:?}", e);
                None
            })?;

        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE venue_id = $1 AND status = 'approved' \
             ORDER BY date ASC, start_time ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_venue_detail events error: {:?}", e);
            vec![]
        });
        let events = self.enrich(events).await;

        Some(VenueDetailResponse {
            id: venue.id,
            name: venue.name,
            address: venue.address,
            neighborhood: venue.neighborhood,
            website: venue.website,
            image_url: venue.image_url,
            status: venue.status,
            created_at: venue.created_at,
            events,
        })
    }

    async fn create_venue(&self, req: CreateVenueRequest, status: &str) -> Option<Venue> {
        sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (id, name, address, neighborhood, website, image_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.neighborhood)
        .bind(&req.website)
        .bind(&req.image_url)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| tracing::error!("create_venue error: {:?}", e))
        .ok()
    }

    async fn find_venue_by_name(&self, name: &str) -> Option<Venue> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE LOWER(name) = LOWER($1) LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_venue_by_name error: {:?}", e);
                None
            })
    }

    async fn set_venue_status(&self, id: Uuid, status: &str) -> Option<Venue> {
        sqlx::query_as::<_, Venue>("UPDATE venues SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("set_venue_status error: {:?}", e);
                None
            })
    }

    /// delete_venue
    ///
    /// Venue rejection. The ON DELETE CASCADE on events.venue_id removes every
    /// dependent event in the same statement.
    async fn delete_venue(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_venue error: {:?}", e);
                false
            }
        }
    }

    /// get_user
    ///
    /// Profile data (role included) needed for authentication and authorization.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or(None)
    }

    /// create_user
    ///
    /// Mirrors the profile row after external signup success.
    async fn create_user(&self, user: NewUser) -> Option<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO profiles (id, email, name, role, venue_name) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role)
        .bind(&user.venue_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| tracing::error!("create_user error: {:?}", e))
        .ok()
    }

    async fn update_user_name(&self, id: Uuid, name: &str) -> Option<User> {
        sqlx::query_as::<_, User>("UPDATE profiles SET name = $1 WHERE id = $2 RETURNING *")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("update_user_name error: {:?}", e);
                None
            })
    }

    /// delete_user
    ///
    /// Account deletion. Likes cascade away; submitted events survive with
    /// submitted_by set NULL by the schema.
    async fn delete_user(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_user error: {:?}", e);
                false
            }
        }
    }

    async fn liked_event_ids(&self, user_id: Uuid) -> Vec<Uuid> {
        sqlx::query_scalar::<_, Uuid>("SELECT event_id FROM likes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("liked_event_ids error: {:?}", e);
                vec![]
            })
    }

    async fn like_counts(&self) -> HashMap<Uuid, i64> {
        sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT event_id, COUNT(*) FROM likes GROUP BY event_id",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("like_counts error: {:?}", e);
            vec![]
        })
        .into_iter()
        .collect()
    }

    /// toggle_like
    ///
    /// Delete-first flip: if a row was removed the user had liked the event;
    /// otherwise insert with ON CONFLICT DO NOTHING so a concurrent duplicate
    /// toggle cannot error. The returned count is re-read after the flip.
    async fn toggle_like(&self, user_id: Uuid, event_id: Uuid) -> Option<ToggleLikeResponse> {
        let deleted = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(|e| tracing::error!("toggle_like delete error: {:?}", e))
            .ok()?
            .rows_affected();

        let liked = if deleted > 0 {
            false
        } else {
            sqlx::query(
                "INSERT INTO likes (user_id, event_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(|e| tracing::error!("toggle_like insert error: {:?}", e))
            .ok()?;
            true
        };

        let like_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("toggle_like count error: {:?}", e);
                    0
                });

        Some(ToggleLikeResponse { liked, like_count })
    }

    /// get_stats
    ///
    /// Compiles the administrative dashboard counters.
    async fn get_stats(&self) -> AdminDashboardStats {
        let count = |sql: &'static str| {
            let pool = self.pool.clone();
            async move {
                sqlx::query_scalar::<_, i64>(sql)
                    .fetch_one(&pool)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!("get_stats error ({sql}): {:?}", e);
                        0
                    })
            }
        };

        AdminDashboardStats {
            total_events: count("SELECT COUNT(*) FROM events").await,
            total_venues: count("SELECT COUNT(*) FROM venues").await,
            total_users: count("SELECT COUNT(*) FROM profiles").await,
            total_likes: count("SELECT COUNT(*) FROM likes").await,
            pending_events: count(
                "SELECT COUNT(*) FROM events WHERE status = 'pending'",
            )
            .await,
            pending_venues: count(
                "SELECT COUNT(*) FROM venues WHERE status = 'pending'",
            )
            .await,
        }
    }
}
