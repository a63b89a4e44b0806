/**
 * Trip Actions
 *
 * CRUD over the caller's trips plus the deliberately unscoped cross-user
 * views: the all-trips table reads every user's trips (read-only by the
 * route surface) and the operator list enumerates all users so the trip
 * form can pick one.
 *
 * Datetime fields arrive as datetime-local form input (local wall clock,
 * no offset) and are normalized to UTC RFC 3339 with milliseconds before
 * submission. Already-offset RFC 3339 input is converted as-is.
 */

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::actions::{authed_client, check_owner, require_session, ActionError, TRIPS, USERS};
use crate::remote::filter::Filter;
use crate::remote::records::{ListResult, Locomotive, Target, TripRecord, UserSummary};
use crate::remote::{ListQuery, RemoteClient};
use crate::session::Session;

/// Default sort for every trip list
pub const DEFAULT_TRIP_SORT: &str = "-start_datetime";

/// Fields a trip search term is matched against
const SEARCH_FIELDS: [&str; 6] = [
    "station",
    "route",
    "train_number",
    "driver",
    "assistant_driver",
    "locomotive_number",
];

/// Result of a trip mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip: Option<TripRecord>,
}

impl TripResult {
    fn success(trip: Option<TripRecord>) -> Self {
        Self {
            success: Some(true),
            trip,
            ..Self::default()
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    fn not_authenticated() -> Self {
        Self::error("Not authenticated")
    }
}

/// Trip form input
#[derive(Debug, Clone)]
pub struct TripInput {
    pub start_datetime: String,
    pub end_datetime: String,
    /// Operator's user record id
    pub username: String,
    pub target: Target,
    pub station: String,
    pub route: String,
    pub driver: String,
    pub assistant_driver: Option<String>,
    pub train_number: String,
    pub locomotive: Locomotive,
    pub locomotive_number: String,
}

impl TripInput {
    /// Wire payload shared by create and update; `user` is added only on
    /// create and never sent on update
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "start_datetime": normalize_datetime(&self.start_datetime),
            "end_datetime": normalize_datetime(&self.end_datetime),
            "username": self.username,
            "target": self.target,
            "station": self.station,
            "route": self.route,
            "driver": self.driver,
            "assistant_driver": self.assistant_driver.as_deref().unwrap_or(""),
            "train_number": self.train_number,
            "locomotive": self.locomotive,
            "locomotive_number": self.locomotive_number,
        })
    }
}

/// Create a trip owned by the caller
pub async fn create_trip(
    client: &RemoteClient,
    session: Option<&Session>,
    input: &TripInput,
) -> TripResult {
    let Ok(session) = require_session(session) else {
        return TripResult::not_authenticated();
    };

    let mut body = input.body();
    body["user"] = serde_json::Value::String(session.user_id().to_string());

    match authed_client(client, session)
        .create::<TripRecord, _>(TRIPS, &body)
        .await
    {
        Ok(trip) => TripResult::success(Some(trip)),
        Err(crate::remote::error::RemoteError::Response {
            status,
            message,
            data,
        }) => {
            tracing::error!("Create trip rejected: status {} {}", status, message);
            let details = serde_json::to_string(&data).unwrap_or_default();
            TripResult::error(format!(
                "Creation failed: {}. Details: {}",
                message, details
            ))
        }
        Err(e) => {
            tracing::error!("Create trip error: {}", e);
            TripResult::error("Failed to create trip")
        }
    }
}

/// Update a trip's fields; ownership (`user`) is never part of the payload
pub async fn update_trip(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
    input: &TripInput,
) -> TripResult {
    let Ok(session) = require_session(session) else {
        return TripResult::not_authenticated();
    };

    match authed_client(client, session)
        .update::<TripRecord, _>(TRIPS, id, &input.body())
        .await
    {
        Ok(trip) => TripResult::success(Some(trip)),
        Err(e) => {
            tracing::error!("Update trip error: {}", e);
            match e {
                crate::remote::error::RemoteError::Response { message, .. } => {
                    TripResult::error(message)
                }
                _ => TripResult::error("Failed to update trip"),
            }
        }
    }
}

/// Delete a trip
pub async fn delete_trip(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
) -> TripResult {
    let Ok(session) = require_session(session) else {
        return TripResult::not_authenticated();
    };

    match authed_client(client, session).delete(TRIPS, id).await {
        Ok(()) => TripResult::success(None),
        Err(e) => {
            tracing::error!("Delete trip error: {}", e);
            match e {
                crate::remote::error::RemoteError::Response { message, .. } => {
                    TripResult::error(message)
                }
                _ => TripResult::error("Failed to delete trip"),
            }
        }
    }
}

/// List the caller's trips with the operator relation expanded
pub async fn get_trips(
    client: &RemoteClient,
    session: Option<&Session>,
    filter: Option<Filter>,
    sort: Option<&str>,
    page: u32,
    per_page: u32,
) -> Result<ListResult<TripRecord>, ActionError> {
    let session = require_session(session)?;

    let mut scoped = Filter::eq("user", session.user_id());
    if let Some(extra) = filter {
        scoped = scoped.and(extra);
    }

    let query = ListQuery::new()
        .filter(&scoped)
        .sort(sort.unwrap_or(DEFAULT_TRIP_SORT))
        .expand("username");
    let trips = authed_client(client, session)
        .get_list(TRIPS, page, per_page, &query)
        .await?;
    Ok(trips)
}

/// Fetch one of the caller's trips for editing
pub async fn get_trip(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
) -> Result<TripRecord, ActionError> {
    let session = require_session(session)?;
    let trip: TripRecord = authed_client(client, session)
        .get_one(TRIPS, id, Some("username"))
        .await?;
    check_owner(&trip.user, session)?;
    Ok(trip)
}

/// List every user's trips for the read-only overview table
///
/// No owner conjunct by design: the table is meant to show all trips to
/// any authenticated user.
pub async fn get_all_trips(
    client: &RemoteClient,
    session: Option<&Session>,
    page: u32,
    per_page: u32,
    sort: Option<&str>,
) -> Result<ListResult<TripRecord>, ActionError> {
    let session = require_session(session)?;

    let query = ListQuery::new()
        .sort(sort.unwrap_or(DEFAULT_TRIP_SORT))
        .expand("user,username");
    let trips = authed_client(client, session)
        .get_list(TRIPS, page, per_page, &query)
        .await?;
    Ok(trips)
}

/// The overview table with its optional filters applied server-side
///
/// Target and locomotive become equality conjuncts; a search term is ORed
/// across the textual trip fields and ANDed with the rest.
#[allow(clippy::too_many_arguments)]
pub async fn get_all_trips_with_filters(
    client: &RemoteClient,
    session: Option<&Session>,
    page: u32,
    per_page: u32,
    sort: Option<&str>,
    target: Option<Target>,
    locomotive: Option<Locomotive>,
    search: Option<&str>,
) -> Result<ListResult<TripRecord>, ActionError> {
    let session = require_session(session)?;

    let mut query = ListQuery::new()
        .sort(sort.unwrap_or(DEFAULT_TRIP_SORT))
        .expand("user,username");
    if let Some(filter) = all_trips_filter(target, locomotive, search) {
        query = query.filter(&filter);
    }

    let trips = authed_client(client, session)
        .get_list(TRIPS, page, per_page, &query)
        .await?;
    Ok(trips)
}

/// List all users for the operator selection control
///
/// Available to any authenticated user; the projection is limited to the
/// fields the dropdown needs.
pub async fn get_all_users(
    client: &RemoteClient,
    session: Option<&Session>,
) -> Result<ListResult<UserSummary>, ActionError> {
    let session = require_session(session)?;

    let query = ListQuery::new().sort("name").fields("id,name,email");
    let users = authed_client(client, session)
        .get_list(USERS, 1, 100, &query)
        .await?;
    Ok(users)
}

/// Compose the overview table's optional filters, `None` when unfiltered
pub fn all_trips_filter(
    target: Option<Target>,
    locomotive: Option<Locomotive>,
    search: Option<&str>,
) -> Option<Filter> {
    let mut filter: Option<Filter> = None;

    if let Some(target) = target {
        filter = Some(Filter::eq("target", target.as_str()));
    }
    if let Some(locomotive) = locomotive {
        let eq = Filter::eq("locomotive", locomotive.as_str());
        filter = Some(match filter {
            Some(existing) => existing.and(eq),
            None => eq,
        });
    }
    if let Some(term) = search.filter(|term| !term.is_empty()) {
        let mut fields = SEARCH_FIELDS.iter();
        let first = fields.next().expect("search field list is non-empty");
        let mut any = Filter::contains(*first, term);
        for field in fields {
            any = any.or(Filter::contains(*field, term));
        }
        filter = Some(match filter {
            Some(existing) => existing.and(any),
            None => any,
        });
    }

    filter
}

/// Normalize a datetime-local form value to UTC RFC 3339 with milliseconds
///
/// Empty input stays empty (an unset end time). Input that already carries
/// an offset is converted; bare wall-clock input is interpreted in the
/// server's local timezone, matching how the form was filled in. Anything
/// unparseable passes through for the backend to reject.
pub fn normalize_datetime(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            let local = match Local.from_local_datetime(&naive) {
                LocalResult::Single(moment) => moment,
                // DST fold: take the earlier instant
                LocalResult::Ambiguous(earliest, _) => earliest,
                // DST gap: the wall-clock time never existed
                LocalResult::None => return raw.to_string(),
            };
            return local
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true);
        }
    }

    raw.to_string()
}
